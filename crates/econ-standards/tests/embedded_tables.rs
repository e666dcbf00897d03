//! Checks against the embedded reference data.

use econ_model::CountryCode;
use econ_standards::{Resolution, StandardsRegistry};
use proptest::prelude::*;

fn registry() -> &'static StandardsRegistry {
    StandardsRegistry::shared().expect("embedded tables load")
}

fn code(s: &str) -> CountryCode {
    CountryCode::new(s).unwrap()
}

#[test]
fn numeric_codes_resolve() {
    let countries = &registry().countries;
    assert_eq!(countries.lookup("276"), Some(code("DEU")));
    assert_eq!(countries.lookup("'4'"), Some(code("AFG")));
    assert_eq!(countries.lookup("004"), Some(code("AFG")));
    assert_eq!(countries.lookup("060"), Some(code("BMU")));
    assert_eq!(countries.lookup("092"), Some(code("VGB")));
    assert_eq!(countries.lookup("275"), Some(code("PSE")));
}

#[test]
fn alpha2_codes_resolve() {
    let countries = &registry().countries;
    assert_eq!(countries.lookup("DE"), Some(code("DEU")));
    assert_eq!(countries.lookup("us"), Some(code("USA")));
    assert_eq!(countries.lookup("SR"), Some(code("SUR")));
}

#[test]
fn aggregates_stay_unresolved() {
    let countries = &registry().countries;
    // World Bank aggregates and BIS area codes
    for raw in ["EUU", "WLD", "OED", "XM", "5R", "1", "World"] {
        assert_eq!(countries.lookup(raw), None, "{raw} should not resolve");
    }
}

#[test]
fn names_fill_from_registry() {
    let countries = &registry().countries;
    assert_eq!(
        countries.resolve("840", None),
        Resolution::Resolved {
            code: code("USA"),
            name: "United States".to_string()
        }
    );
    assert_eq!(countries.name(code("BMU")), Some("Bermuda"));
    assert!(countries.iter().all(|record| !record.name.is_empty()));
}

#[test]
fn argentina_compounds_four_switches() {
    let table = &registry().redenominations;
    assert_eq!(table.cumulative_factor(code("ARG"), 1965), 1e13);
    assert_eq!(table.get(code("ARG")).unwrap().steps.len(), 4);
}

#[test]
fn zimbabwe_compounds_to_1e25() {
    let table = &registry().redenominations;
    let factor = table.cumulative_factor(code("ZWE"), 2000);
    assert!((factor / 1e25 - 1.0).abs() < 1e-12);
}

#[test]
fn every_redenominated_country_is_registered() {
    let registry = registry();
    for country in registry.redenominations.countries() {
        assert!(registry.countries.contains(country), "{country} missing");
    }
}

#[test]
fn euro_members_have_adoption_years() {
    let unions = &registry().currency_unions;
    assert_eq!(unions.len(), 20);
    let deu = unions.membership(code("DEU")).unwrap();
    assert_eq!(deu.adoption_year, 1999);
    assert_eq!(deu.conversion_rate, 1.95583);
    assert_eq!(unions.membership(code("HRV")).unwrap().adoption_year, 2023);
    assert!(unions.membership(code("GBR")).is_none());
}

proptest! {
    #[test]
    fn factor_is_identity_after_latest_switch(offset in 0i32..200) {
        let table = &registry().redenominations;
        for country in table.countries() {
            let latest = table.get(country).unwrap().latest_switch().unwrap();
            prop_assert_eq!(table.cumulative_factor(country, latest + offset), 1.0);
        }
    }

    #[test]
    fn factor_never_increases_with_year(year in 1900i32..2030) {
        let table = &registry().redenominations;
        for country in table.countries() {
            prop_assert!(
                table.cumulative_factor(country, year) >= table.cumulative_factor(country, year + 1)
            );
        }
    }
}
