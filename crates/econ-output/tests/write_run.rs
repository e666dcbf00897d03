//! Full run output against a temporary directory.

use chrono::{DateTime, Utc};
use econ_model::{
    CanonicalObservation, CountryCode, IndicatorType, NormalizationReport, PipelineOptions,
    SourceId, SourceOutcome,
};
use econ_output::{MANIFEST_FILE, read_dataset, write_run};
use tempfile::tempdir;

fn observation(code: &str, year: i32, value: f64, usd: Option<f64>) -> CanonicalObservation {
    CanonicalObservation {
        country_code: CountryCode::new(code).unwrap(),
        country_name: format!("{code} name"),
        year,
        indicator_type: IndicatorType::Cpi,
        value,
        value_usd: usd,
        value_rebased: Some(value),
        source: "worldbank+bis".to_string(),
        ingested_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

#[test]
fn dataset_round_trips_and_manifest_describes_it() {
    let dir = tempdir().unwrap();
    let data = vec![
        observation("USA", 2016, 100.0, Some(100.0)),
        observation("DEU", 2016, 100.0, None),
        observation("DEU", 2017, 101.25, Some(0.5)),
    ];
    let mut report = NormalizationReport::default();
    report.record_source(SourceId::WorldBank, SourceOutcome::Loaded { records: 3 });
    report.record_unresolved(SourceId::WorldBank, "WLD");

    let written = write_run(
        dir.path(),
        &data,
        &report,
        &PipelineOptions::default(),
        DateTime::<Utc>::UNIX_EPOCH,
    )
    .unwrap();
    assert_eq!(written.checksum_sha256.len(), 64);
    assert_eq!(written.stats.records, 3);
    assert_eq!(written.stats.countries, 2);

    let loaded = read_dataset(dir.path()).unwrap();
    let mut expected = data.clone();
    expected.sort_by_key(CanonicalObservation::key);
    assert_eq!(loaded, expected);

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap())
            .unwrap();
    assert_eq!(manifest["checksum_sha256"], written.checksum_sha256.as_str());
    assert_eq!(manifest["options"]["reference_year"], 2016);
    assert_eq!(manifest["stats"]["records"], 3);
    assert_eq!(manifest["unique_key"][1], "year");
    assert_eq!(manifest["diagnostics"]["unresolved_records"], 1);
}
