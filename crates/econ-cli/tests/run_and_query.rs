//! Runs the pipeline into a temporary directory and queries the result.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use econ_cli::cli::{CompareArgs, CountryArgs, RunArgs, StatsArgs};
use econ_cli::commands::{
    run_compare, run_country, run_ingest_and_transform, run_stats, snapshot_cache,
};
use econ_cli::config::EconConfig;
use econ_compare::IndexedSeries;
use econ_model::{CountryCode, IndicatorType};
use tempfile::TempDir;

fn write_extracts(dir: &Path, cpi_file: &str) {
    fs::write(
        dir.join(cpi_file),
        "countryiso3code,country,date,value\n\
         DEU,Germany,2015,98\n\
         DEU,Germany,2016,100\n\
         DEU,Germany,2017,102\n\
         FRA,France,2016,100\n\
         FRA,France,2017,101\n\
         MEX,Mexico,1990,10\n\
         MEX,Mexico,2005,50\n\
         MEX,Mexico,2010,75\n\
         WLD,World,2016,100\n",
    )
    .unwrap();
    fs::write(
        dir.join("ilostat_wages.csv"),
        "ref_area,sex,classif1,time,obs_value\n\
         MEX,SEX_T,CUR_TYPE_LCU,2005,4000\n\
         MEX,SEX_T,CUR_TYPE_LCU,2010,5000\n\
         MEX,SEX_T,CUR_TYPE_LCU,2016,6000\n",
    )
    .unwrap();
    fs::write(
        dir.join("worldbank_fx.csv"),
        "countryiso3code,date,value\n\
         MEX,2010,12.5\n",
    )
    .unwrap();
}

fn run_args(input: &Path, output: &Path) -> RunArgs {
    RunArgs {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        reference_year: None,
        min_wage_observations: None,
        wage_precedence: None,
        dry_run: false,
    }
}

fn country_args(data: &Path, country: &str, usd: bool) -> CountryArgs {
    CountryArgs {
        data: data.to_path_buf(),
        country: country.to_string(),
        from: None,
        to: None,
        indicators: Vec::new(),
        usd,
    }
}

fn index_at<K>(series: &IndexedSeries<K>, year: i32) -> Option<f64> {
    series.points.iter().find(|p| p.year == year).and_then(|p| p.index)
}

fn code(s: &str) -> CountryCode {
    CountryCode::new(s).unwrap()
}

#[test]
fn run_then_query_country_and_comparison() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_extracts(input.path(), "worldbank_cpi.csv");
    let config = EconConfig::default();

    let result = run_ingest_and_transform(&run_args(input.path(), output.path()), &config).unwrap();
    let written = result.written.expect("dataset written");
    assert!(written.dataset_path.is_file());
    assert!(written.manifest_path.is_file());
    assert_eq!(result.stats.records, 11);
    assert_eq!(result.report.unresolved_records, 1);
    assert!(result.report.unavailable_sources().len() >= 3);

    let view = run_country(&country_args(output.path(), "MX", false), &config).unwrap();
    assert_eq!(view.country, code("MEX"));
    assert_eq!(view.base_year, Some(2005));
    assert_eq!(view.series.len(), 2);
    assert_eq!(view.series[0].key, IndicatorType::Cpi);
    assert_eq!(index_at(&view.series[0], 2010), Some(150.0));
    assert_eq!(index_at(&view.series[1], 2010), Some(125.0));
    assert_eq!(
        view.missing,
        vec![IndicatorType::FoodCpi, IndicatorType::HousingPriceIndex]
    );

    let usd = run_country(&country_args(output.path(), "484", true), &config).unwrap();
    assert_eq!(usd.base_year, Some(2010));
    for series in &usd.series {
        assert_eq!(series.points.len(), 1);
        assert_eq!(series.points[0].index, Some(100.0));
    }
    assert_eq!(usd.series[1].points[0].value, 400.0);

    let comparison = run_compare(
        &CompareArgs {
            data: output.path().to_path_buf(),
            indicator: IndicatorType::Cpi,
            countries: vec!["DEU".to_string(), "FR".to_string(), "USA".to_string()],
            from: None,
            to: None,
            usd: false,
        },
        &config,
    )
    .unwrap();
    assert_eq!(comparison.base_year, Some(2016));
    assert_eq!(comparison.missing, vec![code("USA")]);
    assert_eq!(index_at(&comparison.series[0], 2017), Some(102.0));
    assert_eq!(index_at(&comparison.series[1], 2017), Some(101.0));

    let stats = run_stats(
        &StatsArgs {
            data: output.path().to_path_buf(),
        },
        &config,
    )
    .unwrap();
    assert_eq!(stats.records, 11);
    assert_eq!(stats.countries, 3);
    assert_eq!(stats.year_range, Some((1990, 2017)));
}

#[test]
fn queries_share_a_snapshot_until_the_next_run() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_extracts(input.path(), "worldbank_cpi.csv");
    let config = EconConfig::default();
    let stats_args = StatsArgs {
        data: output.path().to_path_buf(),
    };

    run_ingest_and_transform(&run_args(input.path(), output.path()), &config).unwrap();
    let cache = snapshot_cache(output.path(), &config.query);
    assert!(cache.current().is_none());

    run_stats(&stats_args, &config).unwrap();
    let first = cache.current().expect("snapshot cached");
    run_country(&country_args(output.path(), "MEX", false), &config).unwrap();
    let second = cache.current().expect("snapshot cached");
    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&cache, &snapshot_cache(output.path(), &config.query)));

    // a new run replaces the dataset, so the cached copy must go
    run_ingest_and_transform(&run_args(input.path(), output.path()), &config).unwrap();
    assert!(cache.current().is_none());
    assert_eq!(run_stats(&stats_args, &config).unwrap().records, 11);
}

#[test]
fn dry_run_writes_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_extracts(input.path(), "worldbank_cpi.csv");
    let mut args = run_args(input.path(), &output.path().join("out"));
    args.dry_run = true;

    let result = run_ingest_and_transform(&args, &EconConfig::default()).unwrap();
    assert!(result.written.is_none());
    assert_eq!(result.stats.records, 11);
    assert!(!output.path().join("out").exists());
}

#[test]
fn config_file_renames_extracts_and_sets_options() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_extracts(input.path(), "cpi_extract.csv");
    let config_path: PathBuf = input.path().join("econ.toml");
    fs::write(
        &config_path,
        "[pipeline]\n\
         min_wage_observations = 4\n\
         [sources]\n\
         worldbank = \"cpi_extract.csv\"\n",
    )
    .unwrap();
    let config = EconConfig::load(&config_path).unwrap();

    let result = run_ingest_and_transform(&run_args(input.path(), output.path()), &config).unwrap();
    // three wage years fall below the configured minimum of four
    assert_eq!(result.stats.records, 8);
    assert_eq!(result.report.pruned.len(), 1);
}

#[test]
fn unknown_country_is_an_error() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_extracts(input.path(), "worldbank_cpi.csv");
    let config = EconConfig::default();
    run_ingest_and_transform(&run_args(input.path(), output.path()), &config).unwrap();

    let err = run_country(&country_args(output.path(), "XYZ", false), &config).unwrap_err();
    assert!(err.to_string().contains("XYZ"));
}

#[test]
fn missing_input_directory_fails() {
    let output = TempDir::new().unwrap();
    let args = run_args(&output.path().join("absent"), output.path());
    assert!(run_ingest_and_transform(&args, &EconConfig::default()).is_err());
}
