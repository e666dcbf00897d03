use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use comfy_table::Table;
use econ_compare::{
    ComparisonQuery, ComparisonView, CountryQuery, CountryView, DatasetStats, Snapshot,
    SnapshotCache, ValueBasis, YearRange, compare_countries, country_view,
};
use econ_ingest::load_raw_batch;
use econ_model::{CountryCode, IndicatorType, PipelineOptions, QueryOptions};
use econ_output::{read_dataset, write_run};
use econ_standards::{CountryRegistry, StandardsRegistry};
use econ_transform::run_pipeline;
use tracing::{info, info_span};

use crate::cli::{CompareArgs, CountryArgs, RunArgs, StatsArgs};
use crate::config::EconConfig;
use crate::summary::apply_table_style;
use crate::types::RunResult;

pub fn run_countries() -> Result<()> {
    let standards = StandardsRegistry::shared().context("load reference tables")?;
    let mut table = Table::new();
    table.set_header(vec!["Code", "Name", "Alpha-2", "Numeric"]);
    apply_table_style(&mut table);
    for record in standards.countries.iter() {
        table.add_row(vec![
            record.code.to_string(),
            record.name.clone(),
            record.alpha2.clone().unwrap_or_else(|| "-".to_string()),
            record
                .numeric
                .map_or_else(|| "-".to_string(), |n| format!("{n:03}")),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Applies command-line overrides on top of the configured options.
pub fn pipeline_options(args: &RunArgs, config: &EconConfig) -> PipelineOptions {
    let mut options = config.pipeline.clone();
    if let Some(year) = args.reference_year {
        options = options.with_reference_year(year);
    }
    if let Some(min) = args.min_wage_observations {
        options = options.with_min_wage_observations(min);
    }
    if let Some(precedence) = args.wage_precedence {
        options = options.with_wage_source_precedence(precedence.into());
    }
    options
}

pub fn run_ingest_and_transform(args: &RunArgs, config: &EconConfig) -> Result<RunResult> {
    let span = info_span!("run", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    if !args.input.is_dir() {
        bail!("input directory not found: {}", args.input.display());
    }

    // =========================================================================
    // Stage 0: Reference tables and options
    // =========================================================================
    let standards = StandardsRegistry::shared().context("load reference tables")?;
    let options = pipeline_options(args, config);

    // =========================================================================
    // Stage 1: Ingest
    // =========================================================================
    let batch = load_raw_batch(&args.input, &config.sources);
    if batch.observations.is_empty() {
        bail!(
            "no observations found in {} (sources unavailable: {})",
            args.input.display(),
            batch.report.unavailable_sources().len()
        );
    }

    // =========================================================================
    // Stage 2: Transform
    // =========================================================================
    let ingested_at = Utc::now();
    let output =
        run_pipeline(standards, &options, batch, ingested_at).context("transform observations")?;

    // =========================================================================
    // Stage 3: Write
    // =========================================================================
    let written = if args.dry_run {
        None
    } else {
        let run = write_run(
            &args.output,
            &output.observations,
            &output.report,
            &options,
            ingested_at,
        )
        .with_context(|| format!("write dataset to {}", args.output.display()))?;
        snapshot_cache(&args.output, &config.query).invalidate();
        Some(run)
    };
    let stats = match &written {
        Some(run) => run.stats.clone(),
        None => DatasetStats::compute(&output.observations),
    };

    info!(
        records = stats.records,
        countries = stats.countries,
        dry_run = args.dry_run,
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );

    Ok(RunResult {
        input: args.input.clone(),
        reference_year: options.reference_year,
        stats,
        report: output.report,
        written,
    })
}

pub fn run_country(args: &CountryArgs, config: &EconConfig) -> Result<CountryView> {
    let standards = StandardsRegistry::shared().context("load reference tables")?;
    let country = resolve_country(&standards.countries, &args.country)?;
    let snapshot = load_snapshot(&args.data, config)?;

    let indicators = if args.indicators.is_empty() {
        IndicatorType::ALL.to_vec()
    } else {
        args.indicators.clone()
    };
    let query = CountryQuery::new(country)
        .with_indicators(indicators)
        .with_years(YearRange::new(args.from, args.to))
        .with_basis(ValueBasis::from_usd_flag(args.usd));
    country_view(&snapshot, &query).context("build country view")
}

pub fn run_compare(args: &CompareArgs, config: &EconConfig) -> Result<ComparisonView> {
    let standards = StandardsRegistry::shared().context("load reference tables")?;
    let countries = args
        .countries
        .iter()
        .map(|raw| resolve_country(&standards.countries, raw))
        .collect::<Result<Vec<_>>>()?;
    let snapshot = load_snapshot(&args.data, config)?;

    let query = ComparisonQuery::new(args.indicator, countries)
        .with_years(YearRange::new(args.from, args.to))
        .with_basis(ValueBasis::from_usd_flag(args.usd));
    compare_countries(&snapshot, &query, &config.query).context("build comparison")
}

pub fn run_stats(args: &StatsArgs, config: &EconConfig) -> Result<DatasetStats> {
    let snapshot = load_snapshot(&args.data, config)?;
    Ok(DatasetStats::compute(snapshot.observations()))
}

/// Accepts any code space the registry knows.
pub fn resolve_country(countries: &CountryRegistry, raw: &str) -> Result<CountryCode> {
    countries
        .lookup(raw)
        .ok_or_else(|| anyhow!("unknown country code: {raw}"))
}

/// The snapshot cache for one dataset directory.
///
/// Caches live for the whole process. The TTL comes from the options of the
/// first query against `dir`.
pub fn snapshot_cache(dir: &Path, options: &QueryOptions) -> Arc<SnapshotCache> {
    static CACHES: OnceLock<Mutex<BTreeMap<PathBuf, Arc<SnapshotCache>>>> = OnceLock::new();
    let mut caches = CACHES
        .get_or_init(Mutex::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(
        caches
            .entry(dir.to_path_buf())
            .or_insert_with(|| Arc::new(SnapshotCache::from_options(options))),
    )
}

fn load_snapshot(dir: &Path, config: &EconConfig) -> Result<Arc<Snapshot>> {
    snapshot_cache(dir, &config.query)
        .get_or_refresh(|| read_dataset(dir))
        .with_context(|| format!("read dataset from {}", dir.display()))
}
