//! CLI argument definitions for the `econ` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use econ_model::{IndicatorType, SourcePrecedence};

#[derive(Parser)]
#[command(
    name = "econ",
    version,
    about = "Economic indicators pipeline - normalize, rebase and compare country series",
    long_about = "Normalize CPI, food CPI, housing price and wage extracts into one canonical\n\
                  dataset keyed by (country, year, indicator), then compare series on a\n\
                  shared base year.\n\n\
                  Extracts are read from pre-collected CSV files; nothing is fetched."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// TOML configuration file with [pipeline], [query] and [sources] tables.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize source extracts and write the canonical dataset.
    Run(RunArgs),

    /// Index one country's indicators to a shared base year.
    Country(CountryArgs),

    /// Index one indicator across countries to a shared base year.
    Compare(CompareArgs),

    /// Show record and coverage counts of a written dataset.
    Stats(StatsArgs),

    /// List the country registry.
    Countries,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory holding the source extracts.
    #[arg(long = "input", value_name = "DIR")]
    pub input: PathBuf,

    /// Directory receiving observations.csv and manifest.json.
    #[arg(long = "output", value_name = "DIR")]
    pub output: PathBuf,

    /// Year every persisted series is rebased to (overrides the config file).
    #[arg(long = "reference-year", value_name = "YEAR")]
    pub reference_year: Option<i32>,

    /// Minimum observations a wage series needs to be kept.
    #[arg(long = "min-wage-observations", value_name = "N")]
    pub min_wage_observations: Option<usize>,

    /// How overlapping wage series combine at one key.
    #[arg(long = "wage-precedence", value_enum)]
    pub wage_precedence: Option<PrecedenceArg>,

    /// Run every stage and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CountryArgs {
    /// Directory holding a written dataset.
    #[arg(long = "data", value_name = "DIR")]
    pub data: PathBuf,

    /// Country code (alpha-3, alpha-2 or numeric).
    #[arg(long = "country", value_name = "CODE")]
    pub country: String,

    /// First visible year.
    #[arg(long = "from", value_name = "YEAR")]
    pub from: Option<i32>,

    /// Last visible year.
    #[arg(long = "to", value_name = "YEAR")]
    pub to: Option<i32>,

    /// Indicators to include (default: all). Repeat for several.
    #[arg(long = "indicator", value_name = "INDICATOR")]
    pub indicators: Vec<IndicatorType>,

    /// Use USD equivalents; rows without an exchange rate are left out.
    #[arg(long = "usd")]
    pub usd: bool,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Directory holding a written dataset.
    #[arg(long = "data", value_name = "DIR")]
    pub data: PathBuf,

    /// Indicator to compare.
    #[arg(long = "indicator", value_name = "INDICATOR")]
    pub indicator: IndicatorType,

    /// Countries to compare. Repeat for several.
    #[arg(long = "country", value_name = "CODE", required = true)]
    pub countries: Vec<String>,

    /// First visible year.
    #[arg(long = "from", value_name = "YEAR")]
    pub from: Option<i32>,

    /// Last visible year.
    #[arg(long = "to", value_name = "YEAR")]
    pub to: Option<i32>,

    /// Use USD equivalents; rows without an exchange rate are left out.
    #[arg(long = "usd")]
    pub usd: bool,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Directory holding a written dataset.
    #[arg(long = "data", value_name = "DIR")]
    pub data: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PrecedenceArg {
    Average,
    PreferPrimary,
}

impl From<PrecedenceArg> for SourcePrecedence {
    fn from(arg: PrecedenceArg) -> Self {
        match arg {
            PrecedenceArg::Average => SourcePrecedence::Average,
            PrecedenceArg::PreferPrimary => SourcePrecedence::PreferPrimary,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
