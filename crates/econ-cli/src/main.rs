//! Economic indicators pipeline CLI.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use econ_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use econ_cli::commands::{run_compare, run_countries, run_country, run_ingest_and_transform, run_stats};
use econ_cli::config::EconConfig;
use econ_cli::logging::{LogConfig, LogFormat, init_logging};
use econ_cli::summary::{print_comparison_view, print_country_view, print_run_summary, print_stats};
use econ_standards::StandardsRegistry;
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let config = EconConfig::load_or_default(cli.config.as_deref())?;
    match &cli.command {
        Command::Run(args) => {
            let result = run_ingest_and_transform(args, &config)?;
            print_run_summary(&result);
        }
        Command::Country(args) => {
            let view = run_country(args, &config)?;
            let standards = StandardsRegistry::shared().context("load reference tables")?;
            print_country_view(&view, &standards.countries);
        }
        Command::Compare(args) => {
            let view = run_compare(args, &config)?;
            let standards = StandardsRegistry::shared().context("load reference tables")?;
            print_comparison_view(&view, &standards.countries);
        }
        Command::Stats(args) => {
            let stats = run_stats(args, &config)?;
            print_stats(&stats);
        }
        Command::Countries => run_countries()?,
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level_filter(cli.verbosity.tracing_level_filter());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
