//! Asset Import Studio CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use ais_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    load_catalog, run_convert, run_encoding, run_process, run_template, run_validate,
    run_validate_dir,
};
use crate::summary::{print_batch_summary, print_validation_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Command::Process(args) => {
            let catalog = load_catalog(cli.mapping.as_deref())?;
            let report = run_process(&catalog, args)?;
            print_batch_summary(&report);
            print_validation_summary(&report.validation);
            Ok(if report.has_failures() { 1 } else { 0 })
        }
        Command::ValidateDir { dir } => {
            let summary = run_validate_dir(dir)?;
            Ok(if summary.invalid() > 0 { 1 } else { 0 })
        }
        Command::Convert {
            input,
            output,
            asset_type,
        } => {
            let catalog = load_catalog(cli.mapping.as_deref())?;
            let valid = run_convert(&catalog, input, output, (*asset_type).into())?;
            Ok(if valid { 0 } else { 1 })
        }
        Command::Validate { input } => Ok(if run_validate(input)? { 0 } else { 1 }),
        Command::Template { asset_type, output } => {
            let catalog = load_catalog(cli.mapping.as_deref())?;
            run_template(&catalog, (*asset_type).into(), output)?;
            Ok(0)
        }
        Command::Encoding(command) => {
            run_encoding(command)?;
            Ok(0)
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
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
