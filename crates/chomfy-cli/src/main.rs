//! `chomfy`: run the prompt nodes from the command line.

use std::io::{self, IsTerminal};

use chomfy_cli::logging::{LogConfig, LogFormat, init_logging};
use chomfy_cli::settings::{Settings, load_settings};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputArg};
use crate::commands::{run_compose, run_count, run_line, run_next};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let loaded = load_settings(cli.config.as_deref());
    let log_config = log_config_from_cli(&cli, &loaded.settings);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    loaded.log();

    let exit_code = match run(&cli, &loaded.settings) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli, settings: &Settings) -> anyhow::Result<()> {
    let json = cli.output == OutputArg::Json;
    match &cli.command {
        Command::Next(args) => {
            let outputs = run_next(args)?;
            if json {
                summary::print_sequence_json(&outputs);
            } else {
                summary::print_sequence(&outputs);
            }
        }
        Command::Line(args) => {
            let output = run_line(args)?;
            if json {
                summary::print_line_json(&output);
            } else {
                summary::print_line(&output);
            }
        }
        Command::Count(args) => {
            let outputs = run_count(args);
            if json {
                summary::print_count_json(&outputs);
            } else {
                summary::print_count(&outputs);
            }
        }
        Command::Compose(args) => {
            let outputs = run_compose(args, &settings.composer)?;
            if json {
                summary::print_compose_json(&outputs);
            } else {
                summary::print_compose(&outputs);
            }
        }
    }
    Ok(())
}

/// Build logging configuration from CLI flags, falling back to settings.
fn log_config_from_cli(cli: &Cli, settings: &Settings) -> LogConfig {
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
        Some(LogFormatArg::Pretty) => LogFormat::Pretty,
        Some(LogFormatArg::Compact) => LogFormat::Compact,
        Some(LogFormatArg::Json) => LogFormat::Json,
        None => settings.logging.format,
    };
    config.log_file = cli
        .log_file
        .clone()
        .or_else(|| settings.logging.log_file.clone());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => config.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
