//! sqlfed CLI: compile serialized SQL segment trees into relational algebra.
//!
//! # Commands
//!
//! - `convert`: Read a JSON `Statement` and print the relational tree.
//! - `check-config`: Load and validate `sqlfed.yaml` plus `SQLFED__*` overrides.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use validator::Validate;

mod commands;
mod exit_codes;
mod output;

use commands::PlanFormat;
use output::OutputFormat;
use sqlfed_common::{telemetry, AppConfig};
use sqlfed_error::{ErrorCategory, ErrorCode, SqlFedError};

#[derive(Parser)]
#[command(name = "sqlfed")]
#[command(about = "Convert SQL segment trees into relational algebra", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (human, json, yaml)
    #[arg(long, global = true, value_enum, default_value = "human")]
    output: OutputFormat,

    /// Path to the configuration file
    #[arg(long, global = true, env = "SQLFED_CONFIG", default_value = "sqlfed.yaml")]
    config: String,

    /// Log level override (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON-serialized statement into a relational tree
    Convert {
        /// Path to the statement JSON, or `-` for stdin
        file: String,
        /// How to print the relational tree
        #[arg(long, value_enum, default_value = "display")]
        format: PlanFormat,
    },
    /// Load and validate the configuration
    CheckConfig,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_cli(&cli) {
        let exit_code = map_error_to_exit_code(&e);
        let report = to_report(&e);
        if cli.output.is_machine_readable() {
            output::print_error(cli.output, exit_code, &report).ok();
        } else {
            eprintln!("{} {}", "Error:".red().bold(), report);
            eprintln!("{}", report.to_json_pretty());
        }
        std::process::exit(exit_code);
    }
}

fn run_cli(cli: &Cli) -> anyhow::Result<()> {
    let config = effective_config(cli)?;
    telemetry::init_tracing(&config.logging)?;

    match &cli.command {
        Commands::Convert { file, format } => {
            commands::convert(file, *format, cli.output, &config)?;
        }
        Commands::CheckConfig => {
            commands::check_config(&cli.config, cli.output, &config)?;
        }
    }
    Ok(())
}

fn effective_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = commands::load_config(&cli.config)?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
        config.logging.validate().map_err(|e| {
            SqlFedError::new(
                ErrorCode::InvalidConfig,
                format!("Invalid --log-level '{}': {}", level, e),
            )
            .with_hint("Use one of trace, debug, info, warn, error, off")
        })?;
    }
    Ok(config)
}

fn map_error_to_exit_code(e: &anyhow::Error) -> i32 {
    if let Some(err) = e.downcast_ref::<SqlFedError>() {
        if err.code == ErrorCode::SerializationFailed {
            return exit_codes::USAGE_ERROR;
        }
        return match err.code.category() {
            ErrorCategory::Conversion => exit_codes::CONVERSION_ERROR,
            ErrorCategory::Config => exit_codes::CONFIG_ERROR,
            ErrorCategory::Internal => exit_codes::GENERAL_ERROR,
            _ => exit_codes::GENERAL_ERROR,
        };
    }
    if e.downcast_ref::<std::io::Error>().is_some() {
        return exit_codes::USAGE_ERROR;
    }
    exit_codes::GENERAL_ERROR
}

/// Every failure leaves the process as a `SqlFedError` so stderr always carries a code.
fn to_report(e: &anyhow::Error) -> SqlFedError {
    match e.downcast_ref::<SqlFedError>() {
        Some(err) => err.clone(),
        None => SqlFedError::new(ErrorCode::Unknown, format!("{:#}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_cli_parses_convert() {
        let cli = Cli::try_parse_from([
            "sqlfed",
            "--output",
            "json",
            "convert",
            "stmt.json",
            "--format",
            "indent",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Convert { file, format } => {
                assert_eq!(file, "stmt.json");
                assert_eq!(format, PlanFormat::Indent);
            }
            Commands::CheckConfig => panic!("expected convert"),
        }
    }

    #[test]
    fn test_cli_requires_a_command() {
        assert!(Cli::try_parse_from(["sqlfed"]).is_err());
    }

    #[test]
    fn test_exit_codes_follow_error_category() {
        let conversion = anyhow::Error::from(SqlFedError::new(ErrorCode::EmptyClause, "x"));
        assert_eq!(map_error_to_exit_code(&conversion), exit_codes::CONVERSION_ERROR);

        let config = anyhow::Error::from(SqlFedError::new(ErrorCode::InvalidConfig, "x"));
        assert_eq!(map_error_to_exit_code(&config), exit_codes::CONFIG_ERROR);

        let internal = anyhow::Error::from(SqlFedError::new(ErrorCode::UnsupportedSegment, "x"));
        assert_eq!(map_error_to_exit_code(&internal), exit_codes::GENERAL_ERROR);

        let bad_json = anyhow::Error::from(SqlFedError::new(ErrorCode::SerializationFailed, "x"));
        assert_eq!(map_error_to_exit_code(&bad_json), exit_codes::USAGE_ERROR);
    }

    #[test]
    fn test_io_errors_are_usage_errors() {
        let err: anyhow::Result<()> = Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
            .context("Failed to read statement file 'x.json'");
        let err = err.unwrap_err();
        assert_eq!(map_error_to_exit_code(&err), exit_codes::USAGE_ERROR);

        let report = to_report(&err);
        assert_eq!(report.code, ErrorCode::Unknown);
        assert!(report.message.contains("x.json"));
        assert!(report.message.contains("gone"));
    }

    #[test]
    fn test_invalid_log_level_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        let cli = Cli::try_parse_from([
            "sqlfed",
            "--config",
            missing.to_str().unwrap(),
            "--log-level",
            "loud",
            "check-config",
        ])
        .unwrap();
        let err = effective_config(&cli).unwrap_err();
        assert_eq!(map_error_to_exit_code(&err), exit_codes::CONFIG_ERROR);
    }
}
