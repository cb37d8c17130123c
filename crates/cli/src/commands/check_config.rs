//! `check-config` command: load, validate and echo the effective configuration.

use crate::output::{self, OutputFormat};
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use sqlfed_common::AppConfig;
use sqlfed_error::{ErrorCode, ErrorContext, SqlFedError};
use std::path::Path;

#[derive(Serialize)]
struct ConfigReport<'a> {
    config_file: &'a str,
    found: bool,
    max_depth: usize,
    derive_anonymous_aliases: bool,
    anonymous_alias_prefix: &'a str,
    log_level: &'a str,
    log_json: bool,
}

/// Load the configuration file (plus `SQLFED__*` overrides), reporting failures as config errors.
pub fn load_config(path: &str) -> Result<AppConfig, SqlFedError> {
    AppConfig::from_file(path).map_err(|e| {
        SqlFedError::new(ErrorCode::InvalidConfig, format!("{:#}", e))
            .with_context(ErrorContext::Config {
                file_path: Some(path.to_string()),
                field: None,
            })
            .with_hint("Check the configuration file and SQLFED__* environment overrides")
    })
}

pub fn check_config(path: &str, format: OutputFormat, config: &AppConfig) -> Result<()> {
    let found = Path::new(path).exists();

    if format.is_machine_readable() {
        return output::print_success(
            format,
            ConfigReport {
                config_file: path,
                found,
                max_depth: config.compiler.max_depth,
                derive_anonymous_aliases: config.compiler.derive_anonymous_aliases,
                anonymous_alias_prefix: &config.compiler.anonymous_alias_prefix,
                log_level: &config.logging.level,
                log_json: config.logging.json,
            },
        );
    }

    println!(
        "{} {} {}",
        "[Config:".dimmed(),
        path.yellow(),
        "]".dimmed()
    );
    if !found {
        println!("{}", "File not found, using defaults and environment.".dimmed());
    }
    println!("{}", "Configuration is valid.".green().bold());
    println!("  compiler.max_depth: {}", config.compiler.max_depth);
    println!(
        "  compiler.derive_anonymous_aliases: {}",
        config.compiler.derive_anonymous_aliases
    );
    println!(
        "  compiler.anonymous_alias_prefix: {}",
        config.compiler.anonymous_alias_prefix
    );
    println!("  logging.level: {}", config.logging.level);
    println!("  logging.json: {}", config.logging.json);
    Ok(())
}
