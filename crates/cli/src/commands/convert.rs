//! `convert` command: JSON segment tree in, relational tree out.
//!
//! The input is a serde-encoded `Statement`, as produced by an upstream parser. The
//! relational tree is printed in one of three shapes:
//! - `display`: the single-line canonical form used in tests and logs
//! - `indent`: one relational operator per line
//! - `json`: the serde encoding of the tree

use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use serde::Serialize;
use sqlfed_common::AppConfig;
use sqlfed_error::{ErrorCode, SqlFedError};
use sqlfed_segment::Statement;
use sqlfed_sql::{RelNode, SqlFederationConverter};
use std::io::Read;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlanFormat {
    #[default]
    Display,
    Indent,
    Json,
}

#[derive(Serialize)]
struct ConvertReport {
    source: String,
    tables: Vec<String>,
    plan: serde_json::Value,
}

pub fn convert(
    file_path: &str,
    plan_format: PlanFormat,
    format: OutputFormat,
    config: &AppConfig,
) -> Result<()> {
    let statement = read_statement(file_path)?;
    let converter = SqlFederationConverter::new(config.compiler.clone());
    let node = converter.convert(&statement)?;
    tracing::info!(
        source = file_path,
        tables = ?node.scanned_tables(),
        "Converted statement"
    );

    if format.is_machine_readable() {
        let plan = match plan_format {
            PlanFormat::Json => serde_json::to_value(&node)?,
            _ => serde_json::Value::String(render_plan(&node, plan_format)?),
        };
        return output::print_success(
            format,
            ConvertReport {
                source: file_path.to_string(),
                tables: node.scanned_tables(),
                plan,
            },
        );
    }

    println!("{}", render_plan(&node, plan_format)?);
    Ok(())
}

/// Read a JSON `Statement` from a file, or from stdin when the path is `-`.
pub(crate) fn read_statement(file_path: &str) -> Result<Statement> {
    let text = if file_path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read statement from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read statement file '{}'", file_path))?
    };
    parse_statement(&text)
}

pub(crate) fn parse_statement(text: &str) -> Result<Statement> {
    serde_json::from_str(text).map_err(|e| {
        SqlFedError::new(
            ErrorCode::SerializationFailed,
            format!("Invalid statement JSON: {}", e),
        )
        .with_hint("Input must be a serde-encoded Statement, e.g. {\"type\": \"Select\", ...}")
        .into()
    })
}

pub(crate) fn render_plan(node: &RelNode, plan_format: PlanFormat) -> Result<String> {
    Ok(match plan_format {
        PlanFormat::Display => node.to_string(),
        PlanFormat::Indent => node.display_indent().trim_end().to_string(),
        PlanFormat::Json => serde_json::to_string_pretty(node)?,
    })
}
