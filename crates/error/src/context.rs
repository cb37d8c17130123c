//! # Error Contexts
//!
//! Structured metadata attached to errors so sessions can point at the offending segment.

use serde::{Deserialize, Serialize};

/// Structured context for sqlfed errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorContext {
    /// Context for segment-level failures (SQLFED-2001, 2003, 2004, 5001, 5002)
    Segment {
        /// Segment kind name, e.g. `SubqueryTable`
        kind: String,
        start: usize,
        stop: usize,
        /// Segment kinds from the statement root down to the failing segment
        path: Vec<String>,
    },

    /// Context for SQLFED-2002 (UnsupportedOperator)
    Operator {
        operator: String,
        expression: String,
        supported: Vec<String>,
    },

    /// Context for SQLFED-2005 (RecursionLimit)
    Recursion { limit: usize },

    /// Context for SQLFED-3001/3002 (config errors)
    Config {
        file_path: Option<String>,
        field: Option<String>,
    },

    /// Generic key-value context for extensibility
    Generic {
        #[serde(flatten)]
        data: std::collections::HashMap<String, serde_json::Value>,
    },
}
