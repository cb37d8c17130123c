//! # sqlfed-error
//!
//! Unified error types for the sqlfed federation compiler.
//!
//! Every error surfaced to a compiling session carries a stable code (`SQLFED-XXXX`),
//! optional structured context pointing at the offending segment, and a hint.
//! Callers branch on [`ErrorCategory`]: conversion errors blame the statement,
//! configuration errors blame the setup, internal errors blame the compiler.

mod code;
mod context;
mod convert;

pub use code::{ErrorCategory, ErrorCode};
pub use context::ErrorContext;
pub use convert::find_closest_match;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlFedError {
    pub code: ErrorCode,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    /// Correlation ID of the compiling session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl SqlFedError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            hint: None,
            trace_id: None,
        }
    }

    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Attach a [`ErrorContext::Segment`] locating the failure in the source text.
    ///
    /// `path` lists segment kinds from the statement root down to the failing segment;
    /// it is empty when the failure was raised without dispatch history.
    pub fn with_segment(
        self,
        kind: impl Into<String>,
        start: usize,
        stop: usize,
        path: Vec<String>,
    ) -> Self {
        self.with_context(ErrorContext::Segment {
            kind: kind.into(),
            start,
            stop,
            path,
        })
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Whether this error reports a defect in the compiler itself rather than in its input.
    pub fn is_internal(&self) -> bool {
        self.category() == ErrorCategory::Internal
    }

    /// Segment kinds from the root to the failing segment, when the context records them.
    pub fn segment_path(&self) -> Option<&[String]> {
        match &self.context {
            Some(ErrorContext::Segment { path, .. }) if !path.is_empty() => Some(path),
            _ => None,
        }
    }

    /// Inclusive offsets of the offending segment in the source SQL text.
    pub fn source_range(&self) -> Option<std::ops::RangeInclusive<usize>> {
        match &self.context {
            Some(ErrorContext::Segment { start, stop, .. }) => Some(*start..=*stop),
            _ => None,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::warn!("Failed to serialize SqlFedError: {}", e);
            format!(
                r#"{{"code":"{}","message":"Serialization failed"}}"#,
                self.code
            )
        })
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}

impl fmt::Display for SqlFedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(path) = self.segment_path() {
            write!(f, " at {}", path.join(" > "))?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " (Hint: {})", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for SqlFedError {}

pub type Result<T> = std::result::Result<T, SqlFedError>;
