use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric error codes following SQLFED-XXXX format.
///
/// ## Code Ranges
/// - **2000-2999**: Conversion errors caused by the input segment tree
/// - **3000-3999**: Configuration errors
/// - **5000-5999**: Internal errors (converter set out of sync with the segment model)
///
/// Codes are stable across versions (semver contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
#[non_exhaustive]
pub enum ErrorCode {
    // === Conversion Errors (2000-2999) ===
    /// SQLFED-2001: Segment violates its structural contract
    MalformedSegment = 2001,
    /// SQLFED-2002: Operator text has no relational mapping
    UnsupportedOperator = 2002,
    /// SQLFED-2003: Clause present but produced no relational node
    EmptyClause = 2003,
    /// SQLFED-2004: Valid SQL outside the supported subset
    UnsupportedFeature = 2004,
    /// SQLFED-2005: Segment nesting exceeds the configured depth
    RecursionLimit = 2005,

    // === Configuration Errors (3000-3999) ===
    /// SQLFED-3001: Invalid YAML syntax
    InvalidYaml = 3001,
    /// SQLFED-3002: Configuration failed validation
    InvalidConfig = 3002,

    // === Internal Errors (5000-5999) ===
    /// SQLFED-5001: No converter registered for a segment variant
    UnsupportedSegment = 5001,
    /// SQLFED-5002: Registry entry wired to the wrong segment variant
    ConverterMismatch = 5002,
    /// SQLFED-5003: Serialization/deserialization failed
    SerializationFailed = 5003,
    /// SQLFED-5004: Unexpected internal state
    InternalPanic = 5004,

    /// SQLFED-9999: Unknown/unclassified error
    Unknown = 9999,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Get the formatted code string (e.g., "SQLFED-2001")
    pub fn as_str(&self) -> String {
        format!("SQLFED-{:04}", self.as_u16())
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self.as_u16() {
            2000..=2999 => ErrorCategory::Conversion,
            3000..=3999 => ErrorCategory::Config,
            _ => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> String {
        code.as_str()
    }
}

impl TryFrom<String> for ErrorCode {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        let num: u16 = s
            .strip_prefix("SQLFED-")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| "Invalid format".to_string())?;
        Self::try_from(num).map_err(|_| "Unknown code".to_string())
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(n: u16) -> std::result::Result<Self, Self::Error> {
        match n {
            2001 => Ok(Self::MalformedSegment),
            2002 => Ok(Self::UnsupportedOperator),
            2003 => Ok(Self::EmptyClause),
            2004 => Ok(Self::UnsupportedFeature),
            2005 => Ok(Self::RecursionLimit),
            3001 => Ok(Self::InvalidYaml),
            3002 => Ok(Self::InvalidConfig),
            5001 => Ok(Self::UnsupportedSegment),
            5002 => Ok(Self::ConverterMismatch),
            5003 => Ok(Self::SerializationFailed),
            5004 => Ok(Self::InternalPanic),
            9999 => Ok(Self::Unknown),
            _ => Err(format!("Unknown error code: {}", n)),
        }
    }
}

/// High-level error category used to decide how a session reports the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorCategory {
    Conversion,
    Config,
    Internal,
}
