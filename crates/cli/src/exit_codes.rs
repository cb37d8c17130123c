//! Structured exit codes for machine-readable error handling.
//!
//! These codes let scripts distinguish a bad statement from a bad setup.

/// Success (standard convention)
#[allow(dead_code)]
pub const SUCCESS: i32 = 0;

/// General error, including internal compiler defects
pub const GENERAL_ERROR: i32 = 1;

/// CLI usage error (unreadable input file, bad arguments)
pub const USAGE_ERROR: i32 = 2;

/// Configuration error (YAML parse failure, failed validation)
pub const CONFIG_ERROR: i32 = 3;

/// The statement could not be converted (malformed or unsupported input)
pub const CONVERSION_ERROR: i32 = 5;
