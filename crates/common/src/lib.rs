//! Configuration and observability shared across sqlfed crates.
//!
//! - **Configuration**: strongly typed compiler and logging settings (`config`).
//! - **Telemetry**: `tracing` subscriber setup (`telemetry`).
pub mod config;
pub mod telemetry;

pub use config::{AppConfig, CompilerConfig, LoggingConfig};
