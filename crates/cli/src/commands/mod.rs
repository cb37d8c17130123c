//! CLI command implementations.

mod check_config;
mod convert;

pub use check_config::{check_config, load_config};
pub use convert::{convert, PlanFormat};
