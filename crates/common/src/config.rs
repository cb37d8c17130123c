use anyhow::{Context, Result};
use serde::Deserialize;
use validator::Validate;

// Default constants
pub const DEFAULT_MAX_DEPTH: usize = 128;
pub const DEFAULT_DERIVE_ANONYMOUS_ALIASES: bool = true;
pub const DEFAULT_ANONYMOUS_ALIAS_PREFIX: &str = "EXPR$";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;

pub const ENV_PREFIX: &str = "SQLFED";

#[derive(Debug, Deserialize, Default, Clone, Validate)]
pub struct AppConfig {
    #[serde(default)]
    #[validate(nested)]
    pub compiler: CompilerConfig,
    #[serde(default)]
    #[validate(nested)]
    pub logging: LoggingConfig,
}

/// Knobs for segment → relational conversion.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Validate)]
pub struct CompilerConfig {
    /// Maximum nesting of segment conversions before the statement is rejected.
    #[serde(default = "default_max_depth")]
    #[validate(range(min = 1, max = 4096))]
    pub max_depth: usize,

    /// Wrap unaliased expression projections as `AS(expr, <prefix><ordinal>)`.
    #[serde(default = "default_derive_anonymous_aliases")]
    pub derive_anonymous_aliases: bool,

    #[serde(default = "default_anonymous_alias_prefix")]
    #[validate(length(min = 1, max = 32))]
    pub anonymous_alias_prefix: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            derive_anonymous_aliases: default_derive_anonymous_aliases(),
            anonymous_alias_prefix: default_anonymous_alias_prefix(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_derive_anonymous_aliases() -> bool {
    DEFAULT_DERIVE_ANONYMOUS_ALIASES
}

fn default_anonymous_alias_prefix() -> String {
    DEFAULT_ANONYMOUS_ALIAS_PREFIX.to_string()
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    #[validate(custom(function = "validate_log_level"))]
    pub level: String,

    #[serde(default = "default_log_json")]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_log_json(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_log_json() -> bool {
    DEFAULT_LOG_JSON
}

fn validate_log_level(level: &str) -> Result<(), validator::ValidationError> {
    match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_log_level")),
    }
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let builder = config::Config::builder();

        let builder = if std::path::Path::new(path).exists() {
            builder.add_source(config::File::with_name(path))
        } else {
            tracing::debug!(path, "Configuration file not found, using defaults");
            builder
        };

        // Map SQLFED__COMPILER__MAX_DEPTH to compiler.max_depth, etc.
        let builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build().context("Failed to build configuration")?;

        let app_config: AppConfig = cfg
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config
            .validate()
            .map_err(|e| anyhow::anyhow!("Configuration validation failed: {:?}", e))?;

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_app_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.compiler.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.compiler.anonymous_alias_prefix, "EXPR$");
    }

    #[test]
    fn test_compiler_config_rejects_zero_depth() {
        let config = CompilerConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_compiler_config_rejects_empty_prefix() {
        let config = CompilerConfig {
            anonymous_alias_prefix: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LoggingConfig {
            level: "DEBUG".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_reads_yaml() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("tempfile");
        writeln!(
            file,
            "compiler:\n  max_depth: 16\n  derive_anonymous_aliases: false\nlogging:\n  level: debug"
        )
        .expect("write config");

        let path = file.path().to_str().expect("utf8 path");
        let config = AppConfig::from_file(path).expect("load config");
        assert_eq!(config.compiler.max_depth, 16);
        assert!(!config.compiler.derive_anonymous_aliases);
        assert_eq!(config.compiler.anonymous_alias_prefix, "EXPR$");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_from_file_missing_uses_defaults() {
        let config = AppConfig::from_file("/nonexistent/sqlfed.yaml").expect("defaults");
        assert_eq!(config.compiler, CompilerConfig::default());
    }
}
