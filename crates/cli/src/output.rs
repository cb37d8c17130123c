//! Structured output handling for CLI commands.

use serde::Serialize;

#[derive(clap::ValueEnum, Clone, Debug, Default, PartialEq, Eq, Copy)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Returns true if the output format is intended for machine consumption
    pub fn is_machine_readable(&self) -> bool {
        match self {
            OutputFormat::Human => false,
            OutputFormat::Json | OutputFormat::Yaml => true,
        }
    }
}

/// Envelope for machine-readable responses.
#[derive(Serialize)]
pub struct CommandResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> CommandResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            exit_code: Some(0),
            data,
        }
    }

    pub fn error(exit_code: i32, data: T) -> Self {
        Self {
            status: "error".to_string(),
            exit_code: Some(exit_code),
            data,
        }
    }
}

/// Render a response in the requested machine format. Human output is printed by each command.
pub fn render<T: Serialize>(format: OutputFormat, data: &T) -> anyhow::Result<Option<String>> {
    match format {
        OutputFormat::Human => Ok(None),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(data)?)),
        OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(data)?)),
    }
}

/// Print a structured success response for machine outputs
pub fn print_success<T: Serialize>(format: OutputFormat, data: T) -> anyhow::Result<()> {
    if let Some(text) = render(format, &CommandResponse::success(data))? {
        println!("{}", text);
    }
    Ok(())
}

/// Print a structured error response for machine outputs.
pub fn print_error<T: Serialize>(format: OutputFormat, exit_code: i32, data: T) -> anyhow::Result<()> {
    if let Some(text) = render(format, &CommandResponse::error(exit_code, data))? {
        eprintln!("{}", text);
    }
    Ok(())
}
