pub mod analyze;
pub mod channels;
pub mod config;
pub mod demo;

use serde::Serialize;

use topshelf_core::config::{AppConfig, ConfigError};
use topshelf_core::PortfolioAnalyst;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    /// Successful command whose output is the rendered report itself.
    pub fn report(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Analyst built from effective configuration: validated weights plus the
/// configured level sizes.
pub(crate) fn portfolio_analyst(config: &AppConfig) -> Result<PortfolioAnalyst, ConfigError> {
    let weights = config.score_weights()?;
    Ok(PortfolioAnalyst::with_weights(weights).with_levels(
        config.ranking.principal_channels,
        config.ranking.top_subcategories,
        config.ranking.top_skus,
    ))
}
