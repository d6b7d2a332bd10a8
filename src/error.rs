//! Error types for NutriPlan.

use reqwest::StatusCode;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a single plan generation attempt.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The credential for the generation service is missing. Raised before
    /// any network activity.
    #[error("Generation service is not configured: {0}")]
    Configuration(String),

    #[error("Transport to {provider} failed: {reason}")]
    Transport {
        provider: String,
        status: Option<StatusCode>,
        reason: String,
    },

    #[error("Generation service returned no text")]
    EmptyResponse,

    #[error("Generation service returned a malformed plan: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// PDF export errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("PDF export capability is not available")]
    Unavailable,

    #[error("Exporter {exporter} failed: {reason}")]
    Failed { exporter: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Quiz errors.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("Profile is incomplete, invalid fields: {}", .fields.join(", "))]
    IncompleteProfile { fields: Vec<String> },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
