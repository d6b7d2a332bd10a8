//! Configuration types.
//!
//! Everything is read once from the environment at start-up and then passed
//! down explicitly; nothing below `main` looks at environment variables.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::generation::gemini::DEFAULT_BASE_URL;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_PDF_COMMAND: &str = "wkhtmltopdf";

/// Settings for the plan generator.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Service credential. Absence is reported when a plan is requested,
    /// not at start-up.
    pub api_key: Option<SecretString>,
    pub model: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Settings for the PDF exporter.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// HTML-to-PDF converter program.
    pub command: String,
    /// Directory the PDF is written to.
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_PDF_COMMAND.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub gemini_base_url: String,
    pub export: ExportConfig,
    /// When set, logs go to a daily file in this directory instead of stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            export: ExportConfig::default(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let api_key = get("GEMINI_API_KEY")
            .or_else(|| get("API_KEY"))
            .map(SecretString::from);

        let gemini_base_url = match get("NUTRIPLAN_GEMINI_BASE_URL") {
            Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                return Err(ConfigError::InvalidValue {
                    key: "NUTRIPLAN_GEMINI_BASE_URL".to_string(),
                    message: format!("'{}' is not an http(s) URL", url),
                });
            }
            Some(url) => url,
            None => defaults.gemini_base_url,
        };

        Ok(Self {
            generation: GenerationConfig {
                api_key,
                model: get("NUTRIPLAN_MODEL").unwrap_or(defaults.generation.model),
            },
            gemini_base_url,
            export: ExportConfig {
                command: get("NUTRIPLAN_PDF_COMMAND").unwrap_or(defaults.export.command),
                output_dir: get("NUTRIPLAN_EXPORT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.export.output_dir),
            },
            log_dir: get("NUTRIPLAN_LOG_DIR").map(PathBuf::from),
        })
    }

    /// Create the log directory, if one is configured.
    pub fn prepare_log_dir(&self) -> Result<Option<&Path>, ConfigError> {
        match &self.log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                Ok(Some(dir.as_path()))
            }
            None => Ok(None),
        }
    }
}
