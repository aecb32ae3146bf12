//! Application configuration module.
//!
//! Configuration is loaded from a JSON file. When the default file is
//! absent, built-in defaults are used.

use super::error::ConfigError;
use crate::inference::tesseract;
use crate::paper::export::DEFAULT_TITLE;
use crate::paper::QuestionCount;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/app_config.json";

/// Global configuration instance
static CONFIG_INSTANCE: OnceCell<AppConfig> = OnceCell::new();

/// Application configuration structure.
///
/// String fields use `Box<str>` since they are set once and never modified.
/// Every field has a default, so a partial file is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum allowed upload size in bytes
    pub max_file_size: u64,

    /// Address the HTTP server binds to
    pub host_url: Box<str>,

    /// Assumed paper size used when a request does not specify one
    pub default_question_count: usize,

    /// Executable used for image OCR
    pub tesseract_command: Box<str>,

    /// Tesseract language code (e.g. "eng")
    pub ocr_language: Box<str>,

    /// Title line written at the top of exported papers
    pub export_title: Box<str>,
}

impl AppConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or if
    /// `default_question_count` is outside `1..=10`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `config/app_config.json`, falling back to
    /// defaults when the file does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            tracing::debug!("{} not found, using default configuration", DEFAULT_CONFIG_PATH);
            Ok(Self::default())
        }
    }

    /// Initialize the global configuration instance.
    ///
    /// This should be called once at application startup.
    pub fn init() -> Result<&'static Self, ConfigError> {
        CONFIG_INSTANCE.get_or_try_init(Self::load_default)
    }

    /// Initialize the global configuration from an explicit file.
    pub fn init_from<P: AsRef<Path>>(path: P) -> Result<&'static Self, ConfigError> {
        CONFIG_INSTANCE.get_or_try_init(|| Self::from_file(path))
    }

    /// Create a new configuration with default values.
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024, // 50 MB
            host_url: "0.0.0.0:3000".into(),
            default_question_count: QuestionCount::DEFAULT,
            tesseract_command: tesseract::DEFAULT_COMMAND.into(),
            ocr_language: tesseract::DEFAULT_LANGUAGE.into(),
            export_title: DEFAULT_TITLE.into(),
        }
    }

    /// The configured default paper size as a validated count.
    pub fn default_question_count(&self) -> Result<QuestionCount, ConfigError> {
        QuestionCount::new(self.default_question_count).map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.default_question_count()?;
        if self.max_file_size == 0 {
            return Err(ConfigError::Invalid {
                message: "max_file_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
