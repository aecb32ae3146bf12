//! Text recognition through the external `tesseract` executable.
//!
//! The page image is written to a temporary PNG and tesseract is asked to
//! print the recognised text to stdout.

use std::io::ErrorKind;
use std::process::Command;

use image::{ImageFormat, RgbImage};
use tracing::{debug, instrument};

use super::error::InferenceError;
use super::TextRecognizer;
use crate::utils::config::AppConfig;

pub const DEFAULT_COMMAND: &str = "tesseract";
pub const DEFAULT_LANGUAGE: &str = "eng";

#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    command: String,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    /// Builds a recognizer from the `tesseract_command` and `ocr_language`
    /// configuration fields.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&*config.tesseract_command, &*config.ocr_language)
    }
}

impl TextRecognizer for TesseractRecognizer {
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    fn recognize(&self, image: &RgbImage) -> Result<String, InferenceError> {
        let input = tempfile::Builder::new()
            .prefix("pyq-ocr-")
            .suffix(".png")
            .tempfile()?;

        image
            .save_with_format(input.path(), ImageFormat::Png)
            .map_err(|source| InferenceError::ImageEncodingError { source })?;

        debug!("Running {} on {}", self.command, input.path().display());

        let output = Command::new(&self.command)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => InferenceError::ToolUnavailable {
                    command: self.command.clone(),
                },
                _ => InferenceError::Io { source: e },
            })?;

        if !output.status.success() {
            return Err(InferenceError::ToolFailed {
                command: self.command.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8(output.stdout)
            .map_err(|source| InferenceError::InvalidOutput { source })?;

        debug!("Recognised {} characters", text.len());
        Ok(text)
    }
}
