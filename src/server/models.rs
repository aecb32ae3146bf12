use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use crate::document::AnalysisResult;
use crate::paper::QuestionCount;

const FORBIDDEN_FILENAME_CHARS: &[char] = &['/', '\\', '\0'];

/// Base64 encoding expands data by ~4/3.
pub fn max_base64_length(max_file_size: u64) -> usize {
    ((max_file_size / 3 + 1) * 4) as usize
}

/// Body of both the analyze and export endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Base64-encoded document data
    pub data: String,

    /// Filename with extension; the extension selects the loader
    pub filename: String,

    /// Size of the assumed paper, 1 to 10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_questions: Option<usize>,

    /// Shuffle seed; a random one is chosen when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl AnalyzeRequest {
    pub fn validate_and_decode(&self, max_file_size: u64) -> Result<Vec<u8>, ValidationError> {
        self.validate_filename()?;
        self.validate_and_decode_base64(max_file_size)
    }

    fn validate_and_decode_base64(&self, max_file_size: u64) -> Result<Vec<u8>, ValidationError> {
        if self.data.len() > max_base64_length(max_file_size) {
            return Err(ValidationError::Base64DataTooLarge);
        }

        let decoded = STANDARD
            .decode(&self.data)
            .map_err(|e| ValidationError::InvalidBase64(e.to_string()))?;

        if decoded.len() as u64 > max_file_size {
            return Err(ValidationError::FileSizeTooLarge { max: max_file_size });
        }

        Ok(decoded)
    }

    fn validate_filename(&self) -> Result<(), ValidationError> {
        let filename = self.filename.trim();

        if filename.is_empty() {
            return Err(ValidationError::EmptyFilename);
        }

        if filename.len() > 255 {
            return Err(ValidationError::FilenameTooLong);
        }

        if let Some(ch) = filename
            .chars()
            .find(|ch| FORBIDDEN_FILENAME_CHARS.contains(ch))
        {
            return Err(ValidationError::ForbiddenCharacter(ch));
        }

        if filename.starts_with('.') || self.filename.starts_with(' ') || self.filename.ends_with(' ')
        {
            return Err(ValidationError::InvalidFilenameEdges);
        }

        Ok(())
    }

    /// The requested paper size, or `default` when none was given.
    pub fn question_count(&self, default: QuestionCount) -> Result<QuestionCount, ValidationError> {
        match self.num_questions {
            Some(count) => QuestionCount::new(count).map_err(ValidationError::InvalidQuestionCount),
            None => Ok(default),
        }
    }

    pub fn sanitized_filename(&self) -> String {
        self.filename.trim().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    pub result: AnalysisResult,
}

impl AnalyzeResponse {
    pub fn success(result: AnalysisResult) -> Self {
        Self {
            status: "success".to_string(),
            result,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
