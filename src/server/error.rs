use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::document::DocumentError;
use crate::paper::PaperError;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Filename must not be empty")]
    EmptyFilename,

    #[error("Filename exceeds 255 characters")]
    FilenameTooLong,

    #[error("Filename contains forbidden character {0:?}")]
    ForbiddenCharacter(char),

    #[error("Filename must not start with '.' or have surrounding spaces")]
    InvalidFilenameEdges,

    #[error("Invalid base64 data: {0}")]
    InvalidBase64(String),

    #[error("Encoded data exceeds the maximum upload size")]
    Base64DataTooLarge,

    #[error("File exceeds the maximum size of {max} bytes")]
    FileSizeTooLarge { max: u64 },

    #[error("Invalid question count: {0}")]
    InvalidQuestionCount(#[source] PaperError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request")]
    Validation {
        #[from]
        source: ValidationError,
    },

    #[error("Document processing error")]
    Document {
        #[from]
        source: DocumentError,
    },

    #[error("Export failed")]
    Export {
        #[from]
        source: PaperError,
    },

    #[error("No text could be extracted from the document")]
    EmptyDocument,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            AppError::Validation { source } => (
                StatusCode::BAD_REQUEST,
                "Bad Request".to_string(),
                Some(source.to_string()),
            ),
            AppError::Document { source } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Document Processing Error".to_string(),
                Some(error_chain(source)),
            ),
            AppError::Export { source } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Export Error".to_string(),
                Some(source.to_string()),
            ),
            AppError::EmptyDocument => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Empty Document".to_string(),
                Some(self.to_string()),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    None,
                )
            }
        };

        let mut error_response = ErrorResponse::new(error_message);
        if let Some(details) = details {
            error_response = error_response.with_details(details);
        }

        (status, Json(error_response)).into_response()
    }
}

/// Joins an error with its sources, outermost first.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
