use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Failed to encode image for recognition")]
    ImageEncodingError {
        #[source]
        source: image::ImageError,
    },

    #[error("OCR tool '{command}' is not installed or not on PATH")]
    ToolUnavailable { command: String },

    #[error("OCR tool '{command}' exited with {status}: {stderr}")]
    ToolFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("OCR output is not valid UTF-8")]
    InvalidOutput {
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("I/O error during recognition")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
