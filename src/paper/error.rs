use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaperError {
    #[error("Question count {requested} is outside the allowed range {min}..={max}")]
    QuestionCountOutOfRange {
        requested: usize,
        min: usize,
        max: usize,
    },

    #[error("Assumed paper has no questions to export")]
    EmptyPaper,

    #[error("Failed to write PDF: {message}")]
    PdfWriteError { message: String },
}
