use thiserror::Error;

use crate::inference::InferenceError;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to load image content")]
    ImageLoadError {
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to load CSV content")]
    CsvLoadError {
        #[source]
        source: csv::Error,
    },

    #[error("Failed to load PDF content")]
    PdfLoadError {
        #[source]
        source: pdfium_render::prelude::PdfiumError,
    },

    #[error("Text recognition failed")]
    RecognitionError {
        #[from]
        source: InferenceError,
    },

    #[error("Document content not loaded")]
    ContentNotLoaded,
}

impl From<pdfium_render::prelude::PdfiumError> for DocumentError {
    fn from(source: pdfium_render::prelude::PdfiumError) -> Self {
        DocumentError::PdfLoadError { source }
    }
}

impl From<csv::Error> for DocumentError {
    fn from(source: csv::Error) -> Self {
        DocumentError::CsvLoadError { source }
    }
}
