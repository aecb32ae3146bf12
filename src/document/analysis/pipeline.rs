use tracing::{debug, info, instrument};

use crate::document::content::{DocumentContent, DocumentType, PageContent};
use crate::document::error::DocumentError;
use crate::inference::TextRecognizer;

/// Turns loaded document content into plain text.
///
/// CSV and PDF pages already carry their text after loading; image pages are
/// passed through the recognizer.
pub struct AnalysisPipeline<'a> {
    document_type: DocumentType,
    recognizer: &'a dyn TextRecognizer,
}

impl<'a> AnalysisPipeline<'a> {
    pub fn new(document_type: DocumentType, recognizer: &'a dyn TextRecognizer) -> Self {
        Self {
            document_type,
            recognizer,
        }
    }

    #[instrument(skip(self, page), fields(page_number = page.page_number))]
    pub fn process_page(&self, page: &mut PageContent) -> Result<(), DocumentError> {
        match self.document_type {
            DocumentType::Image => {
                if !page.needs_recognition() {
                    return Ok(());
                }
                if let Some(image) = page.image.take() {
                    debug!("Running OCR on {}x{} image", image.width(), image.height());
                    page.text = Some(self.recognizer.recognize(&image)?);
                }
            }
            DocumentType::Csv | DocumentType::Pdf => {}
        }

        Ok(())
    }

    /// Processes every page and returns the document text.
    ///
    /// The result is empty when no page produced text.
    pub fn extract_text(&self, content: &mut dyn DocumentContent) -> Result<String, DocumentError> {
        for page in content.get_pages_mut().iter_mut() {
            self.process_page(page)?;
        }

        let text = content.get_text().unwrap_or_default();
        info!(
            "Extracted {} characters from {} page(s)",
            text.len(),
            content.page_count()
        );
        Ok(text)
    }
}
