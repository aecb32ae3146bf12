//! PDF document content handling.
//!
//! Text is read from each page's text layer; scanned PDFs without one yield
//! no text.
//!
//! # Dependencies
//!
//! This module uses the `pdfium-render` crate, which requires the PDFium
//! library to be available at runtime (either bundled or system-installed).

use pdfium_render::prelude::*;
use tracing::debug;

use super::super::error::DocumentError;
use super::{DocumentContent, PageContent};

/// Content container for PDF documents.
#[derive(Debug)]
pub struct PdfContent {
    /// The pages extracted from the PDF document.
    pages: Vec<PageContent>,
}

impl DocumentContent for PdfContent {
    fn get_pages(&self) -> &[PageContent] {
        &self.pages
    }

    fn get_pages_mut(&mut self) -> &mut Vec<PageContent> {
        &mut self.pages
    }
}

impl PdfContent {
    /// Loads a PDF document from raw bytes and extracts each page's text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::PdfLoadError`] if:
    /// - The PDFium library cannot be loaded
    /// - The PDF file is corrupted or password-protected
    /// - A page's text layer cannot be read
    pub fn load(bytes: &[u8]) -> Result<Box<dyn DocumentContent>, DocumentError> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name())
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|source| DocumentError::PdfLoadError { source })?,
        );

        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|source| DocumentError::PdfLoadError { source })?;

        let mut pages = Vec::new();
        for (page_index, page) in document.pages().iter().enumerate() {
            let text_page = page
                .text()
                .map_err(|source| DocumentError::PdfLoadError { source })?;

            let mut page_content = PageContent::new(page_index + 1);
            let clean_text = Self::clean_page_text(&text_page.all());
            if !clean_text.is_empty() {
                page_content.text = Some(clean_text);
            }
            pages.push(page_content);
        }

        debug!("Loaded PDF with {} pages", pages.len());

        Ok(Box::new(Self { pages }))
    }

    /// Trims each line, drops blank ones, and joins the rest with spaces.
    fn clean_page_text(page_text: &str) -> String {
        page_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_page_text_joins_trimmed_lines() {
        let text = "  What is GDP?\n\n   Define   inflation?  \r\n";
        assert_eq!(
            PdfContent::clean_page_text(text),
            "What is GDP? Define   inflation?"
        );
    }

    #[test]
    fn clean_page_text_of_blank_page_is_empty() {
        assert_eq!(PdfContent::clean_page_text(" \n\t\n"), "");
    }
}
