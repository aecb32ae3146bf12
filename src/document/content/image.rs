//! Image document content handling.
//!
//! Images are decoded into a single RGB page; the text is filled in later by
//! the analysis pipeline through OCR.

use super::super::error::DocumentError;
use super::{DocumentContent, PageContent};

/// Content container for image-based documents.
#[derive(Debug)]
pub struct ImageContent {
    /// The pages extracted from the image (always exactly one page).
    pages: Vec<PageContent>,
}

impl DocumentContent for ImageContent {
    fn get_pages(&self) -> &[PageContent] {
        &self.pages
    }

    fn get_pages_mut(&mut self) -> &mut Vec<PageContent> {
        &mut self.pages
    }
}

impl ImageContent {
    /// Decodes an image from raw bytes.
    ///
    /// The format is sniffed from the content, not the filename.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::ImageLoadError`] if:
    /// - The image format is not recognized or supported
    /// - The image data is corrupted or truncated
    pub fn load(bytes: &[u8]) -> Result<Box<dyn DocumentContent>, DocumentError> {
        let img = image::load_from_memory(bytes)
            .map_err(|source| DocumentError::ImageLoadError { source })?
            .to_rgb8();

        let page = PageContent::with_image(1, img);

        Ok(Box::new(Self { pages: vec![page] }))
    }
}
