//! Document content types and abstractions.
//!
//! This module provides content representations for the supported upload
//! formats. Each document type has a corresponding content struct that
//! implements the [`DocumentContent`] trait.

mod csv;
mod image;
mod pdf;

pub use csv::{CsvContent, QUESTION_COLUMN};
pub use image::ImageContent;
pub use pdf::PdfContent;

use std::any::Any;

use ::image::RgbImage;

use serde::{Deserialize, Serialize};

/// Supported document file types.
///
/// The type is chosen from the upload's file extension. Anything that is
/// not CSV or PDF is handed to OCR as an image.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum DocumentType {
    /// Comma-separated values with a `Question` column (`.csv`).
    Csv,
    /// Portable Document Format file with a text layer (`.pdf`).
    Pdf,
    /// Raster image read through OCR (`.png`, `.jpg`, ... and any other extension).
    Image,
}

impl DocumentType {
    /// Creates a `DocumentType` from a file extension string.
    ///
    /// # Arguments
    ///
    /// * `ext` - The file extension without the leading dot (e.g., "csv", "pdf").
    ///
    /// Matching is case-insensitive. Unrecognised extensions map to
    /// [`DocumentType::Image`].
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        Self::supported_types()
            .into_iter()
            .find(|(supported_ext, _)| supported_ext.eq_ignore_ascii_case(ext))
            .map_or(DocumentType::Image, |(_, doc_type)| doc_type)
    }

    /// Determines the type from a filename; a missing extension means image.
    #[must_use]
    pub fn from_filename(filename: &str) -> Self {
        std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(DocumentType::Image, Self::from_extension)
    }

    /// Returns all recognised file extensions with their document types.
    #[must_use]
    pub fn supported_types() -> Vec<(&'static str, DocumentType)> {
        vec![
            ("csv", DocumentType::Csv),
            ("pdf", DocumentType::Pdf),
            ("png", DocumentType::Image),
            ("jpg", DocumentType::Image),
            ("jpeg", DocumentType::Image),
            ("tif", DocumentType::Image),
            ("tiff", DocumentType::Image),
            ("bmp", DocumentType::Image),
            ("gif", DocumentType::Image),
            ("webp", DocumentType::Image),
        ]
    }
}

/// Records shown as a preview of a tabular upload.
pub const PREVIEW_ROWS: usize = 5;

/// Header and leading records of a tabular upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePreview {
    pub headers: Vec<String>,
    /// At most [`PREVIEW_ROWS`] records, as read.
    pub rows: Vec<Vec<String>>,
    /// Number of records in the whole file, header excluded.
    pub row_count: usize,
}

/// Content extracted from a single page of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// The page number within the document (1-indexed).
    pub page_number: usize,
    /// The decoded page bitmap, present for image uploads until OCR has run.
    #[serde(skip)]
    pub image: Option<RgbImage>,
    /// The plain text of this page.
    pub text: Option<String>,
}

impl PageContent {
    #[must_use]
    pub fn new(page_number: usize) -> Self {
        Self {
            page_number,
            image: None,
            text: None,
        }
    }

    #[must_use]
    pub fn with_image(page_number: usize, image: RgbImage) -> Self {
        Self {
            page_number,
            image: Some(image),
            text: None,
        }
    }

    #[must_use]
    pub fn with_text(page_number: usize, text: String) -> Self {
        Self {
            page_number,
            image: None,
            text: Some(text),
        }
    }

    /// Returns `true` if this page still needs OCR.
    #[inline]
    #[must_use]
    pub fn needs_recognition(&self) -> bool {
        self.image.is_some() && self.text.is_none()
    }
}

/// Trait for document content implementations.
///
/// Provides uniform access to pages and text regardless of the underlying
/// format.
pub trait DocumentContent: std::fmt::Debug + Any + Send {
    /// Returns an immutable reference to the document's pages.
    fn get_pages(&self) -> &[PageContent];

    /// Returns a mutable reference to the document's pages.
    ///
    /// The analysis pipeline uses this to store recognised text.
    fn get_pages_mut(&mut self) -> &mut Vec<PageContent>;

    /// Returns the total number of pages in the document.
    fn page_count(&self) -> usize {
        self.get_pages().len()
    }

    /// Returns the leading rows of a tabular document, if it has any.
    fn table_preview(&self) -> Option<&TablePreview> {
        None
    }

    /// Concatenates the text of every page that has text, separated by a
    /// single space.
    ///
    /// Returns `None` if no page carries text.
    fn get_text(&self) -> Option<String> {
        let text_parts: Vec<&str> = self
            .get_pages()
            .iter()
            .filter_map(|page| page.text.as_deref())
            .collect();

        if text_parts.is_empty() {
            None
        } else {
            Some(text_parts.join(" "))
        }
    }
}
