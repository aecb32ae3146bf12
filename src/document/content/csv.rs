//! CSV document content handling.
//!
//! The `Question` column's cells are joined with single spaces into one
//! page of text. The leading rows are kept for display.

use csv::ReaderBuilder;
use tracing::debug;

use super::super::error::DocumentError;
use super::{DocumentContent, PageContent, TablePreview, PREVIEW_ROWS};

/// Header of the column holding question text.
pub const QUESTION_COLUMN: &str = "Question";

const UTF8_BOM: char = '\u{feff}';

/// Content container for CSV documents (always exactly one page).
#[derive(Debug)]
pub struct CsvContent {
    pages: Vec<PageContent>,
    preview: TablePreview,
}

impl DocumentContent for CsvContent {
    fn get_pages(&self) -> &[PageContent] {
        &self.pages
    }

    fn get_pages_mut(&mut self) -> &mut Vec<PageContent> {
        &mut self.pages
    }

    fn table_preview(&self) -> Option<&TablePreview> {
        Some(&self.preview)
    }
}

impl CsvContent {
    /// Loads a CSV file from raw bytes.
    ///
    /// A file without a `Question` column loads successfully with empty text.
    /// Rows shorter than the header contribute an empty cell. The header and
    /// the first [`PREVIEW_ROWS`] records are kept as a [`TablePreview`].
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::CsvLoadError`] if the bytes are not valid
    /// UTF-8 or a record cannot be parsed.
    pub fn load(bytes: &[u8]) -> Result<Box<dyn DocumentContent>, DocumentError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|header| header.trim_start_matches(UTF8_BOM).to_string())
            .collect();
        let column = headers.iter().position(|header| header == QUESTION_COLUMN);

        let mut preview = TablePreview {
            headers,
            rows: Vec::new(),
            row_count: 0,
        };
        let mut cells = Vec::new();
        for record in reader.records() {
            let record = record?;
            if preview.rows.len() < PREVIEW_ROWS {
                preview
                    .rows
                    .push(record.iter().map(str::to_string).collect());
            }
            preview.row_count += 1;
            if let Some(index) = column {
                cells.push(record.get(index).unwrap_or_default().to_string());
            }
        }

        let text = match column {
            Some(_) => {
                debug!("Read {} rows from the {} column", cells.len(), QUESTION_COLUMN);
                cells.join(" ")
            }
            None => {
                debug!("CSV has no {} column, using empty text", QUESTION_COLUMN);
                String::new()
            }
        };

        let page = PageContent::with_text(1, text);

        Ok(Box::new(Self {
            pages: vec![page],
            preview,
        }))
    }
}
