pub mod analysis;
pub mod content;
pub mod error;

pub use analysis::{AnalysisPipeline, AnalysisResult, PaperReport};
pub use content::{DocumentContent, DocumentType, PageContent, TablePreview};
pub use error::DocumentError;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::inference::TextRecognizer;
use crate::paper::{self, PaperSampler, QuestionCount, TopicClassifier};
use content::{CsvContent, ImageContent, PdfContent};

/// An uploaded question paper.
#[derive(Debug)]
pub struct Document {
    doc_type: DocumentType,
    content: Option<Box<dyn DocumentContent>>,
}

impl Document {
    /// Loads a document, choosing the loader from the filename's extension.
    ///
    /// `.csv` and `.pdf` use their own loaders; every other name, including
    /// one without an extension, is decoded as an image.
    pub fn new(bytes: &[u8], filename: &str) -> Result<Self, DocumentError> {
        let doc_type = DocumentType::from_filename(filename);

        let content = match doc_type {
            DocumentType::Csv => CsvContent::load(bytes)?,
            DocumentType::Pdf => PdfContent::load(bytes)?,
            DocumentType::Image => ImageContent::load(bytes)?,
        };

        Ok(Document {
            doc_type,
            content: Some(content),
        })
    }

    pub fn doc_type(&self) -> &DocumentType {
        &self.doc_type
    }

    pub fn content(&self) -> Option<&dyn DocumentContent> {
        self.content.as_deref()
    }

    pub fn content_mut(&mut self) -> Option<&mut dyn DocumentContent> {
        self.content.as_deref_mut()
    }

    /// Returns the document's plain text, running OCR on image pages.
    pub fn extract_text(
        &mut self,
        recognizer: &dyn TextRecognizer,
    ) -> Result<String, DocumentError> {
        let pipeline = AnalysisPipeline::new(self.doc_type, recognizer);

        let content = match self.content_mut() {
            Some(content) => content,
            None => {
                return Err(DocumentError::ContentNotLoaded);
            }
        };

        pipeline.extract_text(content)
    }

    /// Extracts the text and, when it is non-empty, classifies its questions
    /// and samples an assumed paper of at most `question_count` questions.
    ///
    /// The same `seed` over the same document yields the same paper.
    pub fn analyze(
        &mut self,
        recognizer: &dyn TextRecognizer,
        question_count: QuestionCount,
        seed: u64,
    ) -> Result<AnalysisResult, DocumentError> {
        let text = self.extract_text(recognizer)?;
        let page_count = self.content().map_or(0, |content| content.page_count());
        let preview = self
            .content()
            .and_then(|content| content.table_preview())
            .cloned();

        let mut rng = StdRng::seed_from_u64(seed);
        let analysis = paper::analyze_text(
            &text,
            &TopicClassifier::default(),
            &PaperSampler::default(),
            question_count,
            &mut rng,
        );

        let result =
            AnalysisResult::new(self.doc_type, page_count, text).with_table_preview(preview);
        match analysis {
            Some(analysis) => {
                info!(
                    "Classified {} questions, assumed paper has {}",
                    analysis.questions.len(),
                    analysis.assumed_paper.len()
                );
                Ok(result.with_paper(PaperReport::new(analysis, seed)))
            }
            None => {
                info!("No text extracted, skipping topic analysis");
                Ok(result)
            }
        }
    }
}
