use serde::{Deserialize, Serialize};

use crate::document::content::{DocumentType, TablePreview};
use crate::paper::{AssumedPaper, ClassifiedQuestion, PaperAnalysis, TopicFrequency};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub api_version: String,
    pub document_type: DocumentType,
    pub page_count: usize,
    pub extracted_text: String,
    /// Header and leading rows, for CSV uploads only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_preview: Option<TablePreview>,
    /// Absent when the extracted text is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper: Option<PaperReport>,
}

/// Topic analysis and the sampled paper for a non-empty document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperReport {
    /// Seed of the shuffle that produced `assumed_paper`.
    pub seed: u64,
    pub questions: Vec<ClassifiedQuestion>,
    pub topic_frequencies: Vec<TopicFrequency>,
    /// `Q{i}: ...` lines in paper order.
    pub assumed_paper: Vec<String>,
    #[serde(skip)]
    paper: AssumedPaper,
}

impl PaperReport {
    pub fn new(analysis: PaperAnalysis, seed: u64) -> Self {
        Self {
            seed,
            assumed_paper: analysis.assumed_paper.numbered_lines(),
            questions: analysis.questions,
            topic_frequencies: analysis.topic_frequencies,
            paper: analysis.assumed_paper,
        }
    }

    /// The sampled questions without numbering.
    pub fn paper(&self) -> &AssumedPaper {
        &self.paper
    }
}

impl AnalysisResult {
    pub fn new(document_type: DocumentType, page_count: usize, extracted_text: String) -> Self {
        Self {
            api_version: env!("CARGO_PKG_VERSION").to_string(),
            document_type,
            page_count,
            extracted_text,
            table_preview: None,
            paper: None,
        }
    }

    pub fn with_table_preview(mut self, preview: Option<TablePreview>) -> Self {
        self.table_preview = preview;
        self
    }

    pub fn with_paper(mut self, report: PaperReport) -> Self {
        self.paper = Some(report);
        self
    }

    /// Returns `true` when a paper was produced.
    pub fn has_paper(&self) -> bool {
        self.paper.is_some()
    }
}
