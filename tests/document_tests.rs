use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{ImageFormat, RgbImage};
use pyq_predictor::document::content::{
    DocumentContent, DocumentType, PageContent, TablePreview, PREVIEW_ROWS, QUESTION_COLUMN,
};
use pyq_predictor::document::{Document, DocumentError};
use pyq_predictor::inference::{InferenceError, TextRecognizer};
use pyq_predictor::paper::{QuestionCount, Topic};

// ============================================================================
// Test Helpers
// ============================================================================

/// Returns fixed text and counts how often it was asked.
struct FixedRecognizer {
    text: String,
    calls: AtomicUsize,
}

impl FixedRecognizer {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl TextRecognizer for FixedRecognizer {
    fn recognize(&self, _image: &RgbImage) -> Result<String, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

struct FailingRecognizer;

impl TextRecognizer for FailingRecognizer {
    fn recognize(&self, _image: &RgbImage) -> Result<String, InferenceError> {
        Err(InferenceError::ToolUnavailable {
            command: "tesseract".to_string(),
        })
    }
}

fn png_bytes() -> Vec<u8> {
    let image = RgbImage::from_pixel(8, 8, image::Rgb([255, 255, 255]));
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png).unwrap();
    buffer.into_inner()
}

/// Content with caller-chosen pages.
#[derive(Debug)]
struct StubContent {
    pages: Vec<PageContent>,
}

impl DocumentContent for StubContent {
    fn get_pages(&self) -> &[PageContent] {
        &self.pages
    }

    fn get_pages_mut(&mut self) -> &mut Vec<PageContent> {
        &mut self.pages
    }
}

const SAMPLE_CSV: &str = "Id,Question,Marks\n\
1,What drives demand and supply?,5\n\
2,Explain bank interest rates?,5\n\
3,Define mean and median?,10\n";

// ============================================================================
// Document Type Tests
// ============================================================================

#[test]
fn test_document_type_from_extension() {
    assert_eq!(DocumentType::from_extension("csv"), DocumentType::Csv);
    assert_eq!(DocumentType::from_extension("PDF"), DocumentType::Pdf);
    assert_eq!(DocumentType::from_extension("jpeg"), DocumentType::Image);
    assert_eq!(DocumentType::from_extension("docx"), DocumentType::Image);
}

#[test]
fn test_document_type_from_filename() {
    assert_eq!(DocumentType::from_filename("paper.CSV"), DocumentType::Csv);
    assert_eq!(DocumentType::from_filename("2023/paper.pdf"), DocumentType::Pdf);
    assert_eq!(DocumentType::from_filename("scan.png"), DocumentType::Image);
    assert_eq!(DocumentType::from_filename("scan"), DocumentType::Image);
}

#[test]
fn test_supported_types_are_recognised() {
    for (ext, expected) in DocumentType::supported_types() {
        assert_eq!(DocumentType::from_extension(ext), expected, "extension {ext}");
    }
}

// ============================================================================
// CSV Tests
// ============================================================================

#[test]
fn test_csv_joins_question_column_with_spaces() {
    let mut doc = Document::new(SAMPLE_CSV.as_bytes(), "paper.csv").unwrap();
    assert_eq!(*doc.doc_type(), DocumentType::Csv);

    let text = doc.extract_text(&FixedRecognizer::new("unused")).unwrap();
    assert_eq!(
        text,
        "What drives demand and supply? Explain bank interest rates? Define mean and median?"
    );
    assert_eq!(doc.content().unwrap().page_count(), 1);
}

#[test]
fn test_csv_without_question_column_yields_empty_text() {
    let csv = "Id,Prompt\n1,What is GDP?\n";
    let mut doc = Document::new(csv.as_bytes(), "paper.csv").unwrap();

    let text = doc.extract_text(&FixedRecognizer::new("unused")).unwrap();
    assert_eq!(text, "");
}

#[test]
fn test_csv_column_name_is_case_sensitive() {
    let csv = "question\nWhat is GDP?\n";
    let mut doc = Document::new(csv.as_bytes(), "paper.csv").unwrap();
    assert_eq!(doc.extract_text(&FixedRecognizer::new("")).unwrap(), "");
}

#[test]
fn test_csv_handles_quotes_short_rows_and_bom() {
    let csv = format!(
        "\u{feff}{QUESTION_COLUMN},Topic\n\"Explain demand, supply and price?\",Eco\n\nShort row only?\n"
    );
    let mut doc = Document::new(csv.as_bytes(), "paper.csv").unwrap();
    let text = doc.extract_text(&FixedRecognizer::new("")).unwrap();
    assert_eq!(text, "Explain demand, supply and price? Short row only?");
}

#[test]
fn test_csv_with_invalid_utf8_fails() {
    let bytes = b"Question\n\xff\xfe broken?\n";
    let result = Document::new(bytes, "paper.csv");
    assert!(matches!(result, Err(DocumentError::CsvLoadError { .. })));
}

#[test]
fn test_empty_csv_yields_empty_text() {
    let mut doc = Document::new(b"", "paper.csv").unwrap();
    assert_eq!(doc.extract_text(&FixedRecognizer::new("")).unwrap(), "");
}

#[test]
fn test_csv_keeps_table_preview() {
    let doc = Document::new(SAMPLE_CSV.as_bytes(), "paper.csv").unwrap();
    let preview = doc.content().unwrap().table_preview().unwrap();

    assert_eq!(preview.headers, vec!["Id", "Question", "Marks"]);
    assert_eq!(preview.row_count, 3);
    assert_eq!(preview.rows.len(), 3);
    assert_eq!(
        preview.rows[1],
        vec!["2", "Explain bank interest rates?", "5"]
    );
}

#[test]
fn test_csv_preview_is_capped_but_counts_every_row() {
    let mut csv = String::from("Question\n");
    for i in 0..PREVIEW_ROWS + 3 {
        csv.push_str(&format!("What is question {i}?\n"));
    }
    let doc = Document::new(csv.as_bytes(), "paper.csv").unwrap();
    let preview = doc.content().unwrap().table_preview().unwrap();

    assert_eq!(preview.rows.len(), PREVIEW_ROWS);
    assert_eq!(preview.row_count, PREVIEW_ROWS + 3);
    assert_eq!(preview.rows[0], vec!["What is question 0?"]);
}

#[test]
fn test_csv_preview_strips_bom_and_keeps_rows_without_question_column() {
    let csv = "\u{feff}Id,Prompt\n1,What is GDP?\n2,Define mean?\n";
    let doc = Document::new(csv.as_bytes(), "paper.csv").unwrap();
    let preview = doc.content().unwrap().table_preview().unwrap();

    assert_eq!(preview.headers, vec!["Id", "Prompt"]);
    assert_eq!(preview.row_count, 2);
}

#[test]
fn test_non_tabular_documents_have_no_preview() {
    let doc = Document::new(&png_bytes(), "scan.png").unwrap();
    assert!(doc.content().unwrap().table_preview().is_none());
}

// ============================================================================
// Page Text Tests
// ============================================================================

#[test]
fn test_get_text_joins_pages_and_skips_missing_text() {
    let content = StubContent {
        pages: vec![
            PageContent::with_text(1, "What is GDP?".to_string()),
            PageContent::new(2),
            PageContent::with_text(3, "Define mean value?".to_string()),
        ],
    };

    assert_eq!(content.page_count(), 3);
    assert_eq!(
        content.get_text().as_deref(),
        Some("What is GDP? Define mean value?")
    );
}

#[test]
fn test_get_text_is_none_without_any_page_text() {
    let content = StubContent {
        pages: vec![PageContent::new(1), PageContent::new(2)],
    };
    assert_eq!(content.get_text(), None);

    let empty = StubContent { pages: Vec::new() };
    assert_eq!(empty.get_text(), None);
    assert!(empty.table_preview().is_none());
}

// ============================================================================
// Image Tests
// ============================================================================

#[test]
fn test_image_text_comes_from_recognizer() {
    let recognizer = FixedRecognizer::new("What is GDP? Define inflation?");
    let mut doc = Document::new(&png_bytes(), "scan.png").unwrap();

    let text = doc.extract_text(&recognizer).unwrap();
    assert_eq!(text, "What is GDP? Define inflation?");
    assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);

    // Recognised pages are not processed again.
    let again = doc.extract_text(&recognizer).unwrap();
    assert_eq!(again, text);
    assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unknown_extension_is_treated_as_image() {
    let recognizer = FixedRecognizer::new("Explain market demand?");
    let mut doc = Document::new(&png_bytes(), "upload.bin").unwrap();

    assert_eq!(*doc.doc_type(), DocumentType::Image);
    assert_eq!(doc.extract_text(&recognizer).unwrap(), "Explain market demand?");
}

#[test]
fn test_undecodable_image_fails() {
    let result = Document::new(b"definitely not an image", "scan.jpg");
    assert!(matches!(result, Err(DocumentError::ImageLoadError { .. })));

    let result = Document::new(b"Question\nWhat?", "notes.txt");
    assert!(matches!(result, Err(DocumentError::ImageLoadError { .. })));
}

#[test]
fn test_recognizer_failure_propagates() {
    let mut doc = Document::new(&png_bytes(), "scan.png").unwrap();
    let result = doc.extract_text(&FailingRecognizer);
    assert!(matches!(
        result,
        Err(DocumentError::RecognitionError {
            source: InferenceError::ToolUnavailable { .. }
        })
    ));
}

// ============================================================================
// PDF Tests
// ============================================================================

#[test]
fn test_corrupt_pdf_fails() {
    let result = Document::new(b"%PDF-1.4 garbage", "paper.pdf");
    assert!(matches!(result, Err(DocumentError::PdfLoadError { .. })));
}

// ============================================================================
// Analysis Tests
// ============================================================================

#[test]
fn test_analyze_csv_end_to_end() {
    let mut doc = Document::new(SAMPLE_CSV.as_bytes(), "paper.csv").unwrap();
    let result = doc
        .analyze(&FixedRecognizer::new(""), QuestionCount::new(3).unwrap(), 11)
        .unwrap();

    assert_eq!(result.document_type, DocumentType::Csv);
    let report = result.paper.as_ref().unwrap();
    assert_eq!(report.seed, 11);

    let topics: Vec<Topic> = report.questions.iter().map(|q| q.topic).collect();
    assert_eq!(topics, vec![Topic::Economics, Topic::Finance, Topic::Statistics]);
    assert_eq!(report.topic_frequencies.len(), 3);
    assert!(report.topic_frequencies.iter().all(|f| f.frequency == 1));

    assert_eq!(report.paper().len(), 3);
    assert_eq!(report.assumed_paper.len(), 3);
    assert!(report.assumed_paper[0].starts_with("Q1: "));
    assert!(report.assumed_paper[2].starts_with("Q3: "));
}

#[test]
fn test_analyze_is_reproducible_with_seed() {
    let csv = "Question\nWhat is demand? What is supply? What is inflation? Define GDP growth? \
               What is bank capital? Define equity risk?\n";
    let run = |seed| {
        let mut doc = Document::new(csv.as_bytes(), "paper.csv").unwrap();
        doc.analyze(&FixedRecognizer::new(""), QuestionCount::new(4).unwrap(), seed)
            .unwrap()
            .paper
            .unwrap()
            .assumed_paper
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn test_analyze_without_text_produces_no_paper() {
    let csv = "Id,Prompt\n1,What is GDP?\n";
    let mut doc = Document::new(csv.as_bytes(), "paper.csv").unwrap();
    let result = doc
        .analyze(&FixedRecognizer::new(""), QuestionCount::default(), 1)
        .unwrap();

    assert_eq!(result.extracted_text, "");
    assert!(!result.has_paper());

    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("paper").is_none());
    assert_eq!(json["extracted_text"], "");
}

#[test]
fn test_analyze_serializes_report() {
    let mut doc = Document::new(SAMPLE_CSV.as_bytes(), "paper.csv").unwrap();
    let result = doc
        .analyze(&FixedRecognizer::new(""), QuestionCount::default(), 5)
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["document_type"], "Csv");
    assert_eq!(json["paper"]["seed"], 5);
    assert_eq!(json["paper"]["questions"][1]["topic"], "Finance");
    assert_eq!(json["paper"]["topic_frequencies"][0]["frequency"], 1);
    assert_eq!(json["paper"]["assumed_paper"].as_array().unwrap().len(), 3);

    let preview: TablePreview = serde_json::from_value(json["table_preview"].clone()).unwrap();
    assert_eq!(preview.row_count, 3);
    assert_eq!(preview.headers[1], QUESTION_COLUMN);
}
