pub mod document;
pub mod inference;
pub mod paper;
pub mod server;
pub mod utils;

pub use document::{AnalysisResult, Document, DocumentContent, DocumentError, DocumentType};
pub use inference::{InferenceError, TesseractRecognizer, TextRecognizer};
pub use paper::{AssumedPaper, PaperError, QuestionCount, Topic, TopicClassifier};
pub use server::{create_app, start_server};
