//! Question classification and assumed-paper generation.
//!
//! The pipeline runs strictly forward over extracted text:
//! [`segment_questions`] → [`TopicClassifier`] → [`topic_frequencies`] →
//! [`PaperSampler`] → [`export::render_pdf`].

pub mod error;
pub mod export;
pub mod frequency;
pub mod sampler;
pub mod segmenter;
pub mod topic;

pub use error::PaperError;
pub use frequency::{topic_frequencies, TopicFrequency};
pub use sampler::{AssumedPaper, PaperSampler, QuestionCount, QUESTIONS_PER_TOPIC};
pub use segmenter::{segment_questions, MIN_QUESTION_CHARS};
pub use topic::{ClassifiedQuestion, Topic, TopicClassifier, TOPIC_KEYWORDS};

use rand::Rng;
use tracing::debug;

/// Classification and sampling output for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperAnalysis {
    pub questions: Vec<ClassifiedQuestion>,
    pub topic_frequencies: Vec<TopicFrequency>,
    pub assumed_paper: AssumedPaper,
}

/// Runs segmentation, classification, aggregation and sampling on `text`.
///
/// Returns `None` for empty or whitespace-only text; no table or paper is
/// produced in that case.
pub fn analyze_text<R: Rng + ?Sized>(
    text: &str,
    classifier: &TopicClassifier,
    sampler: &PaperSampler,
    count: QuestionCount,
    rng: &mut R,
) -> Option<PaperAnalysis> {
    if text.trim().is_empty() {
        return None;
    }

    let segmented = segment_questions(text);
    let questions = classifier.classify(&segmented);
    let frequencies = topic_frequencies(&questions);
    let assumed_paper = sampler.sample(&frequencies, &questions, count, rng);

    debug!(
        "Segmented {} questions into {} topics, sampled {}",
        questions.len(),
        frequencies.len(),
        assumed_paper.len()
    );

    Some(PaperAnalysis {
        questions,
        topic_frequencies: frequencies,
        assumed_paper,
    })
}
