//! Assembly of the assumed paper from ranked topics.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::PaperError;
use super::frequency::TopicFrequency;
use super::topic::ClassifiedQuestion;

/// Questions drawn from each topic before moving to the next one.
pub const QUESTIONS_PER_TOPIC: usize = 2;

/// Requested size of the assumed paper, bounded to `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct QuestionCount(usize);

impl QuestionCount {
    pub const MIN: usize = 1;
    pub const MAX: usize = 10;
    pub const DEFAULT: usize = 5;

    pub fn new(count: usize) -> Result<Self, PaperError> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(PaperError::QuestionCountOutOfRange {
                requested: count,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    #[inline]
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for QuestionCount {
    type Error = PaperError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<QuestionCount> for usize {
    fn from(count: QuestionCount) -> Self {
        count.0
    }
}

/// The sampled, ordered question list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssumedPaper {
    pub questions: Vec<String>,
}

impl AssumedPaper {
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns `Q{i}: {question}` lines, numbered from 1.
    #[must_use]
    pub fn numbered_lines(&self) -> Vec<String> {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, question)| format!("Q{}: {}", index + 1, question))
            .collect()
    }
}

/// Draws questions topic by topic in frequency order.
#[derive(Debug, Clone, Copy)]
pub struct PaperSampler {
    per_topic: usize,
}

impl Default for PaperSampler {
    fn default() -> Self {
        Self {
            per_topic: QUESTIONS_PER_TOPIC,
        }
    }
}

impl PaperSampler {
    /// Builds the assumed paper.
    ///
    /// For each topic in `frequencies` order, the topic's questions are
    /// shuffled independently and up to [`QUESTIONS_PER_TOPIC`] are appended.
    /// The result is then truncated to `count`. Fewer than `count` questions
    /// are returned when the topics run out.
    ///
    /// The shuffle is the only source of nondeterminism; pass a seeded
    /// generator for reproducible output.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        frequencies: &[TopicFrequency],
        classified: &[ClassifiedQuestion],
        count: QuestionCount,
        rng: &mut R,
    ) -> AssumedPaper {
        let mut questions = Vec::new();

        for entry in frequencies {
            let mut pool: Vec<&str> = classified
                .iter()
                .filter(|c| c.topic == entry.topic)
                .map(|c| c.question.as_str())
                .collect();
            pool.shuffle(rng);
            questions.extend(pool.into_iter().take(self.per_topic).map(str::to_owned));
        }

        questions.truncate(count.get());
        AssumedPaper { questions }
    }
}
