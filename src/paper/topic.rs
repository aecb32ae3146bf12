//! Keyword-based topic classification.
//!
//! Each question is assigned exactly one [`Topic`]. The keyword vocabulary is
//! an ordered list: when a question contains keywords from several topics,
//! the topic declared first wins. Matching is plain substring containment on
//! the lower-cased question, so a keyword inside a longer word still matches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Topic label assigned to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Economics,
    Finance,
    Marketing,
    Law,
    Management,
    Statistics,
    /// Fallback for questions that match no keyword.
    General,
}

impl Topic {
    /// Returns every topic label, fallback last.
    #[must_use]
    pub fn all() -> [Topic; 7] {
        [
            Topic::Economics,
            Topic::Finance,
            Topic::Marketing,
            Topic::Law,
            Topic::Management,
            Topic::Statistics,
            Topic::General,
        ]
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Economics => "Economics",
            Topic::Finance => "Finance",
            Topic::Marketing => "Marketing",
            Topic::Law => "Law",
            Topic::Management => "Management",
            Topic::Statistics => "Statistics",
            Topic::General => "General",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered topic vocabulary: `(topic, lowercase trigger substrings)`.
pub type Vocabulary = [(Topic, &'static [&'static str])];

/// The built-in vocabulary. Declaration order is classification precedence.
pub const TOPIC_KEYWORDS: &Vocabulary = &[
    (
        Topic::Economics,
        &["demand", "supply", "inflation", "gdp", "economy", "market"],
    ),
    (
        Topic::Finance,
        &["investment", "bank", "capital", "interest", "equity", "debt"],
    ),
    (
        Topic::Marketing,
        &["consumer", "product", "brand", "advertising", "promotion"],
    ),
    (
        Topic::Law,
        &["contract", "legal", "law", "rights", "case", "court"],
    ),
    (
        Topic::Management,
        &["leadership", "strategy", "planning", "organization"],
    ),
    (
        Topic::Statistics,
        &["mean", "median", "probability", "regression", "correlation"],
    ),
];

/// A question paired with the topic it was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedQuestion {
    pub question: String,
    pub topic: Topic,
}

/// Assigns topics by first matching keyword set.
#[derive(Debug, Clone, Copy)]
pub struct TopicClassifier {
    vocabulary: &'static Vocabulary,
}

impl Default for TopicClassifier {
    fn default() -> Self {
        Self::new(TOPIC_KEYWORDS)
    }
}

impl TopicClassifier {
    /// Creates a classifier over an ordered vocabulary.
    ///
    /// Keywords are expected in lowercase; they are compared against the
    /// lower-cased question.
    #[must_use]
    pub fn new(vocabulary: &'static Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Returns the topic of a single question.
    ///
    /// This is total: a question matching no keyword is [`Topic::General`].
    #[must_use]
    pub fn detect_topic(&self, question: &str) -> Topic {
        let lowered = question.to_lowercase();
        self.vocabulary
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
            .map_or(Topic::General, |(topic, _)| *topic)
    }

    /// Classifies each question, preserving order.
    #[must_use]
    pub fn classify(&self, questions: &[String]) -> Vec<ClassifiedQuestion> {
        questions
            .iter()
            .map(|question| ClassifiedQuestion {
                question: question.clone(),
                topic: self.detect_topic(question),
            })
            .collect()
    }
}
