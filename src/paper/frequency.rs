use serde::{Deserialize, Serialize};

use super::topic::{ClassifiedQuestion, Topic};

/// Number of questions assigned to a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicFrequency {
    pub topic: Topic,
    pub frequency: usize,
}

/// Counts questions per topic, most frequent first.
///
/// Topics with equal counts keep the order in which they first appear in
/// `classified`.
#[must_use]
pub fn topic_frequencies(classified: &[ClassifiedQuestion]) -> Vec<TopicFrequency> {
    let mut frequencies: Vec<TopicFrequency> = Vec::new();

    for entry in classified {
        match frequencies.iter_mut().find(|f| f.topic == entry.topic) {
            Some(existing) => existing.frequency += 1,
            None => frequencies.push(TopicFrequency {
                topic: entry.topic,
                frequency: 1,
            }),
        }
    }

    // Stable sort: ties stay in first-occurrence order.
    frequencies.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    frequencies
}
