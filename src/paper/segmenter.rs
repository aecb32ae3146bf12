//! Splitting extracted text into individual questions.

/// Fragments whose trimmed length is at or below this many characters are
/// discarded.
pub const MIN_QUESTION_CHARS: usize = 5;

/// Terminator that delimits questions in the raw text.
pub const QUESTION_TERMINATOR: char = '?';

/// Splits raw extracted text into question strings.
///
/// The text is split on every `?`, each fragment is trimmed, fragments of
/// [`MIN_QUESTION_CHARS`] characters or fewer are dropped, and the `?` is
/// re-appended to the survivors. Document order is preserved. The trailing
/// fragment after the last `?` is treated like any other.
///
/// # Examples
///
/// ```
/// use pyq_predictor::paper::segment_questions;
///
/// let questions = segment_questions("What is GDP? Ok? Define inflation");
/// assert_eq!(questions, vec!["What is GDP?", "Define inflation?"]);
/// ```
#[must_use]
pub fn segment_questions(text: &str) -> Vec<String> {
    text.split(QUESTION_TERMINATOR)
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() > MIN_QUESTION_CHARS)
        .map(|fragment| format!("{fragment}{QUESTION_TERMINATOR}"))
        .collect()
}
