use crate::error::ProviderError;
use crate::provider::{Classifier, Label};

/// Word lists for the built-in sentiment classifier.
const POSITIVE: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "love",
    "loved", "like", "liked", "happy", "glad", "best", "awesome", "nice",
    "perfect", "enjoy", "enjoyed", "pleasant", "delightful",
];

const NEGATIVE: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "hate", "hated", "dislike",
    "disliked", "sad", "angry", "worst", "poor", "disappointing",
    "disappointed", "broken", "useless", "annoying", "unpleasant", "boring",
    "wrong",
];

/// Lexicon-based sentiment classifier.
///
/// Counts positive and negative word hits and labels the text "positive",
/// "negative", or "neutral". The score is the signed hit balance in [-1, 1]:
/// +1 all positive hits, -1 all negative, 0 balanced or no hits.
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<Label, ProviderError> {
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyInput);
        }

        let mut pos = 0usize;
        let mut neg = 0usize;
        for word in tokenize(text) {
            if POSITIVE.contains(&word.as_str()) {
                pos += 1;
            } else if NEGATIVE.contains(&word.as_str()) {
                neg += 1;
            }
        }

        let total = pos + neg;
        let score = if total == 0 {
            0.0
        } else {
            (pos as f32 - neg as f32) / total as f32
        };
        let name = if score > 0.0 {
            "positive"
        } else if score < 0.0 {
            "negative"
        } else {
            "neutral"
        };

        Ok(Label {
            name: name.to_string(),
            score,
        })
    }
}

/// Lowercased alphanumeric word sequence.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}
