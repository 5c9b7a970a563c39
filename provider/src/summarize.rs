use std::collections::HashMap;

use crate::error::ProviderError;
use crate::lexicon::tokenize;
use crate::provider::Summarizer;

/// Words ignored when scoring sentences.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "of", "to", "in", "on", "at",
    "for", "with", "is", "are", "was", "were", "be", "been", "it", "its",
    "this", "that", "these", "those", "as", "by", "from", "has", "have", "had",
    "not", "no", "so", "we", "you", "they", "he", "she", "i",
];

/// Frequency-based extractive summarizer.
///
/// Scores each sentence by the average document frequency of its content
/// words and returns the top sentences in their original order. Deterministic;
/// no model involved.
pub struct FrequencySummarizer;

impl FrequencySummarizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FrequencySummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer for FrequencySummarizer {
    fn summarize(&self, text: &str, max_sentences: usize) -> Result<String, ProviderError> {
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        if max_sentences == 0 {
            return Ok(String::new());
        }

        let sentences = split_sentences(text);
        if sentences.len() <= max_sentences {
            return Ok(sentences.join(" "));
        }

        // Document-wide content word frequencies.
        let mut freq: HashMap<String, usize> = HashMap::new();
        for word in tokenize(text) {
            if !STOPWORDS.contains(&word.as_str()) {
                *freq.entry(word).or_insert(0) += 1;
            }
        }

        // Average frequency per content word, so long sentences don't win
        // by length alone.
        let mut scored: Vec<(usize, f64)> = sentences
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let mut total = 0usize;
                let mut words = 0usize;
                for word in tokenize(s) {
                    if let Some(&f) = freq.get(&word) {
                        total += f;
                        words += 1;
                    }
                }
                let score = if words == 0 {
                    0.0
                } else {
                    total as f64 / words as f64
                };
                (i, score)
            })
            .collect();

        // Ties keep the earlier sentence (stable sort on descending score).
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let mut picked: Vec<usize> = scored.iter().take(max_sentences).map(|&(i, _)| i).collect();
        picked.sort_unstable();

        Ok(picked
            .into_iter()
            .map(|i| sentences[i].as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}

/// Splits text into trimmed sentences, keeping terminal punctuation.
fn split_sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let s = current.trim();
            if !s.is_empty() {
                out.push(s.to_string());
            }
            current.clear();
        }
    }
    let tail = current.trim();
    if !tail.is_empty() {
        out.push(tail.to_string());
    }
    out
}
