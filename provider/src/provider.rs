use crate::error::ProviderError;

/// Extracts speaker embedding vectors from decoded audio.
///
/// The input is a mono waveform of f32 samples in [-1, 1] at
/// [`SpeakerEmbedder::sample_rate`]. The output is a dense f32 vector whose
/// dimensionality is returned by [`SpeakerEmbedder::dimension`] and is the
/// same for every call. One implementation per backing model family;
/// downstream matching code never depends on which one is in use.
///
/// Implementations must be safe for concurrent use.
pub trait SpeakerEmbedder: Send + Sync {
    /// Computes a speaker embedding from a decoded mono waveform.
    fn embed(&self, samples: &[f32]) -> Result<Vec<f32>, ProviderError>;

    /// Returns the dimensionality of the embedding vectors.
    fn dimension(&self) -> usize;

    /// Returns the sample rate the waveform is expected in (Hz).
    fn sample_rate(&self) -> u32;
}

/// A classification outcome: a label name with a signed score.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
    pub score: f32,
}

/// Assigns a label to a piece of text (e.g. sentiment).
///
/// Implementations must be safe for concurrent use.
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Label, ProviderError>;
}

/// Condenses a piece of text into at most `max_sentences` sentences.
///
/// Implementations must be safe for concurrent use.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str, max_sentences: usize) -> Result<String, ProviderError>;
}
