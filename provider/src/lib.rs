//! Capability seams over pretrained models.
//!
//! Every "call a model, use its output" concern is one trait with one
//! implementation per backing family, so swapping models never touches
//! calling code:
//!
//! - [`SpeakerEmbedder`]: mono waveform -> fixed-length embedding vector
//! - [`Classifier`]: text -> [`Label`]
//! - [`Summarizer`]: text -> condensed text
//!
//! The built-in implementations ([`EnergyEmbedder`], [`LexiconClassifier`],
//! [`FrequencySummarizer`]) are deterministic and model-free; production
//! deployments plug in a real model family behind the same traits.

mod energy;
mod error;
mod lexicon;
mod provider;
mod summarize;

pub use energy::{l2_normalize, EnergyEmbedder};
pub use error::ProviderError;
pub use lexicon::LexiconClassifier;
pub use provider::{Classifier, Label, SpeakerEmbedder, Summarizer};
pub use summarize::FrequencySummarizer;
