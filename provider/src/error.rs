use thiserror::Error;

/// Errors returned by provider implementations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("audio too short: need at least {min_samples} samples, got {got_samples}")]
    AudioTooShort {
        min_samples: usize,
        got_samples: usize,
    },

    #[error("provider: empty input")]
    EmptyInput,

    #[error("model error: {0}")]
    Model(String),
}
