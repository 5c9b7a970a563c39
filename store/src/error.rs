use thiserror::Error;

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile name must not be empty")]
    EmptyName,

    #[error("profile vector must not be empty")]
    EmptyVector,

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("store: {0}")]
    Io(String),

    #[error("store: invalid snapshot: {0}")]
    InvalidFormat(String),
}
