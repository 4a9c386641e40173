//! Error types for GlenNOW.
//!
//! Lifecycle functions never fail. Validation happens before they are called,
//! and persistence failures are the only faults that leave the core.

/// Malformed user input. The operation is aborted and no state changes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a title.")]
    EmptyTitle,

    #[error("Invalid source '{0}': include http:// or https://")]
    InvalidSourceUrl(String),

    #[error("{label} must start with http or https")]
    InvalidRequestUrl { label: String },
}

/// Failure of the underlying key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Failure to persist a record.
///
/// Plain loads never produce this error: repositories fall back to defaults
/// instead. Writes return it so the caller can keep showing its previous
/// state and report a generic message. An append that would have to replace
/// unreadable content returns [`Malformed`](Self::Malformed) instead.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Malformed entry under {key}: {source}")]
    Malformed {
        key: String,
        source: serde_json::Error,
    },
}
