use thiserror::Error;

/// Errors raised by a [`crate::KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key cannot be used by this backend (e.g. it is not a valid file name).
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Filesystem failure in a native backend.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded as JSON.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The platform storage is missing or refused access (private browsing, quota, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
