use thiserror::Error;

/// Errors reported by a storage backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The id or url of the mapping being inserted already exists.
    #[error("mapping already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors reported by a [`Registry`](crate::Registry).
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("no mapping found for identifier '{0}'")]
    NotFound(String),
    #[error("short id space exhausted")]
    IdSpaceExhausted,
    #[error("gave up allocating an id for '{0}' after repeated conflicts")]
    Contention(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
