use crate::error::StorageError;
use crate::mapping::{ShortId, UrlMapping};
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of the mapping store.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Returns the mapping whose url equals `url` exactly.
    async fn find_by_url(&self, url: &str) -> Result<Option<UrlMapping>>;

    /// Returns the mapping with the given id.
    async fn find_by_id(&self, id: ShortId) -> Result<Option<UrlMapping>>;

    /// Returns the most recently inserted mapping, or `None` if the store is empty.
    async fn find_latest(&self) -> Result<Option<UrlMapping>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new mapping.
    ///
    /// Returns `Err(StorageError::Conflict)` if a mapping with the same id or
    /// the same url already exists. The existence check and the write are
    /// atomic with respect to concurrent inserts.
    async fn insert(&self, mapping: UrlMapping) -> Result<()>;
}
