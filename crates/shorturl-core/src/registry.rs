use crate::error::RegistryError;
use crate::mapping::UrlMapping;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, RegistryError>;

#[async_trait]
pub trait Registry: Send + Sync + 'static {
    /// Returns the existing mapping for `url`, or allocates the next
    /// sequential id and stores a new one.
    ///
    /// The url is expected to have been validated by the caller.
    async fn register_or_lookup(&self, url: &str) -> Result<UrlMapping>;

    /// Resolves the textual identifier to the stored url.
    ///
    /// Returns `Err(RegistryError::NotFound)` if no mapping has that identifier.
    async fn resolve(&self, id: &str) -> Result<String>;
}
