use crate::allocator;
use async_trait::async_trait;
use shorturl_core::{Registry, RegistryError, Repository, ShortId, StorageError, UrlMapping};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Number of insert attempts before a registration gives up.
pub const MAX_INSERT_ATTEMPTS: usize = 8;

/// A concrete implementation of the [`Registry`] trait.
///
/// This service wraps a [`Repository`] and handles:
/// - Deduplication of repeated submissions
/// - Sequential id allocation from the latest stored mapping
/// - Resolution of textual ids
///
/// Inserts rely on the repository rejecting a duplicate id or url. A
/// rejected insert means another writer got there first, so the service
/// looks the url up again and, if it is still absent, retries with a
/// freshly allocated id.
#[derive(Debug)]
pub struct RegistryService<R> {
    repository: Arc<R>,
}

impl<R> Clone for RegistryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: Repository> RegistryService<R> {
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }

    /// Creates a service over a repository that is also used elsewhere.
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    async fn insert_new(&self, url: &str) -> Result<Option<UrlMapping>, RegistryError> {
        let id = allocator::next_id(self.repository.as_ref()).await?;
        debug!(%id, url = %url, "allocated short id");

        match self.repository.insert(UrlMapping::new(id, url)).await {
            Ok(()) => {
                // Read back what was stored rather than echoing the input.
                let stored = self.repository.find_by_url(url).await?;
                if let Some(mapping) = &stored {
                    info!(id = %mapping.id, url = %mapping.url, "registered new url");
                }
                Ok(stored)
            }
            Err(StorageError::Conflict(reason)) => {
                warn!(%id, url = %url, %reason, "insert lost a race, retrying");
                Ok(None)
            }
            Err(other) => Err(other.into()),
        }
    }
}

#[async_trait]
impl<R: Repository> Registry for RegistryService<R> {
    async fn register_or_lookup(&self, url: &str) -> Result<UrlMapping, RegistryError> {
        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            if let Some(existing) = self.repository.find_by_url(url).await? {
                debug!(id = %existing.id, url = %url, "url already registered");
                return Ok(existing);
            }

            trace!(attempt, url = %url, "registering url");
            if let Some(created) = self.insert_new(url).await? {
                return Ok(created);
            }
        }

        Err(RegistryError::Contention(url.to_owned()))
    }

    async fn resolve(&self, id: &str) -> Result<String, RegistryError> {
        // Only the canonical decimal form names a mapping; "07" is not "7".
        let Ok(short_id) = id.parse::<ShortId>() else {
            trace!(id = %id, "identifier is not a canonical short id");
            return Err(RegistryError::NotFound(id.to_owned()));
        };

        match self.repository.find_by_id(short_id).await? {
            Some(mapping) => {
                debug!(id = %short_id, url = %mapping.url, "resolved short id");
                Ok(mapping.url)
            }
            None => {
                trace!(id = %short_id, "short id not found");
                Err(RegistryError::NotFound(id.to_owned()))
            }
        }
    }
}
