use async_trait::async_trait;
use parking_lot::RwLock;
use shorturl_core::repository::{ReadRepository, Repository, Result};
use shorturl_core::{ShortId, StorageError, UrlMapping};
use std::collections::HashMap;

/// Mappings in insertion order, indexed by url and by id.
#[derive(Debug, Default)]
struct Store {
    mappings: Vec<UrlMapping>,
    by_url: HashMap<String, usize>,
    by_id: HashMap<ShortId, usize>,
}

/// In-memory implementation of the repository contract.
///
/// All indexes live behind a single lock so that the uniqueness check and
/// the write in [`Repository::insert`] happen atomically.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    store: RwLock<Store>,
}

impl InMemoryRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored mappings.
    pub fn len(&self) -> usize {
        self.store.read().mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_by_url(&self, url: &str) -> Result<Option<UrlMapping>> {
        let store = self.store.read();
        Ok(store
            .by_url
            .get(url)
            .map(|&index| store.mappings[index].clone()))
    }

    async fn find_by_id(&self, id: ShortId) -> Result<Option<UrlMapping>> {
        let store = self.store.read();
        Ok(store
            .by_id
            .get(&id)
            .map(|&index| store.mappings[index].clone()))
    }

    async fn find_latest(&self) -> Result<Option<UrlMapping>> {
        Ok(self.store.read().mappings.last().cloned())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, mapping: UrlMapping) -> Result<()> {
        let mut store = self.store.write();

        if store.by_id.contains_key(&mapping.id) {
            return Err(StorageError::Conflict(format!("id {}", mapping.id)));
        }
        if store.by_url.contains_key(&mapping.url) {
            return Err(StorageError::Conflict(format!("url {}", mapping.url)));
        }

        let index = store.mappings.len();
        store.by_id.insert(mapping.id, index);
        store.by_url.insert(mapping.url.clone(), index);
        store.mappings.push(mapping);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn mapping(id: u64, url: &str) -> UrlMapping {
        UrlMapping::new(ShortId::new(id), url)
    }

    #[tokio::test]
    async fn insert_and_find() {
        let repo = InMemoryRepository::new();

        repo.insert(mapping(0, "https://example.com")).await.unwrap();

        let by_url = repo.find_by_url("https://example.com").await.unwrap();
        assert_eq!(by_url, Some(mapping(0, "https://example.com")));

        let by_id = repo.find_by_id(ShortId::new(0)).await.unwrap();
        assert_eq!(by_id, Some(mapping(0, "https://example.com")));
    }

    #[tokio::test]
    async fn find_nonexistent() {
        let repo = InMemoryRepository::new();

        assert!(repo.find_by_url("https://nope.com").await.unwrap().is_none());
        assert!(repo.find_by_id(ShortId::new(3)).await.unwrap().is_none());
        assert!(repo.find_latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn url_lookup_is_exact() {
        let repo = InMemoryRepository::new();
        repo.insert(mapping(0, "example.com")).await.unwrap();

        assert!(repo.find_by_url("Example.com").await.unwrap().is_none());
        assert!(repo.find_by_url("example.com/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn latest_follows_insertion_order() {
        let repo = InMemoryRepository::new();

        repo.insert(mapping(5, "https://a.com")).await.unwrap();
        repo.insert(mapping(2, "https://b.com")).await.unwrap();

        let latest = repo.find_latest().await.unwrap().unwrap();
        assert_eq!(latest, mapping(2, "https://b.com"));
    }

    #[tokio::test]
    async fn insert_conflict_on_id() {
        let repo = InMemoryRepository::new();
        repo.insert(mapping(0, "https://a.com")).await.unwrap();

        let err = repo.insert(mapping(0, "https://b.com")).await.unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn insert_conflict_on_url() {
        let repo = InMemoryRepository::new();
        repo.insert(mapping(0, "https://a.com")).await.unwrap();

        let err = repo.insert(mapping(1, "https://a.com")).await.unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
        assert!(repo.find_by_id(ShortId::new(1)).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_of_the_same_id_admit_one_winner() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..16u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(mapping(0, &format!("https://example{i}.com")))
                    .await
                    .is_ok()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.len(), 1);
    }
}
