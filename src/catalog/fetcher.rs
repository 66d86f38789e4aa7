//! Cache-aware resolution of single entities.

use std::sync::Arc;
use tracing::debug;

use super::cache::EntityCache;
use super::client::CatalogClient;
use super::error::CatalogResult;
use super::types::{EntityKey, EntityRecord};
use crate::TARGET_WEB_REQUEST;

/// Resolves entities by id or name, consulting the shared cache first.
#[derive(Clone, Debug)]
pub struct EntityFetcher {
    client: CatalogClient,
    cache: EntityCache,
}

impl EntityFetcher {
    pub fn new(client: CatalogClient, cache: EntityCache) -> Self {
        Self { client, cache }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub fn cache(&self) -> &EntityCache {
        &self.cache
    }

    /// Returns the record for `key`, issuing at most one request on a cache miss.
    ///
    /// Nothing is cached on failure, and no retry is attempted.
    pub async fn resolve(&self, key: &EntityKey) -> CatalogResult<Arc<EntityRecord>> {
        if let Some(record) = self.cache.get(key) {
            debug!(target: TARGET_WEB_REQUEST, "Cache hit for {}", key);
            return Ok(record);
        }

        debug!(target: TARGET_WEB_REQUEST, "Cache miss for {}, fetching", key);
        let record = self.client.fetch_entity(key).await?;
        Ok(self.cache.put_aliased(key.clone(), Arc::new(record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::error::CatalogError;
    use crate::catalog::fixtures::{config_for, mock_entity};

    async fn fetcher_for(server: &mockito::ServerGuard) -> EntityFetcher {
        let client = CatalogClient::new(&config_for(server)).unwrap();
        EntityFetcher::new(client, EntityCache::new())
    }

    #[tokio::test]
    async fn test_second_resolve_hits_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = mock_entity(&mut server, "pikachu", 25, "pikachu", &["electric"], 1).await;
        let fetcher = fetcher_for(&server).await;

        let first = fetcher.resolve(&EntityKey::name("pikachu")).await.unwrap();
        let second = fetcher.resolve(&EntityKey::name("pikachu")).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_id_and_name_resolve_to_equal_records() {
        let mut server = mockito::Server::new_async().await;
        let by_name = mock_entity(&mut server, "bulbasaur", 1, "bulbasaur", &["grass", "poison"], 1).await;
        let by_id = mock_entity(&mut server, "1", 1, "bulbasaur", &["grass", "poison"], 0).await;
        let fetcher = fetcher_for(&server).await;

        let named = fetcher.resolve(&EntityKey::name("bulbasaur")).await.unwrap();
        let numbered = fetcher.resolve(&EntityKey::Id(1)).await.unwrap();

        assert_eq!(*named, *numbered);
        by_name.assert_async().await;
        by_id.assert_async().await;
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/pokemon/nobody")
            .with_status(404)
            .expect(2)
            .create_async()
            .await;
        let fetcher = fetcher_for(&server).await;

        for _ in 0..2 {
            let err = fetcher.resolve(&EntityKey::name("nobody")).await.unwrap_err();
            assert!(matches!(err, CatalogError::NotFound { .. }));
        }
        assert!(fetcher.cache().is_empty());
        mock.assert_async().await;
    }
}
