//! Top-level catalog actions.
//!
//! A session owns the one `EntityCache` shared by every component and is the
//! boundary at which failures stop propagating: each action logs what went
//! wrong and hands back an empty result instead of an error.

use std::sync::Arc;
use tracing::{error, info, warn};

use super::cache::EntityCache;
use super::client::CatalogClient;
use super::error::CatalogResult;
use super::fetcher::EntityFetcher;
use super::page::{PageDescriptor, PageFetcher};
use super::similar::SimilarityResolver;
use super::types::{EntityKey, EntityRecord};
use crate::environment::CatalogConfig;

/// An entity together with its similar entries, as shown on a detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDetail {
    pub entity: Arc<EntityRecord>,
    pub similar: Vec<Arc<EntityRecord>>,
}

pub struct CatalogSession {
    config: CatalogConfig,
    descriptor: PageDescriptor,
    fetcher: EntityFetcher,
    pages: PageFetcher,
    similarity: SimilarityResolver,
}

impl CatalogSession {
    pub fn new(config: CatalogConfig) -> CatalogResult<Self> {
        let client = CatalogClient::new(&config)?;
        let fetcher = EntityFetcher::new(client, EntityCache::new());
        let descriptor = PageDescriptor::new(config.page_size, config.total_count);

        info!(
            "Catalog session against {} ({} pages of {})",
            config.base_url, descriptor.total_pages, descriptor.page_size
        );

        Ok(Self {
            pages: PageFetcher::new(fetcher.clone()),
            similarity: SimilarityResolver::new(fetcher.clone(), config.max_in_flight),
            fetcher,
            descriptor,
            config,
        })
    }

    pub fn descriptor(&self) -> &PageDescriptor {
        &self.descriptor
    }

    pub fn cache(&self) -> &EntityCache {
        self.fetcher.cache()
    }

    pub fn fetcher(&self) -> &EntityFetcher {
        &self.fetcher
    }

    pub fn pages(&self) -> &PageFetcher {
        &self.pages
    }

    pub fn similarity(&self) -> &SimilarityResolver {
        &self.similarity
    }

    /// Loads page `page_number`, clamped into the valid range.
    pub async fn load_page(&self, page_number: u32) -> Vec<Arc<EntityRecord>> {
        let page_number = self.descriptor.clamp(page_number);
        match self
            .pages
            .resolve_page(page_number, self.descriptor.page_size)
            .await
        {
            Ok(records) => records,
            Err(err) => {
                error!("Error fetching page {}: {}", page_number, err);
                Vec::new()
            }
        }
    }

    /// Looks an entity up by name or id. An empty term shows the first page.
    pub async fn search(&self, term: &str) -> Vec<Arc<EntityRecord>> {
        if term.trim().is_empty() {
            return self.load_page(1).await;
        }

        let key = match EntityKey::parse(term) {
            Ok(key) => key,
            Err(err) => {
                warn!("Ignoring search term '{}': {}", term, err);
                return Vec::new();
            }
        };

        match self.fetcher.resolve(&key).await {
            Ok(record) => vec![record],
            Err(err) if err.is_not_found() => {
                info!("No match for search term '{}'", key);
                Vec::new()
            }
            Err(err) => {
                error!("Error searching for '{}': {}", key, err);
                Vec::new()
            }
        }
    }

    /// Loads an entity and its similar entries.
    ///
    /// Returns `None` when the entity itself cannot be resolved. A failed
    /// similarity computation leaves the entity in place with no similar entries.
    pub async fn load_detail(&self, key: &str) -> Option<EntityDetail> {
        let key = match EntityKey::parse(key) {
            Ok(key) => key,
            Err(err) => {
                warn!("Ignoring detail key '{}': {}", key, err);
                return None;
            }
        };

        let entity = match self.fetcher.resolve(&key).await {
            Ok(record) => record,
            Err(err) => {
                error!("Error fetching details for '{}': {}", key, err);
                return None;
            }
        };

        let similar = match self
            .similarity
            .resolve_similar(&entity, self.config.similar_limit)
            .await
        {
            Ok(similar) => similar,
            Err(err) => {
                error!("Error fetching similar entries for '{}': {}", entity.name, err);
                Vec::new()
            }
        };

        Some(EntityDetail { entity, similar })
    }
}
