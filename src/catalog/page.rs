//! Paginated index resolution.

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::{CatalogError, CatalogResult};
use super::fetcher::EntityFetcher;
use super::types::{EntityKey, EntityRecord};
use crate::TARGET_WEB_REQUEST;

/// Fixed pagination geometry, derived once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    pub page_size: u32,
    pub total_count: u32,
    pub total_pages: u32,
}

impl PageDescriptor {
    pub fn new(page_size: u32, total_count: u32) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_count.div_ceil(page_size).max(1);
        Self {
            page_size,
            total_count,
            total_pages,
        }
    }

    /// Clamps a requested page number into `[1, total_pages]`.
    pub fn clamp(&self, page_number: u32) -> u32 {
        page_number.clamp(1, self.total_pages)
    }

    pub fn offset(&self, page_number: u32) -> u32 {
        page_offset(page_number, self.page_size)
    }
}

/// Zero-based index offset of a one-based page.
pub fn page_offset(page_number: u32, page_size: u32) -> u32 {
    page_number.saturating_sub(1).saturating_mul(page_size)
}

#[derive(Clone, Debug)]
pub struct PageFetcher {
    fetcher: EntityFetcher,
}

impl PageFetcher {
    pub fn new(fetcher: EntityFetcher) -> Self {
        Self { fetcher }
    }

    /// Resolves page `page_number` of the index into full records, in index order.
    ///
    /// Every summary is resolved concurrently by name through the cache. If any
    /// one of them fails the whole page fails; a partial page is never returned.
    pub async fn resolve_page(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> CatalogResult<Vec<Arc<EntityRecord>>> {
        let offset = page_offset(page_number, page_size);
        let summaries = self
            .fetcher
            .client()
            .fetch_index(page_size, offset)
            .await?;

        debug!(target: TARGET_WEB_REQUEST, "Resolving {} summaries for page {}", summaries.len(), page_number);

        let keys: Vec<EntityKey> = summaries.iter().map(|s| EntityKey::name(&s.name)).collect();
        let records = try_join_all(keys.iter().map(|key| self.fetcher.resolve(key)))
            .await
            .map_err(CatalogError::into_listing_failure)?;

        info!(target: TARGET_WEB_REQUEST, "Loaded page {} with {} entries", page_number, records.len());
        Ok(records)
    }
}
