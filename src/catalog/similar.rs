//! "Similar entries" assembled from category membership.
//!
//! The remote service has no similarity endpoint, so similarity is derived:
//! every category the source belongs to is listed, members are de-duplicated
//! by id against a seen-set seeded with the source, and the survivors are
//! resolved through the entity cache.
//!
//! Requests are launched together and joined; the join is the ordering
//! boundary. Output order is always tag order (as listed on the source), then
//! member order (as listed by the category endpoint), however the individual
//! requests happen to complete.

use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::{CatalogError, CatalogResult};
use super::fetcher::EntityFetcher;
use super::types::{EntityId, EntityKey, EntityRecord, NamedRef};
use super::util::entity_id_from_url;
use crate::TARGET_WEB_REQUEST;

#[derive(Clone, Debug)]
pub struct SimilarityResolver {
    fetcher: EntityFetcher,
    max_in_flight: usize,
}

impl SimilarityResolver {
    pub fn new(fetcher: EntityFetcher, max_in_flight: usize) -> Self {
        Self {
            fetcher,
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// Returns up to `limit` records sharing a category with `source`, never
    /// including `source` itself.
    ///
    /// Any failed category listing or member resolution fails the whole call.
    pub async fn resolve_similar(
        &self,
        source: &EntityRecord,
        limit: usize,
    ) -> CatalogResult<Vec<Arc<EntityRecord>>> {
        let client = self.fetcher.client();

        // Category lists are not entity records, so they bypass the cache.
        let listings: Vec<Vec<NamedRef>> = stream::iter(
            source
                .category_tags
                .iter()
                .map(|tag| client.fetch_category(*tag)),
        )
        .buffered(self.max_in_flight)
        .try_collect::<Vec<_>>()
        .await?;

        let candidates = collect_candidates(source.id, &listings)?;
        debug!(target: TARGET_WEB_REQUEST, "Entity {} has {} similarity candidates across {} categories", source.id, candidates.len(), listings.len());

        let fetcher = &self.fetcher;
        let mut similar: Vec<Arc<EntityRecord>> = stream::iter(candidates)
            .map(|id| async move { fetcher.resolve(&EntityKey::Id(id)).await })
            .buffered(self.max_in_flight)
            .try_collect::<Vec<_>>()
            .await
            .map_err(CatalogError::into_listing_failure)?;

        similar.truncate(limit);
        info!(target: TARGET_WEB_REQUEST, "Resolved {} similar entries for {}", similar.len(), source.name);
        Ok(similar)
    }
}

/// Flattens category listings into unseen member ids, in accumulation order.
///
/// The seen-set starts with `source_id`, so the source can never be a candidate.
pub fn collect_candidates(
    source_id: EntityId,
    listings: &[Vec<NamedRef>],
) -> CatalogResult<Vec<EntityId>> {
    let mut seen: HashSet<EntityId> = HashSet::from([source_id]);
    let mut candidates = Vec::new();

    for member in listings.iter().flatten() {
        let id = entity_id_from_url(&member.url)?;
        if seen.insert(id) {
            candidates.push(id);
        }
    }
    Ok(candidates)
}
