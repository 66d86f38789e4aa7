//! Catalog data acquisition for dexcat.
//!
//! This module fetches, de-duplicates, caches and assembles entity records
//! from the remote catalog service.

mod cache;
mod client;
mod error;
mod fetcher;
mod page;
mod session;
mod similar;
mod types;
mod util;

#[cfg(test)]
mod fixtures;

pub use self::cache::EntityCache;
pub use self::client::{create_http_client, CatalogClient};
pub use self::error::{CatalogError, CatalogResult};
pub use self::fetcher::EntityFetcher;
pub use self::page::{page_offset, PageDescriptor, PageFetcher};
pub use self::session::{CatalogSession, EntityDetail};
pub use self::similar::{collect_candidates, SimilarityResolver};
pub use self::types::*;
pub use self::util::entity_id_from_url;
