//! Utility functions for catalog reference handling.

use url::Url;

use super::error::{CatalogError, CatalogResult};
use super::types::EntityId;

/// Extracts the entity id from a reference URL.
///
/// The id is the last non-empty path segment, so both
/// `https://host/api/v2/pokemon/25/` and `https://host/api/v2/pokemon/25`
/// yield `25`. Fails with a decode error when the URL does not parse, has no
/// path segments, or the final segment is not a positive integer.
pub fn entity_id_from_url(reference: &str) -> CatalogResult<EntityId> {
    let context = format!("reference URL '{}'", reference);
    let parsed = Url::parse(reference).map_err(|e| CatalogError::decode(&context, e))?;

    let segment = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or_else(|| CatalogError::decode(&context, "no path segment"))?;

    match segment.parse::<EntityId>() {
        Ok(0) => Err(CatalogError::decode(&context, "id must be positive")),
        Ok(id) => Ok(id),
        Err(e) => Err(CatalogError::decode(
            &context,
            format!("segment '{}' is not an id: {}", segment, e),
        )),
    }
}
