//! Error types for catalog acquisition.

use thiserror::Error;

use super::types::EntityKey;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A single-entity lookup answered with a non-success status.
    #[error("No entity found for '{key}' ({url})")]
    NotFound { key: EntityKey, url: String },

    /// Transport failure or non-success status on an index, category or page request.
    #[error("Request to {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    /// A payload or reference URL did not have the expected shape.
    #[error("Failed to decode {context}: {reason}")]
    Decode { context: String, reason: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Config { var: String, reason: String },
}

impl CatalogError {
    pub(crate) fn decode(context: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        CatalogError::Decode {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// Re-labels a missing entity as a fetch failure.
    ///
    /// Inside a listing (page assembly, similarity) a referenced entity that
    /// cannot be resolved is a broken listing, not an empty search result.
    pub fn into_listing_failure(self) -> Self {
        match self {
            CatalogError::NotFound { key, url } => CatalogError::Fetch {
                url,
                reason: format!("listed entity '{}' could not be resolved", key),
            },
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}
