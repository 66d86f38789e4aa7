//! HTTP client creation and request handling for the remote catalog service.

use reqwest::header;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::error::{CatalogError, CatalogResult};
use super::types::{
    CategoryTag, EntityKey, EntityRecord, NamedRef, RawCategory, RawEntity, RawIndexPage,
};
use crate::environment::CatalogConfig;
use crate::TARGET_WEB_REQUEST;

const INDEX_PATH: &str = "pokemon";
const ENTITY_PATH: &str = "pokemon";
const CATEGORY_PATH: &str = "type";

/// Thin wrapper over a shared `reqwest::Client` that knows the catalog's endpoints.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

/// Create the HTTP client used for every request of a session
pub fn create_http_client(config: &CatalogConfig) -> CatalogResult<reqwest::Client> {
    debug!(target: TARGET_WEB_REQUEST, "Creating HTTP client with timeout {:?}", config.request_timeout);
    reqwest::Client::builder()
        .gzip(true)
        .timeout(config.request_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CatalogError::Config {
            var: "http client".to_string(),
            reason: e.to_string(),
        })
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        Ok(Self {
            http: create_http_client(config)?,
            base_url: config.base_url.clone(),
        })
    }

    pub fn entity_url(&self, key: &EntityKey) -> CatalogResult<Url> {
        self.endpoint(&[ENTITY_PATH, &key.to_string()])
    }

    pub fn index_url(&self, limit: u32, offset: u32) -> CatalogResult<Url> {
        let mut url = self.endpoint(&[INDEX_PATH])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        Ok(url)
    }

    pub fn category_url(&self, tag: CategoryTag) -> CatalogResult<Url> {
        self.endpoint(&[CATEGORY_PATH, tag.as_str()])
    }

    /// Fetches a single entity. A non-success status means the entity does not exist.
    pub async fn fetch_entity(&self, key: &EntityKey) -> CatalogResult<EntityRecord> {
        let url = self.entity_url(key)?;
        let response = self.send(&url).await?;

        if !response.status().is_success() {
            debug!(target: TARGET_WEB_REQUEST, "Entity lookup {} answered {}", url, response.status());
            return Err(CatalogError::NotFound {
                key: key.clone(),
                url: url.to_string(),
            });
        }

        let raw: RawEntity = read_json(&url, response).await?;
        EntityRecord::try_from(raw)
    }

    /// Fetches one page of the index as an ordered list of `{name, url}` summaries.
    pub async fn fetch_index(&self, limit: u32, offset: u32) -> CatalogResult<Vec<NamedRef>> {
        let url = self.index_url(limit, offset)?;
        let response = self.send_expecting_success(&url).await?;
        let page: RawIndexPage = read_json(&url, response).await?;
        debug!(target: TARGET_WEB_REQUEST, "Index page at offset {} returned {} of {} entries", offset, page.results.len(), page.count);
        Ok(page.results)
    }

    /// Fetches the membership list of a category, in the order the service returns it.
    pub async fn fetch_category(&self, tag: CategoryTag) -> CatalogResult<Vec<NamedRef>> {
        let url = self.category_url(tag)?;
        let response = self.send_expecting_success(&url).await?;
        let category: RawCategory = read_json(&url, response).await?;
        debug!(target: TARGET_WEB_REQUEST, "Category {} lists {} members", tag, category.members.len());
        Ok(category.members.into_iter().map(|m| m.entity).collect())
    }

    fn endpoint(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::Config {
                var: "DEXCAT_BASE_URL".to_string(),
                reason: format!("'{}' cannot be used as a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, url: &Url) -> CatalogResult<reqwest::Response> {
        debug!(target: TARGET_WEB_REQUEST, "GET {}", url);
        self.http
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(target: TARGET_WEB_REQUEST, "Request to {} failed: {}", url, e);
                CatalogError::Fetch {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            })
    }

    async fn send_expecting_success(&self, url: &Url) -> CatalogResult<reqwest::Response> {
        let response = self.send(url).await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            warn!(target: TARGET_WEB_REQUEST, "Non-success status {} from {}", response.status(), url);
            Err(CatalogError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP status {}", response.status()),
            })
        }
    }
}

async fn read_json<T: DeserializeOwned>(url: &Url, response: reqwest::Response) -> CatalogResult<T> {
    let body = response.text().await.map_err(|e| CatalogError::Fetch {
        url: url.to_string(),
        reason: format!("failed to read response body: {}", e),
    })?;
    serde_json::from_str(&body).map_err(|e| CatalogError::decode(format!("payload from {}", url), e))
}
