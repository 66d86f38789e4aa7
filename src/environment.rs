//! Runtime configuration, read from `DEXCAT_*` environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::catalog::{CatalogError, CatalogResult};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_PAGE_SIZE: u32 = 8;
pub const DEFAULT_TOTAL_COUNT: u32 = 1025;
pub const DEFAULT_SIMILAR_LIMIT: usize = 4;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

/// Settings shared by every component of a catalog session.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: Url,
    pub page_size: u32,
    pub total_count: u32,
    pub similar_limit: usize,
    pub request_timeout: Duration,
    /// Upper bound on concurrent requests during similarity fan-out.
    pub max_in_flight: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            page_size: DEFAULT_PAGE_SIZE,
            total_count: DEFAULT_TOTAL_COUNT,
            similar_limit: DEFAULT_SIMILAR_LIMIT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

impl CatalogConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> CatalogResult<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Unset variables fall back to their defaults; set but malformed
    /// variables are rejected.
    pub fn from_lookup<F>(lookup: F) -> CatalogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup("DEXCAT_BASE_URL") {
            Some(raw) => parse_base_url(&raw)?,
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| config_error("DEXCAT_BASE_URL", e))?,
        };

        let timeout_secs: u64 = parse_var(
            &lookup,
            "DEXCAT_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT.as_secs(),
        )?;

        let config = Self {
            base_url,
            page_size: parse_var(&lookup, "DEXCAT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            total_count: parse_var(&lookup, "DEXCAT_TOTAL_COUNT", DEFAULT_TOTAL_COUNT)?,
            similar_limit: parse_var(&lookup, "DEXCAT_SIMILAR_LIMIT", DEFAULT_SIMILAR_LIMIT)?,
            request_timeout: Duration::from_secs(timeout_secs),
            max_in_flight: parse_var(&lookup, "DEXCAT_MAX_IN_FLIGHT", DEFAULT_MAX_IN_FLIGHT)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the base URL, e.g. to point a session at a mirror or a mock server.
    pub fn with_base_url(mut self, raw: &str) -> CatalogResult<Self> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }

    fn validate(&self) -> CatalogResult<()> {
        if self.page_size == 0 {
            return Err(config_error("DEXCAT_PAGE_SIZE", "must be at least 1"));
        }
        if self.similar_limit == 0 {
            return Err(config_error("DEXCAT_SIMILAR_LIMIT", "must be at least 1"));
        }
        if self.max_in_flight == 0 {
            return Err(config_error("DEXCAT_MAX_IN_FLIGHT", "must be at least 1"));
        }
        if self.request_timeout.is_zero() {
            return Err(config_error("DEXCAT_REQUEST_TIMEOUT_SECS", "must be at least 1"));
        }
        Ok(())
    }
}

fn parse_base_url(raw: &str) -> CatalogResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| config_error("DEXCAT_BASE_URL", e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(config_error(
            "DEXCAT_BASE_URL",
            format!("unsupported scheme '{}'", other),
        )),
    }
}

fn parse_var<F, T>(lookup: &F, var: &str, default: T) -> CatalogResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| config_error(var, e))
        }
        _ => Ok(default),
    }
}

fn config_error(var: &str, reason: impl std::fmt::Display) -> CatalogError {
    CatalogError::Config {
        var: var.to_string(),
        reason: reason.to_string(),
    }
}
