//! HTTP client for the TMDB catalog API.
//!
//! The only call the application makes is `GET /discover/tv`, paginated until
//! enough fresh series have been collected for a watchlist import.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::{header, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::models::SeriesSummary;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "fr-FR";
pub const DEFAULT_WATCH_REGION: &str = "US";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for talking to the TMDB API.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// TMDB v4 Read Access Token, sent as a bearer token. An empty value
    /// means the client is unconfigured and every fetch fails fast.
    pub read_access_token: String,
    /// BCP 47 tag for localized series names.
    pub language: String,
    /// Region whose provider availability is queried.
    pub watch_region: String,
    /// API root, overridable so tests can point at a local server.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            read_access_token: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            watch_region: DEFAULT_WATCH_REGION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not build the HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("TMDB read access token is not configured")]
    MissingToken,

    #[error("TMDB rejected the request (401)")]
    Unauthorized,

    #[error("TMDB returned HTTP {0}")]
    Status(StatusCode),

    #[error("TMDB did not respond before the timeout")]
    Timeout,

    #[error("network error reaching TMDB")]
    Network(#[source] reqwest::Error),

    #[error("TMDB response could not be decoded")]
    Decode(#[source] reqwest::Error),
}

/// Client for the TMDB discover endpoint.
pub struct CatalogClient {
    config: CatalogConfig,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Builds the underlying HTTP client with the configured timeout.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(CatalogError::Client)?;
        Ok(Self { config, client })
    }

    /// Fetches up to `limit` top-rated TV series available on the given watch
    /// provider, skipping any series whose id is in `excluded_ids`.
    ///
    /// Pages are requested one at a time, starting at page 1 and sorted by
    /// vote average, until the limit is reached or the catalog reports no
    /// further pages. Results keep the catalog's ranking order and contain no
    /// duplicate ids, even when the catalog repeats a series across pages.
    pub async fn fetch_top_rated_series(
        &self,
        provider_id: &str,
        limit: usize,
        excluded_ids: &HashSet<i64>,
    ) -> Result<Vec<SeriesSummary>, CatalogError> {
        if self.config.read_access_token.is_empty() {
            return Err(CatalogError::MissingToken);
        }

        let url = format!("{}/discover/tv", self.config.base_url.trim_end_matches('/'));
        let mut seen = excluded_ids.clone();
        let mut collected: Vec<SeriesSummary> = Vec::with_capacity(limit);
        let mut page: i64 = 1;
        let mut total_pages: i64 = 1;

        while collected.len() < limit && page <= total_pages {
            let page_param = page.to_string();
            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.config.read_access_token)
                .header(header::ACCEPT, "application/json")
                .query(&[
                    ("language", self.config.language.as_str()),
                    ("page", page_param.as_str()),
                    ("sort_by", "vote_average.desc"),
                    ("vote_count.gte", "500"),
                    ("watch_region", self.config.watch_region.as_str()),
                    ("with_watch_monetization_types", "flatrate"),
                    ("with_watch_providers", provider_id),
                ])
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        CatalogError::Timeout
                    } else {
                        CatalogError::Network(e)
                    }
                })?;

            match response.status() {
                StatusCode::UNAUTHORIZED => return Err(CatalogError::Unauthorized),
                status if !status.is_success() => return Err(CatalogError::Status(status)),
                _ => {}
            }

            let payload: DiscoverPage = response.json().await.map_err(|e| {
                if e.is_timeout() {
                    CatalogError::Timeout
                } else if e.is_decode() {
                    CatalogError::Decode(e)
                } else {
                    CatalogError::Network(e)
                }
            })?;

            // A missing, null or zero page count still permits the page we
            // just read, nothing more.
            total_pages = payload.total_pages.filter(|&n| n > 0).unwrap_or(1);

            for item in payload.results {
                let (id, name) = match (item.id, item.name) {
                    (Some(id), Some(name)) if id > 0 && !name.is_empty() => (id, name),
                    _ => continue,
                };
                if !seen.insert(id) {
                    continue;
                }
                collected.push(SeriesSummary { id, name });
                if collected.len() == limit {
                    break;
                }
            }

            page += 1;
        }

        Ok(collected)
    }
}

#[derive(Debug, Deserialize)]
struct DiscoverPage {
    #[serde(default)]
    results: Vec<DiscoverItem>,
    #[serde(default)]
    total_pages: Option<i64>,
}

/// One catalog entry. Both fields are optional because the discover payload
/// occasionally carries partial records; those are skipped during collection.
#[derive(Debug, Deserialize)]
struct DiscoverItem {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    name: Option<String>,
}
