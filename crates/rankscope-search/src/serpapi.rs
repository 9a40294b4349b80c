//! HTTP client for the SerpAPI Google Maps engine.
//!
//! Wraps `reqwest` with SerpAPI-specific URL construction, API key handling,
//! and typed response parsing. A top-level `"error"` in the body surfaces as
//! [`ProviderError::Api`] regardless of HTTP status.

use std::time::Duration;

use rankscope_core::{AppConfig, ListingResult};
use reqwest::{Client, Url};

use crate::error::ProviderError;
use crate::provider::{ListingsProvider, SearchRequest};
use crate::types::{LocalResult, MapsSearchResponse};

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";

/// Map zoom used for every grid-point search. 14z covers a few miles.
const MAP_ZOOM: u8 = 14;

/// SerpAPI-backed [`ListingsProvider`].
///
/// Use [`SerpApiClient::new`] for production or [`SerpApiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SerpApiClient {
    /// Creates a client pointed at the production SerpAPI endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client from application config.
    ///
    /// # Errors
    ///
    /// Same as [`SerpApiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::with_base_url(
            &config.serpapi_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.serpapi_base_url,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ProviderError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join("search.json")` appends instead
        // of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ProviderError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches the map pack for one request and converts it into listings.
    ///
    /// Listings are stamped with the request's zone. A result without a
    /// `position` is ranked by its index in `local_results`.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Api`] if the body carries an `"error"` message.
    /// - [`ProviderError::UnexpectedStatus`] for other non-2xx responses.
    /// - [`ProviderError::Http`] on network failure.
    /// - [`ProviderError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_local(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<ListingResult>, ProviderError> {
        let url = self.build_url(request);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let context = format!(
            "google_maps(q={}, zone={})",
            request.query, request.grid_point.zone
        );
        let parsed: Result<MapsSearchResponse, _> = serde_json::from_str(&body);
        let payload = match parsed {
            Ok(payload) => payload,
            Err(_) if !status.is_success() => {
                return Err(ProviderError::UnexpectedStatus {
                    status: status.as_u16(),
                })
            }
            Err(source) => return Err(ProviderError::Deserialize { context, source }),
        };

        if let Some(message) = payload.error {
            return Err(ProviderError::Api(message));
        }
        if !status.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        Ok(payload
            .local_results
            .into_iter()
            .enumerate()
            .map(|(idx, result)| to_listing(result, idx, request))
            .collect())
    }

    /// Builds the search URL with percent-encoded query parameters.
    fn build_url(&self, request: &SearchRequest) -> Url {
        let mut url = self
            .base_url
            .join("search.json")
            .unwrap_or_else(|_| self.base_url.clone());
        let ll = format!(
            "@{:.6},{:.6},{MAP_ZOOM}z",
            request.grid_point.lat, request.grid_point.lng
        );
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("engine", "google_maps");
            pairs.append_pair("type", "search");
            pairs.append_pair("q", &request.query);
            pairs.append_pair("ll", &ll);
            pairs.append_pair("api_key", &self.api_key);
        }
        url
    }
}

fn to_listing(result: LocalResult, idx: usize, request: &SearchRequest) -> ListingResult {
    let fallback_rank = u32::try_from(idx + 1).unwrap_or(u32::MAX);
    ListingResult {
        name: result.title,
        phone: result.phone.filter(|p| !p.trim().is_empty()),
        address: result.address,
        rating: result.rating,
        reviews: result.reviews,
        rank: result.position.unwrap_or(fallback_rank),
        zone: request.grid_point.zone.clone(),
    }
}

impl ListingsProvider for SerpApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<ListingResult>, ProviderError> {
        self.search_local(request).await
    }
}

#[cfg(test)]
#[path = "serpapi_test.rs"]
mod tests;
