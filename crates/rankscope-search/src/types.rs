//! SerpAPI Google Maps response types.
//!
//! Only the fields the report uses are modeled; everything else in the
//! response is ignored by serde.

use serde::Deserialize;

/// Top-level body of a `search.json?engine=google_maps` response.
#[derive(Debug, Deserialize)]
pub struct MapsSearchResponse {
    /// Set instead of results when the search failed.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub local_results: Vec<LocalResult>,
}

/// One business in `local_results`.
#[derive(Debug, Deserialize)]
pub struct LocalResult {
    /// 1-based position in the map pack.
    #[serde(default)]
    pub position: Option<u32>,
    pub title: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews: Option<u32>,
}
