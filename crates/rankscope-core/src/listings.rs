//! Search-side domain types: coordinates, grid points, and the listings a
//! provider returns for one (query, zone) search.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Stable label for one grid sample location, e.g. `"NE"` or `"R1C2"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One geographic sample location searched for a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub lat: f64,
    pub lng: f64,
    pub zone: ZoneId,
}

impl GridPoint {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// A business listing returned by a single provider search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingResult {
    /// Business display name, exactly as the provider returned it.
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Star rating, typically in `[1.0, 5.0]`.
    pub rating: Option<f64>,
    /// Review count backing `rating`.
    pub reviews: Option<u32>,
    /// 1-based position within the results of the search that produced it.
    ///
    /// Only meaningful relative to other listings from the same (query, zone).
    pub rank: u32,
    /// Zone of the grid point whose search produced this listing.
    pub zone: ZoneId,
}

impl ListingResult {
    /// Case-insensitive name comparison used for identity across searches.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
