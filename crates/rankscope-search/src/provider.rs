//! Seams to the external collaborators: the listings provider and the geocoder.

use std::future::Future;

use rankscope_core::{Coordinates, GridPoint, ListingResult};

use crate::error::{GeocodeError, ProviderError};

/// One location query against the listings provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    /// Free-text location of the business being reported on.
    pub location: String,
    pub grid_point: GridPoint,
}

/// Returns ranked business listings for a query at a grid point.
///
/// Implementations set each listing's `rank` to its 1-based position in the
/// provider's result order. The executor stamps `zone` from the request.
pub trait ListingsProvider: Sync {
    /// Runs one search.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] for any failed call; the executor records it
    /// and moves on.
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<Vec<ListingResult>, ProviderError>> + Send;
}

/// Resolves a street address to coordinates.
pub trait Geocoder: Sync {
    /// # Errors
    ///
    /// Returns [`GeocodeError`] when the address cannot be resolved.
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Coordinates, GeocodeError>> + Send;
}

/// Phoenix, AZ city center.
pub const DEFAULT_COORDINATES: Coordinates = Coordinates {
    lat: 33.448_4,
    lng: -112.074_0,
};

/// Geocoder that resolves every non-blank address to one configured point.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeocoder {
    coordinates: Coordinates,
}

impl FixedGeocoder {
    #[must_use]
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

impl Default for FixedGeocoder {
    fn default() -> Self {
        Self::new(DEFAULT_COORDINATES)
    }
}

impl Geocoder for FixedGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        if address.trim().is_empty() {
            return Err(GeocodeError::NotFound(address.to_string()));
        }
        Ok(self.coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_geocoder_defaults_to_phoenix() {
        let coords = FixedGeocoder::default()
            .geocode("123 Main St, Phoenix, AZ")
            .await
            .unwrap();
        assert!((coords.lat - 33.4484).abs() < 1e-9);
        assert!((coords.lng - -112.074).abs() < 1e-9);
    }

    #[tokio::test]
    async fn fixed_geocoder_returns_configured_point() {
        let geocoder = FixedGeocoder::new(Coordinates {
            lat: 35.2271,
            lng: -80.8431,
        });
        let coords = geocoder.geocode("Charlotte, NC").await.unwrap();
        assert!((coords.lat - 35.2271).abs() < 1e-9);
    }

    #[tokio::test]
    async fn fixed_geocoder_rejects_blank_address() {
        let err = FixedGeocoder::default().geocode("   ").await.unwrap_err();
        assert!(matches!(err, GeocodeError::NotFound(_)));
    }
}
