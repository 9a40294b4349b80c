//! Listings search for rankscope reports.
//!
//! Defines the provider and geocoder seams, a SerpAPI Google Maps provider,
//! a fixed-point geocoder, and the executor that runs every grid-point search
//! for a report while tolerating individual failures.

pub mod error;
pub mod executor;
pub mod provider;
pub mod serpapi;
pub mod types;

pub use error::{GeocodeError, ProviderError};
pub use executor::{execute_searches, ExecutorOptions, SearchBatch};
pub use provider::{FixedGeocoder, Geocoder, ListingsProvider, SearchRequest, DEFAULT_COORDINATES};
pub use serpapi::SerpApiClient;
