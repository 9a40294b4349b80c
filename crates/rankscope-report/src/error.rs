use rankscope_search::GeocodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Without coordinates there is no grid to search, so generation stops.
    #[error("address unresolved: '{address}': {source}")]
    AddressUnresolved {
        address: String,
        #[source]
        source: GeocodeError,
    },

    #[error("invalid report input: {0}")]
    InvalidInput(String),
}
