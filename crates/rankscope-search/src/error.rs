use thiserror::Error;

/// Errors from a single listings-provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with an `"error"` message in its JSON body.
    #[error("provider API error: {0}")]
    Api(String),

    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The call did not settle within the executor's per-call timeout.
    #[error("provider call timed out after {millis}ms")]
    Timeout { millis: u128 },

    #[error("invalid provider base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Errors from resolving an address to coordinates.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("no coordinates found for address '{0}'")]
    NotFound(String),

    #[error("geocoder unavailable: {0}")]
    Unavailable(String),
}
