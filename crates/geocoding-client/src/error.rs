use thiserror::Error;

/// Errors returned by the geocoding client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The supplied country code is not exactly two alphabetic characters.
    #[error("the format of the country code (`{0}`) is invalid")]
    InvalidFormat(String),

    /// The country code is well-formed but names no known region.
    #[error("country code `{0}` does not exist")]
    UnknownCountry(String),

    /// The request never produced a usable HTTP response.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a status other than `"OK"`.
    #[error("geocoding request unsuccessful: {0}")]
    RequestUnsuccessful(String),

    /// The API answered `"OK"` but returned no results.
    #[error("geocoding returned no results")]
    NoResults,

    /// The response body could not be deserialized into the expected envelope.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures of the HTTP collaborator.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network, TLS, timeout or body-read failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}
