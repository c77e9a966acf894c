//! HTTP error types

use thiserror::Error;

/// Failure to get a usable body out of a request
///
/// A response with an error status is not an `HttpError`; see
/// [`RawResponse`](crate::RawResponse).
#[derive(Debug, Error)]
pub enum HttpError {
    /// Server could not be reached
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request did not complete within the client timeout
    #[error("Request timeout")]
    Timeout,
    /// Body is not valid JSON, or does not have the expected shape
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Client could not be built
    #[error("Client build error: {0}")]
    Build(String),
    /// Any other transport failure
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        match err {
            err if err.is_timeout() => Self::Timeout,
            err if err.is_connect() => Self::Connection(err.to_string()),
            err if err.is_builder() => Self::Build(err.to_string()),
            err if err.is_decode() => Self::Serialization(err.to_string()),
            err => Self::Other(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
