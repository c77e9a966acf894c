//! Errors

use std::fmt;

use aquavend_http_client::HttpError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Aquavend Error
#[derive(Debug, Error)]
pub enum Error {
    /// Transport or decoding error
    #[error(transparent)]
    Http(#[from] HttpError),
    /// Backend answered with a non-success status
    #[error("Backend error ({status}): {message}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Backend error message
        message: String,
    },
    /// Unknown machine status
    #[error("Unknown machine status: `{0}`")]
    UnknownStatus(String),
}

/// Error body returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable description
    pub error: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl ErrorResponse {
    /// Error response from a response body
    ///
    /// Bodies that are not `{"error": ...}` (validation errors, html pages)
    /// are kept verbatim as the description.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(_) => Self {
                error: body.to_string(),
            },
        }
    }

    /// Error response from json Value
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<ErrorResponse>(value.clone()) {
            Ok(res) => res,
            Err(_) => Self {
                error: value.to_string(),
            },
        }
    }
}
