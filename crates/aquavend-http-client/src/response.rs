//! HTTP response types

use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// Result of a request: the body type `R`, failing with `E`
pub type Response<R, E = HttpError> = Result<R, E>;

/// Response whose body has not been read yet
///
/// Reading the body never looks at the status, so a `404` carrying a JSON
/// error object decodes the same way as a `200`.
#[derive(Debug)]
pub struct RawResponse {
    status: u16,
    inner: reqwest::Response,
}

impl RawResponse {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self {
            status: inner.status().as_u16(),
            inner,
        }
    }

    /// Status code sent by the server
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Read the body as text
    pub async fn text(self) -> Response<String> {
        Ok(self.inner.text().await?)
    }

    /// Read the body and parse it as JSON
    ///
    /// An empty or non-JSON body is a [`HttpError::Serialization`].
    pub async fn json<T: DeserializeOwned>(self) -> Response<T> {
        let body = self.inner.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
