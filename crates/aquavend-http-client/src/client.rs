//! HTTP client wrapper

use std::time::Duration;

use serde::Serialize;

use crate::error::HttpError;
use crate::request::RequestBuilder;
use crate::response::{RawResponse, Response};

/// HTTP client wrapper
///
/// Requests resolve as soon as the server answers: the status code is left
/// to the caller, see [`RawResponse`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create a new HTTP client without a request timeout
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Create a new HTTP client builder
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// GET `url`
    pub async fn get_raw(&self, url: &str) -> Response<RawResponse> {
        let response = self.inner.get(url).send().await?;
        Ok(RawResponse::new(response))
    }

    /// POST `body` as JSON to `url`
    pub async fn post_json_raw<B>(&self, url: &str, body: &B) -> Response<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let response = self.inner.post(url).json(body).send().await?;
        Ok(RawResponse::new(response))
    }

    /// GET request builder, for requests carrying query parameters
    pub fn get(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.get(url))
    }
}

/// Builder for an [`HttpClient`] with a request timeout
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Abort requests that take longer than `timeout`
    ///
    /// Unset by default: a hung request waits on the transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the HTTP client
    pub fn build(self) -> Response<HttpClient> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let inner = builder.build()?;
        tracing::debug!("Built http client with timeout {:?}", self.timeout);

        Ok(HttpClient { inner })
    }
}
