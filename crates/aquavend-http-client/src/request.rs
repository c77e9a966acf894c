//! reqwest-based RequestBuilder implementation

use serde::Serialize;

use crate::request_builder_ext::RequestBuilderExt;
use crate::response::{RawResponse, Response};

/// HTTP request builder
#[derive(Debug)]
pub struct RequestBuilder {
    inner: reqwest::RequestBuilder,
}

impl RequestBuilder {
    pub(crate) fn new(inner: reqwest::RequestBuilder) -> Self {
        Self { inner }
    }
}

impl RequestBuilderExt for RequestBuilder {
    fn query<T: Serialize + ?Sized>(self, query: &T) -> Self {
        Self {
            inner: self.inner.query(query),
        }
    }

    async fn send(self) -> Response<RawResponse> {
        let response = self.inner.send().await?;
        Ok(RawResponse::new(response))
    }
}
