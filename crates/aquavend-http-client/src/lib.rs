//! HTTP client abstraction for aquavend
//!
//! This crate wraps `reqwest` so the machine API client and the CLI do not
//! talk to the HTTP library directly.
//!
//! # Example
//!
//! ```no_run
//! use aquavend_http_client::{HttpClient, Response};
//! use serde_json::Value;
//!
//! async fn example() -> Response<Value> {
//!     let client = HttpClient::new();
//!     let response = client.get_raw("http://localhost:8000/api/machines/").await?;
//!     response.json().await
//! }
//! ```

mod client;
mod error;
mod request;
mod request_builder_ext;
mod response;

pub use client::{HttpClient, HttpClientBuilder};
pub use error::HttpError;
pub use request::RequestBuilder;
pub use request_builder_ext::RequestBuilderExt;
pub use response::{RawResponse, Response};
