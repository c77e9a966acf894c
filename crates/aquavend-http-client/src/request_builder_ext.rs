//! HTTP RequestBuilder extension trait

use serde::Serialize;

use crate::response::{RawResponse, Response};

/// Requests that are assembled before being sent
pub trait RequestBuilderExt: Sized + Send {
    /// Append query string parameters
    ///
    /// `None` fields of a serialized struct are left out of the query.
    fn query<T: Serialize + ?Sized>(self, query: &T) -> Self;

    /// Send the request, leaving the status for the caller to inspect
    fn send(self) -> impl std::future::Future<Output = Response<RawResponse>> + Send;
}
