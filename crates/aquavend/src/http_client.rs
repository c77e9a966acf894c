//! Http client for the machine API

use aquavend_http_client::{HttpClient as HttpClientCore, RawResponse, RequestBuilderExt, Response};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::base_url::BaseUrl;
use crate::connector::MachineConnector;
use crate::error::{Error, ErrorResponse};
use crate::types::{
    HistoryRange, MachineFilter, MachineId, SaleReading, SalesRecord, VendingMachine,
    WaterQuality, WaterQualityReading,
};

/// Http Client
///
/// Holds nothing but the base url and a connection pool, so clones are cheap
/// and every call is independent of the others.
#[derive(Debug, Clone)]
pub struct HttpClient {
    core: HttpClientCore,
    base_url: BaseUrl,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create new [`HttpClient`] for the default local backend
    pub fn new() -> Self {
        Self::with_base_url(BaseUrl::default())
    }

    /// Create new [`HttpClient`] for the backend at `base_url`
    pub fn with_base_url(base_url: BaseUrl) -> Self {
        Self::with_core(base_url, HttpClientCore::new())
    }

    /// Create new [`HttpClient`] on top of a configured transport
    pub fn with_core(base_url: BaseUrl, core: HttpClientCore) -> Self {
        Self { core, base_url }
    }

    /// Base url requests are sent to
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Get all machines as raw json
    ///
    /// The status code is not checked: any json body is returned as is.
    #[instrument(skip(self))]
    pub async fn get_machines(&self) -> Response<Value> {
        let url = self.base_url.join_paths(&["machines"]);

        self.get_value(&url)
            .await
            .inspect_err(|err| tracing::error!("Error fetching machines: {}", err))
    }

    /// Get a single machine as raw json
    #[instrument(skip_all)]
    pub async fn get_machine_detail<I>(&self, machine_id: I) -> Response<Value>
    where
        I: Into<MachineId>,
    {
        let machine_id = machine_id.into();
        let url = self.base_url.join_paths(&["machines", machine_id.as_str()]);

        self.get_value(&url)
            .await
            .inspect_err(|err| tracing::error!("Error fetching machine detail: {}", err))
    }

    /// Forward a water quality payload verbatim
    #[instrument(skip_all)]
    pub async fn record_quality<I, B>(&self, machine_id: I, quality_data: &B) -> Response<Value>
    where
        I: Into<MachineId>,
        B: Serialize + ?Sized,
    {
        let machine_id = machine_id.into();
        let url = self
            .base_url
            .join_paths(&["machines", machine_id.as_str(), "record_quality"]);

        self.post_value(&url, quality_data)
            .await
            .inspect_err(|err| tracing::error!("Error recording quality: {}", err))
    }

    /// Forward a sale payload verbatim
    #[instrument(skip_all)]
    pub async fn record_sale<I, B>(&self, machine_id: I, sale_data: &B) -> Response<Value>
    where
        I: Into<MachineId>,
        B: Serialize + ?Sized,
    {
        let machine_id = machine_id.into();
        let url = self
            .base_url
            .join_paths(&["machines", machine_id.as_str(), "record_sale"]);

        self.post_value(&url, sale_data)
            .await
            .inspect_err(|err| tracing::error!("Error recording sale: {}", err))
    }

    async fn get_value(&self, url: &str) -> Response<Value> {
        self.core.get_raw(url).await?.json().await
    }

    async fn post_value<B>(&self, url: &str, body: &B) -> Response<Value>
    where
        B: Serialize + ?Sized,
    {
        self.core.post_json_raw(url, body).await?.json().await
    }
}

async fn decode<R>(response: RawResponse) -> Result<R, Error>
where
    R: DeserializeOwned,
{
    if !response.is_success() {
        let status = response.status();
        let body = response.text().await?;
        return Err(Error::Backend {
            status,
            message: ErrorResponse::from_body(&body).error,
        });
    }

    response.json().await.map_err(|err| {
        tracing::warn!("Http Response error: {}", err);
        err.into()
    })
}

#[async_trait]
impl MachineConnector for HttpClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn machines(&self, filter: &MachineFilter) -> Result<Vec<VendingMachine>, Error> {
        let url = self.base_url.join_paths(&["machines"]);

        let result: Result<Vec<VendingMachine>, Error> = async {
            let response = self.core.get(&url).query(filter).send().await?;
            decode(response).await
        }
        .await;

        result.inspect_err(|err| tracing::error!("Error fetching machines: {}", err))
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn machine(&self, machine_id: &MachineId) -> Result<VendingMachine, Error> {
        let url = self.base_url.join_paths(&["machines", machine_id.as_str()]);

        let result: Result<VendingMachine, Error> =
            async { decode(self.core.get_raw(&url).await?).await }.await;

        result.inspect_err(|err| tracing::error!("Error fetching machine detail: {}", err))
    }

    #[instrument(skip(self, reading), fields(base_url = %self.base_url))]
    async fn submit_quality(
        &self,
        machine_id: &MachineId,
        reading: &WaterQualityReading,
    ) -> Result<WaterQuality, Error> {
        let url = self
            .base_url
            .join_paths(&["machines", machine_id.as_str(), "record_quality"]);

        let result: Result<WaterQuality, Error> = async {
            let response = self.core.post_json_raw(&url, reading).await?;
            decode(response).await
        }
        .await;

        result.inspect_err(|err| tracing::error!("Error recording quality: {}", err))
    }

    #[instrument(skip(self, sale), fields(base_url = %self.base_url))]
    async fn submit_sale(
        &self,
        machine_id: &MachineId,
        sale: &SaleReading,
    ) -> Result<SalesRecord, Error> {
        let url = self
            .base_url
            .join_paths(&["machines", machine_id.as_str(), "record_sale"]);

        let result: Result<SalesRecord, Error> = async {
            let response = self.core.post_json_raw(&url, sale).await?;
            decode(response).await
        }
        .await;

        result.inspect_err(|err| tracing::error!("Error recording sale: {}", err))
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn quality_history(
        &self,
        machine_id: &MachineId,
        range: &HistoryRange,
    ) -> Result<Vec<WaterQuality>, Error> {
        let url = self
            .base_url
            .join_paths(&["machines", machine_id.as_str(), "quality_history"]);

        let result: Result<Vec<WaterQuality>, Error> = async {
            let response = self.core.get(&url).query(range).send().await?;
            decode(response).await
        }
        .await;

        result.inspect_err(|err| tracing::error!("Error fetching quality history: {}", err))
    }
}
