//! Water vending machine backend client
//!
//! [`HttpClient`] exposes two layers over the backend REST API:
//!
//! - raw operations ([`HttpClient::get_machines`], [`HttpClient::get_machine_detail`],
//!   [`HttpClient::record_quality`], [`HttpClient::record_sale`]) that forward payloads
//!   verbatim and return whatever json the backend answers, whatever the status code;
//! - typed operations through [`MachineConnector`] that decode the backend models and
//!   turn failing status codes into [`Error::Backend`].
//!
//! ```no_run
//! use aquavend::HttpClient;
//! use serde_json::json;
//!
//! async fn example() -> Result<(), aquavend::HttpError> {
//!     let client = HttpClient::new();
//!     let machines = client.get_machines().await?;
//!     let recorded = client
//!         .record_quality("VM001", &json!({"tds_level": 80.0, "ph_level": 7.2, "water_level": 55.0}))
//!         .await?;
//!     println!("{machines} {recorded}");
//!     Ok(())
//! }
//! ```

pub mod base_url;
pub mod connector;
pub mod error;
pub mod http_client;
pub mod types;

pub use aquavend_http_client::HttpError;
pub use base_url::{BaseUrl, DEFAULT_BASE_URL};
pub use connector::MachineConnector;
pub use error::{Error, ErrorResponse};
pub use http_client::HttpClient;
pub use types::{
    HistoryRange, MachineFilter, MachineId, MachineStatus, SaleReading, SalesRecord,
    VendingMachine, WaterQuality, WaterQualityReading,
};
