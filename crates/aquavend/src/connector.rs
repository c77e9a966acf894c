//! Machine connector

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::Error;
use crate::types::{
    HistoryRange, MachineFilter, MachineId, SaleReading, SalesRecord, VendingMachine,
    WaterQuality, WaterQualityReading,
};

/// Interface that connects a caller to the machine backend. Typically represents an
/// [`HttpClient`](crate::HttpClient).
#[async_trait]
pub trait MachineConnector: Debug + Send + Sync {
    /// List machines matching `filter`
    async fn machines(&self, filter: &MachineFilter) -> Result<Vec<VendingMachine>, Error>;
    /// Get a single machine
    async fn machine(&self, machine_id: &MachineId) -> Result<VendingMachine, Error>;
    /// Record a water quality measurement
    async fn submit_quality(
        &self,
        machine_id: &MachineId,
        reading: &WaterQualityReading,
    ) -> Result<WaterQuality, Error>;
    /// Record a sale
    async fn submit_sale(
        &self,
        machine_id: &MachineId,
        sale: &SaleReading,
    ) -> Result<SalesRecord, Error>;
    /// Water quality records of a machine, oldest first
    async fn quality_history(
        &self,
        machine_id: &MachineId,
        range: &HistoryRange,
    ) -> Result<Vec<WaterQuality>, Error>;
}
