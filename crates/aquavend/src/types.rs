//! Machine API types

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Machine identifier as used in endpoint paths
///
/// The backend looks machines up by their `machine_id` (e.g. `VM001`), but
/// numeric ids are accepted too. The value is placed in the url verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineId(String);

impl MachineId {
    /// Create new [`MachineId`]
    pub fn new<S>(id: S) -> Self
    where
        S: Into<String>,
    {
        Self(id.into())
    }

    /// Identifier as str
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MachineId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MachineId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&MachineId> for MachineId {
    fn from(id: &MachineId) -> Self {
        id.clone()
    }
}

macro_rules! machine_id_from_int {
    ($($int:ty),*) => {
        $(
            impl From<$int> for MachineId {
                fn from(id: $int) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

machine_id_from_int!(u32, u64, i32, i64);

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Machine status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineStatus {
    /// Online
    Online,
    /// Offline
    #[default]
    Offline,
    /// Under maintenance
    Maintenance,
    /// Error
    Error,
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineStatus::Online => write!(f, "online"),
            MachineStatus::Offline => write!(f, "offline"),
            MachineStatus::Maintenance => write!(f, "maintenance"),
            MachineStatus::Error => write!(f, "error"),
        }
    }
}

impl FromStr for MachineStatus {
    type Err = Error;

    fn from_str(status: &str) -> Result<Self, Self::Err> {
        match status.to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "maintenance" => Ok(Self::Maintenance),
            "error" => Ok(Self::Error),
            other => Err(Error::UnknownStatus(other.to_string())),
        }
    }
}

/// Stored water quality measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterQuality {
    /// Record id
    #[serde(default)]
    pub id: Option<u64>,
    /// Total dissolved solids in ppm
    pub tds_level: f64,
    /// pH level
    pub ph_level: f64,
    /// Water level in percent
    pub water_level: f64,
    /// Time the backend stored the record
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Water quality measurement to record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterQualityReading {
    /// Total dissolved solids in ppm
    pub tds_level: f64,
    /// pH level
    pub ph_level: f64,
    /// Water level in percent
    pub water_level: f64,
}

/// Stored sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Record id
    #[serde(default)]
    pub id: Option<u64>,
    /// Dispensed volume in ml
    pub volume: i64,
    /// Price as a decimal string, e.g. `"1.50"`
    pub price: String,
    /// Time the backend stored the record
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Sale to record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReading {
    /// Dispensed volume in ml
    pub volume: i64,
    /// Price as a decimal string
    pub price: String,
}

impl SaleReading {
    /// Create new [`SaleReading`], price rounded to two decimals
    pub fn new(volume: i64, price: f64) -> Self {
        Self {
            volume,
            price: format!("{price:.2}"),
        }
    }
}

/// Vending machine as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendingMachine {
    /// Database id
    pub id: u64,
    /// Public machine identifier
    pub machine_id: MachineId,
    /// Display name
    pub name: String,
    /// Installation location
    pub location: String,
    /// Current status
    #[serde(default)]
    pub status: MachineStatus,
    /// Last maintenance time
    #[serde(default)]
    pub last_maintenance: Option<String>,
    /// Installation time
    #[serde(default)]
    pub installation_date: Option<String>,
    /// Most recent water quality record
    #[serde(default)]
    pub latest_quality: Option<WaterQuality>,
    /// Volume sold today in ml
    #[serde(default)]
    pub total_sales_today: i64,
}

/// Filter for the machine list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MachineFilter {
    /// Only machines with this status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MachineStatus>,
    /// Only machines at this location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Time range of a quality history query
///
/// Both bounds are ISO-8601 datetimes. The backend returns the last 24 hours
/// when neither is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryRange {
    /// Range start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Range end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}
