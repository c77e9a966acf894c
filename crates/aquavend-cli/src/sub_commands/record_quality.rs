//! `record-quality` command

use anyhow::Result;
use aquavend::{MachineConnector, MachineId, WaterQuality, WaterQualityReading};
use clap::Args;

/// Record a water quality measurement
#[derive(Args, Debug)]
pub struct RecordQualitySubCommand {
    /// Total dissolved solids in ppm
    #[arg(long)]
    tds: f64,
    /// pH level
    #[arg(long)]
    ph: f64,
    /// Water level in percent
    #[arg(long)]
    water_level: f64,
    /// Machine id, defaults to the configured machine
    #[arg(long)]
    machine_id: Option<String>,
}

impl RecordQualitySubCommand {
    /// Measurement for `machine_id`, or the configured machine when `None`
    pub fn new(tds: f64, ph: f64, water_level: f64, machine_id: Option<String>) -> Self {
        Self {
            tds,
            ph,
            water_level,
            machine_id,
        }
    }
}

/// Submit the measurement and return the stored record
pub async fn record_quality(
    connector: &dyn MachineConnector,
    default_machine_id: &MachineId,
    sub_command_args: &RecordQualitySubCommand,
) -> Result<WaterQuality> {
    let machine_id = sub_command_args
        .machine_id
        .clone()
        .map(MachineId::from)
        .unwrap_or_else(|| default_machine_id.clone());

    let reading = WaterQualityReading {
        tds_level: sub_command_args.tds,
        ph_level: sub_command_args.ph,
        water_level: sub_command_args.water_level,
    };

    let stored = connector.submit_quality(&machine_id, &reading).await?;

    println!(
        "Recorded quality for {machine_id}: tds={} ph={} water={}%",
        stored.tds_level, stored.ph_level, stored.water_level
    );

    Ok(stored)
}
