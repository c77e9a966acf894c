//! `record-sale` command

use anyhow::Result;
use aquavend::{MachineConnector, MachineId, SaleReading, SalesRecord};
use clap::Args;

/// Record a sale
#[derive(Args, Debug)]
pub struct RecordSaleSubCommand {
    /// Dispensed volume in ml
    #[arg(long)]
    volume: i64,
    /// Price paid
    #[arg(long)]
    price: f64,
    /// Machine id, defaults to the configured machine
    #[arg(long)]
    machine_id: Option<String>,
}

impl RecordSaleSubCommand {
    /// Sale for `machine_id`, or the configured machine when `None`
    pub fn new(volume: i64, price: f64, machine_id: Option<String>) -> Self {
        Self {
            volume,
            price,
            machine_id,
        }
    }
}

/// Submit the sale and return the stored record
pub async fn record_sale(
    connector: &dyn MachineConnector,
    default_machine_id: &MachineId,
    sub_command_args: &RecordSaleSubCommand,
) -> Result<SalesRecord> {
    let machine_id = sub_command_args
        .machine_id
        .clone()
        .map(MachineId::from)
        .unwrap_or_else(|| default_machine_id.clone());

    let sale = SaleReading::new(sub_command_args.volume, sub_command_args.price);

    let stored = connector.submit_sale(&machine_id, &sale).await?;

    println!(
        "Recorded sale for {machine_id}: {}ml for {}",
        stored.volume, stored.price
    );

    Ok(stored)
}
