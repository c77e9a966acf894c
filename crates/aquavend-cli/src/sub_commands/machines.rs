//! `machines` command

use std::fmt;

use anyhow::Result;
use aquavend::{HttpClient, MachineConnector, MachineFilter, MachineStatus, VendingMachine};
use clap::Args;

/// List machines, optionally filtered
#[derive(Args, Debug, Default)]
pub struct MachinesSubCommand {
    /// Only machines with this status (online, offline, maintenance, error)
    #[arg(long)]
    status: Option<MachineStatus>,
    /// Only machines at this location
    #[arg(long)]
    location: Option<String>,
    /// Print the backend json as is
    #[arg(long, conflicts_with_all = ["status", "location"])]
    raw: bool,
}

impl MachinesSubCommand {
    /// Typed listing with the given filters
    pub fn new(status: Option<MachineStatus>, location: Option<String>) -> Self {
        Self {
            status,
            location,
            raw: false,
        }
    }

    /// Listing that prints the backend json as is
    pub fn raw() -> Self {
        Self {
            raw: true,
            ..Default::default()
        }
    }
}

/// Print the machines and return what was printed
pub async fn machines(
    client: &HttpClient,
    sub_command_args: &MachinesSubCommand,
) -> Result<String> {
    let output = if sub_command_args.raw {
        let machines = client.get_machines().await?;
        format!("{}\n", serde_json::to_string_pretty(&machines)?)
    } else {
        let filter = MachineFilter {
            status: sub_command_args.status,
            location: sub_command_args.location.clone(),
        };

        let machines = client.machines(&filter).await?;
        MachineTable(&machines).to_string()
    };

    print!("{output}");

    Ok(output)
}

/// One line per machine followed by the online count
#[derive(Debug)]
pub struct MachineTable<'a>(pub &'a [VendingMachine]);

impl fmt::Display for MachineTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let machines = self.0;
        if machines.is_empty() {
            return writeln!(f, "No machines");
        }

        for (i, machine) in machines.iter().enumerate() {
            write!(
                f,
                "{i}: {} {} [{}] {}",
                machine.machine_id, machine.name, machine.status, machine.location
            )?;
            match &machine.latest_quality {
                Some(quality) => write!(
                    f,
                    " tds={} ph={} water={}%",
                    quality.tds_level, quality.ph_level, quality.water_level
                )?,
                None => write!(f, " no quality data")?,
            }
            writeln!(f, " sold_today={}ml", machine.total_sales_today)?;
        }

        let online = machines
            .iter()
            .filter(|machine| machine.status == MachineStatus::Online)
            .count();
        writeln!(f, "{online}/{} online", machines.len())
    }
}
