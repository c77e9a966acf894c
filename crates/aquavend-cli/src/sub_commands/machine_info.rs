//! `machine` command

use std::fmt;

use anyhow::Result;
use aquavend::{HttpClient, MachineConnector, MachineId, VendingMachine};
use clap::Args;

/// Show a single machine
#[derive(Args, Debug)]
pub struct MachineInfoSubCommand {
    /// Machine id, defaults to the configured machine
    machine_id: Option<String>,
    /// Print the backend json as is
    #[arg(long)]
    raw: bool,
}

impl MachineInfoSubCommand {
    /// Show `machine_id`, or the configured machine when `None`
    pub fn new(machine_id: Option<String>, raw: bool) -> Self {
        Self { machine_id, raw }
    }
}

/// Print the machine and return what was printed
pub async fn machine_info(
    client: &HttpClient,
    default_machine_id: &MachineId,
    sub_command_args: &MachineInfoSubCommand,
) -> Result<String> {
    let machine_id = sub_command_args
        .machine_id
        .clone()
        .map(MachineId::from)
        .unwrap_or_else(|| default_machine_id.clone());

    let output = if sub_command_args.raw {
        let machine = client.get_machine_detail(machine_id).await?;
        format!("{}\n", serde_json::to_string_pretty(&machine)?)
    } else {
        let machine = client.machine(&machine_id).await?;
        MachineCard(&machine).to_string()
    };

    print!("{output}");

    Ok(output)
}

/// Multi line description of one machine
#[derive(Debug)]
pub struct MachineCard<'a>(pub &'a VendingMachine);

impl fmt::Display for MachineCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let machine = self.0;
        writeln!(f, "Machine:      {} ({})", machine.name, machine.machine_id)?;
        writeln!(f, "Location:     {}", machine.location)?;
        writeln!(f, "Status:       {}", machine.status)?;
        if let Some(installed) = &machine.installation_date {
            writeln!(f, "Installed:    {installed}")?;
        }
        writeln!(
            f,
            "Maintenance:  {}",
            machine.last_maintenance.as_deref().unwrap_or("never")
        )?;
        match &machine.latest_quality {
            Some(quality) => {
                writeln!(f, "TDS:          {} ppm", quality.tds_level)?;
                writeln!(f, "pH:           {}", quality.ph_level)?;
                writeln!(f, "Water level:  {}%", quality.water_level)?;
            }
            None => writeln!(f, "Quality:      no data")?,
        }
        writeln!(f, "Sold today:   {} ml", machine.total_sales_today)
    }
}
