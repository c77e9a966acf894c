//! `quality-history` command

use std::fmt;

use anyhow::Result;
use aquavend::{HistoryRange, MachineConnector, MachineId, WaterQuality};
use clap::Args;

/// Water quality records of a machine over a time range
#[derive(Args, Debug)]
pub struct QualityHistorySubCommand {
    /// Machine id, defaults to the configured machine
    machine_id: Option<String>,
    /// Start of the range (ISO-8601), defaults to 24 hours ago
    #[arg(long)]
    start: Option<String>,
    /// End of the range (ISO-8601), defaults to now
    #[arg(long)]
    end: Option<String>,
}

impl QualityHistorySubCommand {
    /// History of `machine_id` (or the configured machine) between `start` and `end`
    pub fn new(machine_id: Option<String>, start: Option<String>, end: Option<String>) -> Self {
        Self {
            machine_id,
            start,
            end,
        }
    }
}

/// Print the records in range and return them
pub async fn quality_history(
    connector: &dyn MachineConnector,
    default_machine_id: &MachineId,
    sub_command_args: &QualityHistorySubCommand,
) -> Result<Vec<WaterQuality>> {
    let machine_id = sub_command_args
        .machine_id
        .clone()
        .map(MachineId::from)
        .unwrap_or_else(|| default_machine_id.clone());

    let range = HistoryRange {
        start_date: sub_command_args.start.clone(),
        end_date: sub_command_args.end.clone(),
    };

    let history = connector.quality_history(&machine_id, &range).await?;
    print!("{}", HistoryTable(&history));

    Ok(history)
}

/// One line per quality record
#[derive(Debug)]
pub struct HistoryTable<'a>(pub &'a [WaterQuality]);

impl fmt::Display for HistoryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No quality records in range");
        }

        for quality in self.0 {
            writeln!(
                f,
                "{} tds={} ph={} water={}%",
                quality.timestamp.as_deref().unwrap_or("-"),
                quality.tds_level,
                quality.ph_level,
                quality.water_level
            )?;
        }

        Ok(())
    }
}
