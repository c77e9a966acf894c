use std::path::PathBuf;

use anyhow::Result;
use aquavend::{BaseUrl, HttpClient, MachineId};
use aquavend_cli::config::Settings;
use aquavend_cli::sub_commands;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Simple CLI application to talk to the water vending machine backend
#[derive(Parser)]
#[command(name = "aquavend")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Backend base url, overrides the config file
    #[arg(long)]
    base_url: Option<BaseUrl>,
    /// Machine used when a command does not name one
    #[arg(short, long)]
    machine_id: Option<String>,
    /// Logging level
    #[arg(short, long, default_value = "error")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List machines
    Machines(sub_commands::machines::MachinesSubCommand),
    /// Show a single machine
    Machine(sub_commands::machine_info::MachineInfoSubCommand),
    /// Record a water quality measurement
    RecordQuality(sub_commands::record_quality::RecordQualitySubCommand),
    /// Record a sale
    RecordSale(sub_commands::record_sale::RecordSaleSubCommand),
    /// Water quality records of a machine
    QualityHistory(sub_commands::quality_history::QualityHistorySubCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    let env_filter = EnvFilter::new(format!("{},hyper=warn,reqwest=warn", args.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut settings = Settings::new(args.config.clone()).from_env()?;

    if let Some(base_url) = args.base_url.clone() {
        settings.api.base_url = base_url;
    }
    if let Some(machine_id) = args.machine_id.clone() {
        settings.api.machine_id = MachineId::from(machine_id);
    }

    tracing::debug!("Using backend {}", settings.api.base_url);

    let mut builder = aquavend_http_client::HttpClient::builder();
    if let Some(timeout) = settings.api.timeout() {
        builder = builder.timeout(timeout);
    }
    let client = HttpClient::with_core(settings.api.base_url.clone(), builder.build()?);
    let machine_id = &settings.api.machine_id;

    match &args.command {
        Commands::Machines(sub_command_args) => {
            sub_commands::machines::machines(&client, sub_command_args)
                .await
                .map(|_| ())
        }
        Commands::Machine(sub_command_args) => {
            sub_commands::machine_info::machine_info(&client, machine_id, sub_command_args)
                .await
                .map(|_| ())
        }
        Commands::RecordQuality(sub_command_args) => {
            sub_commands::record_quality::record_quality(&client, machine_id, sub_command_args)
                .await
                .map(|_| ())
        }
        Commands::RecordSale(sub_command_args) => {
            sub_commands::record_sale::record_sale(&client, machine_id, sub_command_args)
                .await
                .map(|_| ())
        }
        Commands::QualityHistory(sub_command_args) => {
            sub_commands::quality_history::quality_history(&client, machine_id, sub_command_args)
                .await
                .map(|_| ())
        }
    }
}
