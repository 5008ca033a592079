use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use scan_analytics::DashboardConfig;
use std::path::PathBuf;

mod commands;
mod demo;
mod history_file;

use commands::{catalog, history, report, scan, Session};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scan history file, overrides the config value
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    #[arg(short, long, value_name = "NETWORK")]
    network: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a contract address or an uploaded source file
    Scan {
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List recorded scans, newest first
    History {
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "filter-network")]
        filter_network: Option<String>,
    },
    /// Headline statistics and distributions
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Running risk score over the scan history
    Trend,
    /// Contracts with the most vulnerabilities
    Riskiest {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Scans per network
    Networks,
    /// Write the history as CSV or an HTML report
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        #[arg(long, value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },
    /// Load scans from a CSV export
    Import {
        file: PathBuf,
    },
    /// Remove all recorded scans
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Vulnerability reference catalog
    Vuln {
        name: Option<String>,
    },
    /// Add the sample scan history
    Seed,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Html,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // Load configuration if provided
    let mut config = match &cli.config {
        Some(config_path) => DashboardConfig::load(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(history) = cli.history {
        config.history_path = history;
    }
    if let Some(network) = cli.network {
        config.default_network = network;
    }

    let session = Session::open(config)?;

    match cli.command {
        Commands::Scan { address, file } => {
            info!("Submitting scan on {}", session.config.default_network);
            scan::run_scan(&session, address, file).await?;
        }
        Commands::History { search, filter_network } => {
            history::list_history(&session, search, filter_network)?;
        }
        Commands::Stats { json } => {
            report::show_stats(&session, json)?;
        }
        Commands::Trend => {
            report::show_trend(&session)?;
        }
        Commands::Riskiest { limit } => {
            report::show_riskiest(&session, limit)?;
        }
        Commands::Networks => {
            report::show_networks(&session)?;
        }
        Commands::Export { format, out } => {
            info!("Exporting scan history to {}", out.display());
            match format {
                ExportFormat::Csv => report::export_csv(&session, &out)?,
                ExportFormat::Html => report::export_html(&session, &out)?,
            }
        }
        Commands::Import { file } => {
            history::import(&session, &file)?;
        }
        Commands::Clear { yes } => {
            history::clear(&session, yes)?;
        }
        Commands::Vuln { name } => match name {
            Some(name) => catalog::show_entry(&name)?,
            None => catalog::list_entries(),
        },
        Commands::Seed => {
            history::seed(&session)?;
        }
    }

    Ok(())
}

// Example usage:
/*
$ scan-cli seed
$ scan-cli --network polygon scan --address 0x71d865673E6c2E112CdED381b38f7A958eA22d39
$ scan-cli history --search 0xe7 --filter-network Bsc
$ scan-cli export html --out reports/
$ scan-cli vuln reentrancy
*/
