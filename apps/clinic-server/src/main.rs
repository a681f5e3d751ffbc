mod app;
mod bootstrap;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Clinic patient-management server
#[derive(Parser)]
#[command(name = "clinic-server", version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for the HTTP server
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".to_owned(),
        _ => config.logging.level = "trace".to_owned(),
    }

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    logging::init(&config.logging);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => app::serve(config).await,
        Commands::Check => {
            println!("Configuration is valid");
            Ok(())
        }
    }
}
