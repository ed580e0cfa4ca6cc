//! brook - stream management CLI
//!
//! Connects to the broker over TCP and runs one stream command.

mod commands;
mod config;

use brook_client::Client;
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::Config;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brook")]
#[command(about = "Manage streams on a binary-protocol streaming broker")]
#[command(version)]
struct Cli {
    /// Broker address (overrides config file and BROOK_SERVER)
    #[arg(short, long)]
    server: Option<SocketAddr>,

    /// Login username
    #[arg(short, long)]
    username: Option<String>,

    /// Login password
    #[arg(short, long)]
    password: Option<String>,

    /// Path to YAML config file
    #[arg(short, long, env = config::CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ping the broker
    Ping,

    /// Create a stream
    CreateStream {
        /// Stream ID (assigned by the broker if omitted)
        #[arg(short, long)]
        id: Option<u32>,

        /// Stream name
        name: String,
    },

    /// Get a stream by numeric ID or name
    GetStream {
        /// Stream ID or name
        id: String,
    },

    /// List all streams
    ListStreams,

    /// Rename a stream
    UpdateStream {
        /// Stream ID or name
        id: String,

        /// New stream name
        name: String,
    },

    /// Delete a stream
    DeleteStream {
        /// Stream ID or name
        id: String,
    },
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(server) = cli.server {
        config.server = server;
    }
    if cli.username.is_some() {
        config.username = cli.username;
    }
    if cli.password.is_some() {
        config.password = cli.password;
    }
    config.validate()?;

    tracing::debug!("Connecting to {}", config.server);
    let client = Client::connect(config.connection_config()).map_err(|e| {
        tracing::error!("Connection to {} failed: {}", config.server, e);
        e
    })?;

    let output = commands::execute(&client, cli.command, cli.json);
    client.close();

    println!("{}", output?);
    Ok(())
}
