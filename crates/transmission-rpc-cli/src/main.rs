//! # Transmission RPC command-line client
//!
//! ## Usage
//!
//! ```sh,ignore
//! transmission-rpc --url http://localhost:9091/transmission/rpc list
//! transmission-rpc add-magnet 'magnet:?xt=urn:btih:...'
//! transmission-rpc remove --delete-local-data 3 7
//! ```
//!
//! Connection settings are read from the environment (and a `.env` file, if present) and can
//! be overridden with flags. Results are printed to stdout as JSON, logs go to stderr.

mod cli;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use transmission_rpc_client::{ClientConfig, TransmissionClient};
use transmission_rpc_types::TorrentRpc;

use crate::cli::{Cli, Command};

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs one command against the daemon.
async fn run(
    client: &TransmissionClient,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::List => print_json(&client.list().await?)?,
        Command::Get { id } => print_json(&client.get(id).await?)?,
        Command::AddFile { path } => {
            let added = client.add_file(&path).await?;
            info!("Added torrent {} ({})", added.name, added.id);
            print_json(&added)?;
        }
        Command::AddMagnet { link } => {
            let added = client.add_magnet(&link).await?;
            info!("Added torrent {} ({})", added.name, added.id);
            print_json(&added)?;
        }
        Command::Start { ids } => {
            client.start(ids).await?;
            info!("Start requested");
        }
        Command::Stop { ids } => {
            client.stop(ids).await?;
            info!("Stop requested");
        }
        Command::Verify { ids } => {
            client.verify(ids).await?;
            info!("Verify requested");
        }
        Command::Remove {
            ids,
            delete_local_data,
        } => {
            client.remove(ids, delete_local_data).await?;
            info!("Remove requested");
        }
        Command::Stats => print_json(&client.stats().await?)?,
        Command::Session => print_json(&client.session().await?)?,
        Command::FreeSpace { path } => print_json(&client.free_space(&path).await?)?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = cli.connection.apply(ClientConfig::from_env());
    debug!("Using {config:?}");

    let client = TransmissionClient::try_new(config).await?;
    run(&client, cli.command).await
}
