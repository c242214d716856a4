use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use transmission_rpc_client::{ClientConfig, Credentials};
use transmission_rpc_types::TorrentId;

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Daemon connection options. Anything left unset falls back to the environment.
    #[command(flatten)]
    pub(crate) connection: CliConnectionOptions,

    #[command(subcommand)]
    pub(crate) command: Command,
}

/// CLI representation of the client configuration.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct CliConnectionOptions {
    /// RPC endpoint URL (overrides TRANSMISSION_RPC_URL)
    #[arg(long, global = true)]
    pub(crate) url: Option<String>,

    /// RPC username (overrides TRANSMISSION_USERNAME)
    #[arg(long, global = true)]
    pub(crate) username: Option<String>,

    /// RPC password (overrides TRANSMISSION_PASSWORD)
    #[arg(long, global = true)]
    pub(crate) password: Option<String>,

    /// Per-request timeout in seconds (overrides TRANSMISSION_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub(crate) timeout_secs: Option<u64>,

    /// Accept self-signed TLS certificates.
    #[arg(long, global = true, default_value_t = false)]
    pub(crate) accept_invalid_certs: bool,

    /// Download directory for added torrents (overrides TRANSMISSION_DOWNLOAD_DIR)
    #[arg(long, global = true)]
    pub(crate) download_dir: Option<String>,

    /// Add torrents paused.
    #[arg(long, global = true, default_value_t = false)]
    pub(crate) paused: bool,
}

impl CliConnectionOptions {
    /// Layers the flags that were given over `config`.
    pub(crate) fn apply(self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = self.url {
            config.rpc_url = url;
        }
        if self.username.is_some() || self.password.is_some() {
            let current = config.credentials.take();
            let username = self
                .username
                .or_else(|| current.as_ref().map(|c| c.username.clone()))
                .unwrap_or_default();
            let password = self
                .password
                .or_else(|| current.map(|c| c.password))
                .unwrap_or_default();
            config.credentials = Some(Credentials::new(username, password));
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if self.accept_invalid_certs {
            config.accept_invalid_certs = true;
        }
        if let Some(dir) = self.download_dir {
            config.download_dir = Some(dir);
        }
        if self.paused {
            config.paused = true;
        }
        config
    }
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Command {
    /// List all torrents with summary fields.
    List,
    /// Show every field of one torrent.
    Get {
        /// Numeric id or info hash.
        id: TorrentId,
    },
    /// Upload a local .torrent file.
    AddFile {
        /// Path to the .torrent file.
        path: String,
    },
    /// Add a torrent by magnet link or URL.
    AddMagnet {
        /// Magnet link, or an URL the daemon can fetch.
        link: String,
    },
    /// Start torrents.
    Start {
        #[arg(required = true)]
        ids: Vec<TorrentId>,
    },
    /// Stop torrents.
    Stop {
        #[arg(required = true)]
        ids: Vec<TorrentId>,
    },
    /// Re-check torrent data.
    Verify {
        #[arg(required = true)]
        ids: Vec<TorrentId>,
    },
    /// Remove torrents from the daemon.
    Remove {
        #[arg(required = true)]
        ids: Vec<TorrentId>,

        /// Also delete downloaded data.
        #[arg(long, default_value_t = false)]
        delete_local_data: bool,
    },
    /// Show session statistics.
    Stats,
    /// Show daemon settings.
    Session,
    /// Show free space at a path on the daemon host.
    FreeSpace {
        /// Directory to query.
        path: String,
    },
}
