//! # Transmission RPC Types
//!
//! This crate defines the error type, the request vocabulary and the decoded result shapes
//! shared by the Transmission JSON-RPC client and its consumers.

mod fields;
mod models;

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fields::{DETAIL_FIELDS, Field, SUMMARY_FIELDS};
pub use models::{
    AddOutcome, FileStat, FreeSpace, Peer, SessionInfo, SessionStats, StatsDetails, Torrent,
    TorrentFile, TorrentRef, TorrentStatus, Torrents,
};

/// Error type for Transmission RPC operations.
#[derive(Error, Debug)]
pub enum RpcError {
    /// The HTTP request could not be dispatched (DNS, refused connection, TLS, timeout).
    #[error("network error: {0}")]
    Connection(String),

    /// The daemon answered with an HTTP status outside of the success range.
    #[error("unexpected HTTP status {status}")]
    Transport {
        /// HTTP status code of the rejected response.
        status: u16,
    },

    /// JSON could not be encoded, decoded, or did not match the expected shape.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The envelope decoded fine but its `result` was not `"success"`.
    #[error("method {method} failed: {result}")]
    Method {
        /// RPC method name, e.g. `torrent-get`.
        method: String,
        /// The daemon's result string, verbatim.
        result: String,
    },

    /// A lookup succeeded but matched nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// The daemon already knows the torrent that was being added.
    #[error("duplicate torrent: {name} (id {id}, hash {hash_string})")]
    Duplicate {
        /// Id of the torrent already present.
        id: i64,
        /// Name of the torrent already present.
        name: String,
        /// Info hash of the torrent already present.
        hash_string: String,
    },

    /// The configured RPC URL could not be parsed.
    #[error("invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// File system errors (file not found, permission denied, etc.)
    #[error("file system error: {0}")]
    FileSystem(String),
}

impl RpcError {
    /// Whether repeating the same call later may succeed.
    ///
    /// Connection failures and server-side (5xx) statuses are transient; method failures,
    /// duplicates and decode errors will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            RpcError::Connection(_) => true,
            RpcError::Transport { status } => (500..600).contains(status),
            _ => false,
        }
    }
}

/// Identifies a torrent in `ids` arguments, either by numeric id or by info hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TorrentId {
    /// Daemon-assigned numeric id. Not stable across daemon restarts.
    Id(i64),
    /// Hex info hash.
    Hash(String),
}

impl From<i64> for TorrentId {
    fn from(id: i64) -> Self {
        TorrentId::Id(id)
    }
}

impl From<&str> for TorrentId {
    fn from(hash: &str) -> Self {
        TorrentId::Hash(hash.to_owned())
    }
}

impl From<String> for TorrentId {
    fn from(hash: String) -> Self {
        TorrentId::Hash(hash)
    }
}

impl FromStr for TorrentId {
    type Err = Infallible;

    /// Numbers become [`TorrentId::Id`], anything else is taken as a hash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(TorrentId::Id)
            .unwrap_or_else(|_| TorrentId::Hash(s.to_owned())))
    }
}

impl fmt::Display for TorrentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TorrentId::Id(id) => write!(f, "{id}"),
            TorrentId::Hash(hash) => f.write_str(hash),
        }
    }
}

/// TorrentRpc defines the per-method operations of the Transmission daemon.
#[allow(async_fn_in_trait)]
pub trait TorrentRpc {
    /// List all torrents with the summary field set.
    async fn list(&self) -> Result<Vec<Torrent>, RpcError>;
    /// Get one torrent with the detail field set. Fails with [`RpcError::NotFound`] if the
    /// daemon does not know the id.
    async fn get(&self, id: TorrentId) -> Result<Torrent, RpcError>;
    /// Add a torrent from a local `.torrent` file. The content is uploaded, so the file does not
    /// need to be visible to the daemon.
    async fn add_file(&self, path: &str) -> Result<TorrentRef, RpcError>;
    /// Add a torrent from a magnet link (or any URL the daemon can fetch).
    async fn add_magnet(&self, magnet_link: &str) -> Result<TorrentRef, RpcError>;
    /// Start torrents.
    async fn start(&self, ids: Vec<TorrentId>) -> Result<(), RpcError>;
    /// Stop torrents.
    async fn stop(&self, ids: Vec<TorrentId>) -> Result<(), RpcError>;
    /// Queue torrents for local data verification.
    async fn verify(&self, ids: Vec<TorrentId>) -> Result<(), RpcError>;
    /// Remove torrents. If `delete_local_data` is true, downloaded data is deleted as well.
    async fn remove(&self, ids: Vec<TorrentId>, delete_local_data: bool) -> Result<(), RpcError>;
    /// Get session statistics.
    async fn stats(&self) -> Result<SessionStats, RpcError>;
    /// Get the daemon's session settings.
    async fn session(&self) -> Result<SessionInfo, RpcError>;
    /// Query free space at a path on the daemon's host.
    async fn free_space(&self, path: &str) -> Result<FreeSpace, RpcError>;
}
