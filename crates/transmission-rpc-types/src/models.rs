//! Result shapes decoded from the `arguments` object of successful responses.
//!
//! Every field defaults when the daemon omits it, since `torrent-get` only returns the fields
//! that were asked for.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RpcError;

/// `torrent-get` result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Torrents {
    /// Matching torrents, in daemon order.
    #[serde(default)]
    pub torrents: Vec<Torrent>,
}

/// Torrent information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)] // rationale: these are the same fields as in Transmission RPC
pub struct Torrent {
    pub id: i64,

    pub name: String,

    pub hash_string: String,

    pub status: i32,

    pub comment: String,

    pub error: i32,

    pub error_string: String,

    pub is_finished: bool,

    pub left_until_done: i64,

    pub percent_done: f64,

    pub eta: i64,

    pub size_when_done: i64,

    pub start_date: i64,

    pub added_date: i64,

    pub activity_date: i64,

    pub upload_ratio: f64,

    pub total_size: i64,

    pub rate_download: i64,

    pub rate_upload: i64,

    pub download_dir: String,

    pub peers: Vec<Peer>,

    pub files: Vec<TorrentFile>,

    pub file_stats: Vec<FileStat>,
}

impl Torrent {
    /// The activity state behind the numeric `status` field.
    pub fn status(&self) -> TorrentStatus {
        TorrentStatus::from(self.status)
    }
}

/// Activity state of a torrent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorrentStatus {
    /// Not running.
    Stopped,
    /// Queued for local data verification.
    CheckPending,
    /// Verifying local data.
    Checking,
    /// Queued for download.
    DownloadPending,
    /// Downloading.
    Downloading,
    /// Queued for seeding.
    SeedPending,
    /// Seeding.
    Seeding,
    /// A status code this client does not know.
    Unknown(i32),
}

impl From<i32> for TorrentStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => TorrentStatus::Stopped,
            1 => TorrentStatus::CheckPending,
            2 => TorrentStatus::Checking,
            3 => TorrentStatus::DownloadPending,
            4 => TorrentStatus::Downloading,
            5 => TorrentStatus::SeedPending,
            6 => TorrentStatus::Seeding,
            other => TorrentStatus::Unknown(other),
        }
    }
}

impl fmt::Display for TorrentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TorrentStatus::Stopped => f.write_str("stopped"),
            TorrentStatus::CheckPending => f.write_str("check pending"),
            TorrentStatus::Checking => f.write_str("checking"),
            TorrentStatus::DownloadPending => f.write_str("download pending"),
            TorrentStatus::Downloading => f.write_str("downloading"),
            TorrentStatus::SeedPending => f.write_str("seed pending"),
            TorrentStatus::Seeding => f.write_str("seeding"),
            TorrentStatus::Unknown(code) => write!(f, "unknown ({code})"),
        }
    }
}

/// A file inside a torrent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct TorrentFile {
    pub bytes_completed: i64,

    pub length: i64,

    pub name: String,
}

/// Per-file download settings and progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct FileStat {
    pub bytes_completed: i64,

    pub wanted: bool,

    pub priority: i32,
}

/// A connected peer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct Peer {
    pub address: String,

    pub client_name: String,

    pub client_is_choked: bool,

    pub client_is_interested: bool,

    pub flag_str: String,

    pub is_downloading_from: bool,

    pub is_encrypted: bool,

    pub is_incoming: bool,

    pub is_uploading_to: bool,

    #[serde(rename = "isUTP")]
    pub is_utp: bool,

    pub peer_is_choked: bool,

    pub peer_is_interested: bool,

    pub port: u16,

    pub progress: f64,

    pub rate_to_client: i64,

    pub rate_to_peer: i64,
}

/// Identifying fields of a torrent returned by `torrent-add`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct TorrentRef {
    pub id: i64,

    pub name: String,

    pub hash_string: String,
}

/// `torrent-add` result: the daemon either added the torrent or already had it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddOutcome {
    /// The torrent was added.
    #[serde(rename = "torrent-added")]
    Added(TorrentRef),
    /// The daemon already had this torrent; nothing changed.
    #[serde(rename = "torrent-duplicate")]
    Duplicate(TorrentRef),
}

impl AddOutcome {
    /// Turns a duplicate into [`RpcError::Duplicate`].
    pub fn into_result(self) -> Result<TorrentRef, RpcError> {
        match self {
            AddOutcome::Added(torrent) => Ok(torrent),
            AddOutcome::Duplicate(torrent) => Err(RpcError::Duplicate {
                id: torrent.id,
                name: torrent.name,
                hash_string: torrent.hash_string,
            }),
        }
    }
}

/// Session statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct SessionStats {
    pub active_torrent_count: i32,

    #[serde(rename = "cumulative-stats")]
    pub cumulative_stats: StatsDetails,

    #[serde(rename = "current-stats")]
    pub current_stats: StatsDetails,

    pub download_speed: i64,

    pub paused_torrent_count: i32,

    pub torrent_count: i32,

    pub upload_speed: i64,
}

/// Detailed statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct StatsDetails {
    pub downloaded_bytes: i64,

    pub files_added: i64,

    pub seconds_active: i64,

    pub session_count: i64,

    pub uploaded_bytes: i64,
}

/// `session-get` result: the subset of daemon settings this client reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
#[allow(missing_docs)]
pub struct SessionInfo {
    pub version: String,

    pub rpc_version: i32,

    pub rpc_version_minimum: i32,

    pub config_dir: String,

    pub download_dir: String,

    pub incomplete_dir: String,

    pub incomplete_dir_enabled: bool,

    pub download_queue_enabled: bool,

    pub download_queue_size: i32,

    pub peer_port: u16,

    pub peer_limit_global: i32,

    pub speed_limit_down: i64,

    pub speed_limit_down_enabled: bool,

    pub speed_limit_up: i64,

    pub speed_limit_up_enabled: bool,

    pub start_added_torrents: bool,
}

/// `free-space` result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FreeSpace {
    /// The queried path, echoed back.
    pub path: String,
    /// Free bytes available at `path`.
    pub size_bytes: i64,
    /// Total size of the volume, reported by newer daemons only.
    #[serde(rename = "total_size", skip_serializing_if = "Option::is_none")]
    pub total_size: Option<i64>,
}
