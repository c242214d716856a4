//! Request/response envelopes and the call → check → decode pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};
use transmission_rpc_types::{Field, RpcError, TorrentId};

use crate::session::Session;
use crate::transport::HttpTransport;

/// RPC method names.
pub(crate) mod methods {
    pub(crate) const SESSION_STATS: &str = "session-stats";
    pub(crate) const SESSION_GET: &str = "session-get";
    pub(crate) const TORRENT_GET: &str = "torrent-get";
    pub(crate) const TORRENT_ADD: &str = "torrent-add";
    pub(crate) const TORRENT_VERIFY: &str = "torrent-verify";
    pub(crate) const TORRENT_START: &str = "torrent-start";
    pub(crate) const TORRENT_STOP: &str = "torrent-stop";
    pub(crate) const TORRENT_REMOVE: &str = "torrent-remove";
    pub(crate) const FREE_SPACE: &str = "free-space";
}

const SUCCESS: &str = "success";

/// The `arguments` object of a request. Every field left at its zero value is omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RequestArguments {
    /// Torrent fields to return (`torrent-get`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    /// Torrents to act on. Note that the daemon treats a missing `ids` as "all torrents".
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<TorrentId>,
    /// Magnet link or URL to add.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Where an added torrent's data goes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
    /// Base64-encoded `.torrent` content to add.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metainfo: Option<String>,
    /// Add the torrent without starting it.
    #[serde(skip_serializing_if = "is_false")]
    pub paused: bool,
    /// Maximum number of peers for an added torrent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_limit: Option<i32>,
    /// Bandwidth priority of an added torrent (-1 low, 0 normal, 1 high).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_priority: Option<i32>,
    /// Indices of files to download.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files_wanted: Vec<i64>,
    /// Indices of files to skip.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files_unwanted: Vec<i64>,
    /// Indices of high-priority files.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub priority_high: Vec<i64>,
    /// Indices of low-priority files.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub priority_low: Vec<i64>,
    /// Indices of normal-priority files.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub priority_normal: Vec<i64>,
    /// Delete downloaded data when removing (`torrent-remove`).
    #[serde(skip_serializing_if = "is_false")]
    pub delete_local_data: bool,
    /// Path to query (`free-space`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Where a torrent to add comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorrentSource {
    /// A local `.torrent` file; its content is uploaded.
    File(PathBuf),
    /// Raw `.torrent` content.
    Metainfo(Vec<u8>),
    /// A magnet link, or a URL the daemon fetches itself.
    Link(String),
}

/// Add-time settings for `torrent-add`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)] // rationale: same meaning as the matching RequestArguments fields
pub struct AddOptions {
    pub download_dir: Option<String>,
    pub paused: bool,
    pub peer_limit: Option<i32>,
    pub bandwidth_priority: Option<i32>,
    pub files_wanted: Vec<i64>,
    pub files_unwanted: Vec<i64>,
    pub priority_high: Vec<i64>,
    pub priority_low: Vec<i64>,
    pub priority_normal: Vec<i64>,
}

impl AddOptions {
    pub(crate) fn into_arguments(self) -> RequestArguments {
        RequestArguments {
            download_dir: self.download_dir,
            paused: self.paused,
            peer_limit: self.peer_limit,
            bandwidth_priority: self.bandwidth_priority,
            files_wanted: self.files_wanted,
            files_unwanted: self.files_unwanted,
            priority_high: self.priority_high,
            priority_low: self.priority_low,
            priority_normal: self.priority_normal,
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    method: &'a str,
    arguments: RequestArguments,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<i64>,
}

/// Response envelope. `arguments` stays opaque until the caller knows which shape to expect.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Response {
    pub(crate) result: String,
    #[serde(default)]
    pub(crate) arguments: Map<String, Value>,
    #[serde(default)]
    pub(crate) tag: Option<i64>,
}

impl<T: HttpTransport> Session<T> {
    /// Sends `{method, arguments, tag}` and decodes the response envelope.
    pub(crate) async fn call(
        &self,
        method: &str,
        arguments: RequestArguments,
    ) -> Result<Response, RpcError> {
        let tag = self.next_tag();
        let request = Request {
            method,
            arguments,
            tag: Some(tag),
        };
        let body = serde_json::to_vec(&request).map_err(serialization_error)?;

        debug!("Calling {method} (tag {tag})");
        let bytes = self.post("/", body).await?;
        trace!("{method} response: {}", String::from_utf8_lossy(&bytes));
        let response: Response = serde_json::from_slice(&bytes).map_err(serialization_error)?;

        if response.tag.is_some_and(|t| t != tag) {
            warn!("{method}: expected tag {tag}, got {:?}", response.tag);
        }
        Ok(response)
    }
}

/// Returns the envelope's payload if `result` is `"success"`.
pub(crate) fn require_success(
    method: &str,
    response: Response,
) -> Result<Map<String, Value>, RpcError> {
    if response.result == SUCCESS {
        return Ok(response.arguments);
    }
    debug!("{method} returned {:?}", response.result);
    Err(RpcError::Method {
        method: method.to_owned(),
        result: response.result,
    })
}

/// Decodes an opaque payload into the shape expected for the method that produced it.
pub(crate) fn decode_into<R: DeserializeOwned>(payload: Map<String, Value>) -> Result<R, RpcError> {
    serde_json::from_value(Value::Object(payload)).map_err(serialization_error)
}

fn serialization_error(err: serde_json::Error) -> RpcError {
    RpcError::Serialization(err.to_string())
}
