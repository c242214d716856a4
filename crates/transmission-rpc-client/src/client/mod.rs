//! Transmission RPC client implementation.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use transmission_rpc_types::{
    AddOutcome, DETAIL_FIELDS, FreeSpace, RpcError, SUMMARY_FIELDS, SessionInfo, SessionStats,
    Torrent, TorrentId, TorrentRef, TorrentRpc, Torrents,
};

use crate::config::ClientConfig;
use crate::rpc::{
    AddOptions, RequestArguments, TorrentSource, decode_into, methods, require_success,
};
use crate::session::Session;
use crate::transport::{HttpTransport, ReqwestTransport};

#[cfg(test)]
mod tests;

/// TransmissionClient talks to one Transmission daemon over JSON-RPC.
#[derive(Debug)]
#[allow(private_bounds)]
pub struct TransmissionClient<T: HttpTransport = ReqwestTransport> {
    session: Session<T>,
    add_defaults: AddOptions,
}

impl TransmissionClient {
    /// Create a new TransmissionClient.
    ///
    /// This method is async as the session id is fetched from the daemon on creation.
    pub async fn try_new(config: ClientConfig) -> Result<Self, RpcError> {
        let url = Url::parse(&config.rpc_url)
            .map_err(|e| RpcError::InvalidUrl(format!("{}: {e}", config.rpc_url)))?;

        debug!("Connecting to Transmission RPC at {}", url);
        let transport = ReqwestTransport::new(config.timeout, config.accept_invalid_certs)?;
        let client = Self::from_parts(transport, url.as_str(), config);
        client.session.handshake().await?;

        debug!("Connected to Transmission Daemon");
        Ok(client)
    }
}

#[allow(private_bounds)]
impl<T: HttpTransport> TransmissionClient<T> {
    fn from_parts(transport: T, base_url: &str, config: ClientConfig) -> Self {
        Self {
            session: Session::new(transport, base_url, config.credentials),
            add_defaults: AddOptions {
                download_dir: config.download_dir,
                paused: config.paused,
                ..Default::default()
            },
        }
    }

    /// Create a TransmissionClient with a custom transport implementation.
    /// This is primarily useful for testing with mocks.
    #[cfg(test)]
    pub(crate) fn with_transport(transport: T, config: ClientConfig) -> Self {
        let base_url = config.rpc_url.clone();
        Self::from_parts(transport, &base_url, config)
    }

    /// The session id the next request will carry.
    pub fn session_id(&self) -> String {
        self.session.token()
    }

    /// Calls `method` and decodes its result into `R`.
    ///
    /// This is the building block behind every [`TorrentRpc`] method and can be used for RPC
    /// methods that have no dedicated wrapper.
    pub async fn call_method<R: DeserializeOwned>(
        &self,
        method: &str,
        arguments: RequestArguments,
    ) -> Result<R, RpcError> {
        let response = self.session.call(method, arguments).await?;
        let payload = require_success(method, response)?;
        decode_into(payload)
    }

    /// Add a torrent with explicit add-time settings. The configured defaults are not applied.
    pub async fn add_with(
        &self,
        source: TorrentSource,
        options: AddOptions,
    ) -> Result<TorrentRef, RpcError> {
        let mut arguments = options.into_arguments();
        match source {
            TorrentSource::File(path) => {
                debug!("Adding torrent from file: {}", path.display());
                let content = tokio::fs::read(&path)
                    .await
                    .map_err(|e| RpcError::FileSystem(format!("{}: {e}", path.display())))?;
                arguments.metainfo = Some(STANDARD.encode(content));
            }
            TorrentSource::Metainfo(content) => {
                debug!("Adding torrent from {} bytes of metainfo", content.len());
                arguments.metainfo = Some(STANDARD.encode(content));
            }
            TorrentSource::Link(link) => {
                debug!("Adding torrent from link: {link}");
                arguments.filename = Some(link);
            }
        }

        let outcome: AddOutcome = self.call_method(methods::TORRENT_ADD, arguments).await?;
        debug!("Add outcome: {outcome:?}");
        outcome.into_result()
    }

    /// Runs an action method whose reply carries no payload.
    async fn act(&self, method: &str, arguments: RequestArguments) -> Result<(), RpcError> {
        if arguments.ids.is_empty() {
            debug!("{method}: no ids given, nothing to do");
            return Ok(());
        }
        let response = self.session.call(method, arguments).await?;
        require_success(method, response)?;
        debug!("{method} command sent");
        Ok(())
    }
}

#[allow(private_bounds)]
impl<T: HttpTransport> TorrentRpc for TransmissionClient<T> {
    async fn list(&self) -> Result<Vec<Torrent>, RpcError> {
        debug!("Listing torrents");
        let result: Torrents = self
            .call_method(
                methods::TORRENT_GET,
                RequestArguments {
                    fields: SUMMARY_FIELDS.to_vec(),
                    ..Default::default()
                },
            )
            .await?;
        debug!("Listed {} torrents", result.torrents.len());

        Ok(result.torrents)
    }

    async fn get(&self, id: TorrentId) -> Result<Torrent, RpcError> {
        debug!("Getting torrent {id}");
        let result: Torrents = self
            .call_method(
                methods::TORRENT_GET,
                RequestArguments {
                    fields: DETAIL_FIELDS.to_vec(),
                    ids: vec![id.clone()],
                    ..Default::default()
                },
            )
            .await?;

        result
            .torrents
            .into_iter()
            .next()
            .ok_or_else(|| RpcError::NotFound(format!("No torrent found for ID {id}")))
    }

    async fn add_file(&self, path: &str) -> Result<TorrentRef, RpcError> {
        self.add_with(TorrentSource::File(path.into()), self.add_defaults.clone())
            .await
    }

    async fn add_magnet(&self, magnet_link: &str) -> Result<TorrentRef, RpcError> {
        self.add_with(
            TorrentSource::Link(magnet_link.to_owned()),
            self.add_defaults.clone(),
        )
        .await
    }

    async fn start(&self, ids: Vec<TorrentId>) -> Result<(), RpcError> {
        debug!("Starting torrents {ids:?}");
        self.act(
            methods::TORRENT_START,
            RequestArguments {
                ids,
                ..Default::default()
            },
        )
        .await
    }

    async fn stop(&self, ids: Vec<TorrentId>) -> Result<(), RpcError> {
        debug!("Stopping torrents {ids:?}");
        self.act(
            methods::TORRENT_STOP,
            RequestArguments {
                ids,
                ..Default::default()
            },
        )
        .await
    }

    async fn verify(&self, ids: Vec<TorrentId>) -> Result<(), RpcError> {
        debug!("Verifying torrents {ids:?}");
        self.act(
            methods::TORRENT_VERIFY,
            RequestArguments {
                ids,
                ..Default::default()
            },
        )
        .await
    }

    async fn remove(&self, ids: Vec<TorrentId>, delete_local_data: bool) -> Result<(), RpcError> {
        debug!("Removing torrents {ids:?}, delete_local_data={delete_local_data}");
        self.act(
            methods::TORRENT_REMOVE,
            RequestArguments {
                ids,
                delete_local_data,
                ..Default::default()
            },
        )
        .await
    }

    async fn stats(&self) -> Result<SessionStats, RpcError> {
        debug!("Getting session statistics");
        let stats: SessionStats = self
            .call_method(methods::SESSION_STATS, RequestArguments::default())
            .await?;
        debug!("Session statistics: {stats:?}");

        Ok(stats)
    }

    async fn session(&self) -> Result<SessionInfo, RpcError> {
        debug!("Getting session settings");
        self.call_method(methods::SESSION_GET, RequestArguments::default())
            .await
    }

    async fn free_space(&self, path: &str) -> Result<FreeSpace, RpcError> {
        debug!("Querying free space at {path}");
        self.call_method(
            methods::FREE_SPACE,
            RequestArguments {
                path: Some(path.to_owned()),
                ..Default::default()
            },
        )
        .await
    }
}
