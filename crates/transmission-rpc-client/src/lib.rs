//! # Transmission JSON-RPC client.
//!
//! usage:
//!
//! ```rust,ignore
//! use transmission_rpc_client::{ClientConfig, TransmissionClient};
//! use transmission_rpc_types::TorrentRpc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TransmissionClient::try_new(ClientConfig::from_env()).await?;
//!     let torrent = client.add_file("path/to/file.torrent").await?;
//!     println!("Added torrent: {:?}", torrent);
//!     client.start(vec![torrent.id.into()]).await?;
//!     Ok(())
//! }
//! ```
//!
//! The client fetches a session id when it is created and attaches it to every call. When the
//! daemon reports the id as expired (`409 Conflict`), the id is refreshed and the call is
//! retried once.

mod client;
mod config;
mod rpc;
mod session;
mod transport;

#[cfg(test)]
mod testutil;

// Only the integration tests use these.
#[cfg(test)]
use {libc as _, test_log as _, tracing_subscriber as _};

pub use client::TransmissionClient;
pub use config::{ClientConfig, Credentials, DEFAULT_RPC_URL, DEFAULT_TIMEOUT};
pub use rpc::{AddOptions, RequestArguments, TorrentSource};
pub use transport::ReqwestTransport;
