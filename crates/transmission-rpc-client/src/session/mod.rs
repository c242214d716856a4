//! Session token lifecycle.
//!
//! The daemon hands out an opaque session id on any response and rejects RPC calls carrying a
//! stale one with `409 Conflict`. [`Session::post`] recovers from that by fetching a fresh id and
//! retrying exactly once.

use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicI64, Ordering},
};

use tracing::{debug, warn};
use transmission_rpc_types::RpcError;

use crate::config::Credentials;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};


/// Status the daemon answers with when the session id is missing or expired.
const SESSION_EXPIRED: u16 = 409;

/// Holds the current session id.
///
/// The lock is only taken for reads and compare-and-replace writes, never across a request.
#[derive(Debug, Default)]
pub(crate) struct TokenCell(Mutex<String>);

impl TokenCell {
    fn lock(&self) -> MutexGuard<'_, String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn get(&self) -> String {
        self.lock().clone()
    }

    pub(crate) fn set(&self, token: String) {
        *self.lock() = token;
    }

    /// Replaces the token only if it still equals `old`. Returns whether it did.
    pub(crate) fn replace(&self, old: &str, new: String) -> bool {
        let mut current = self.lock();
        if *current != old {
            return false;
        }
        *current = new;
        true
    }
}

/// Connection state for one daemon: endpoint, credentials and the current session id.
#[derive(Debug)]
pub(crate) struct Session<T> {
    transport: T,
    base_url: String,
    credentials: Option<Credentials>,
    token: TokenCell,
    refresh: tokio::sync::Mutex<()>,
    next_tag: AtomicI64,
}

impl<T: HttpTransport> Session<T> {
    pub(crate) fn new(transport: T, base_url: &str, credentials: Option<Credentials>) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials,
            token: TokenCell::default(),
            refresh: tokio::sync::Mutex::new(()),
            next_tag: AtomicI64::new(1),
        }
    }

    /// The session id that the next request will carry.
    pub(crate) fn token(&self) -> String {
        self.token.get()
    }

    pub(crate) fn next_tag(&self) -> i64 {
        self.next_tag.fetch_add(1, Ordering::Relaxed)
    }

    /// Fetches a session id from the daemon and stores it.
    pub(crate) async fn handshake(&self) -> Result<(), RpcError> {
        let token = self.fetch_token().await?;
        self.token.set(token);
        Ok(())
    }

    /// POSTs `body` to `base_url + path` and returns the response body.
    ///
    /// A `409` triggers one token refresh and one retry; a second `409` is returned as
    /// [`RpcError::Transport`].
    pub(crate) async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, RpcError> {
        let mut token = self.token.get();
        let mut response = self
            .send(HttpMethod::Post, path, Some(body.clone()), token.clone())
            .await?;

        if response.status == SESSION_EXPIRED {
            debug!("Session id expired, refreshing");
            token = self.refresh(&token).await?;
            response = self
                .send(HttpMethod::Post, path, Some(body), token.clone())
                .await?;
            if response.status == SESSION_EXPIRED {
                warn!("Daemon rejected the refreshed session id");
                return Err(RpcError::Transport {
                    status: SESSION_EXPIRED,
                });
            }
        }

        if !response.is_success() {
            debug!("RPC request failed with HTTP {}", response.status);
            return Err(RpcError::Transport {
                status: response.status,
            });
        }

        if let Some(rotated) = response.session_id.filter(|s| !s.is_empty() && *s != token) {
            if self.token.replace(&token, rotated) {
                debug!("Daemon rotated the session id");
            }
        }

        Ok(response.body)
    }

    /// Returns a session id newer than `stale`, doing at most one handshake for any number of
    /// concurrent callers holding the same stale id.
    async fn refresh(&self, stale: &str) -> Result<String, RpcError> {
        let _guard = self.refresh.lock().await;

        let current = self.token.get();
        if current != stale {
            debug!("Session id already refreshed by a concurrent call");
            return Ok(current);
        }

        let fresh = self.fetch_token().await?;
        self.token.replace(stale, fresh.clone());
        Ok(fresh)
    }

    /// GETs the base URL and reads the session id header. Any status is accepted, since the
    /// daemon typically answers the handshake with a `409` that carries the header.
    async fn fetch_token(&self) -> Result<String, RpcError> {
        let response = self
            .send(HttpMethod::Get, "/", None, self.token.get())
            .await?;
        debug!("Handshake answered with HTTP {}", response.status);

        match response.session_id {
            Some(token) => Ok(token),
            None => {
                warn!(
                    "No session id in handshake response (HTTP {})",
                    response.status
                );
                Ok(String::new())
            }
        }
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
        session_id: String,
    ) -> Result<HttpResponse, RpcError> {
        self.transport
            .send(HttpRequest {
                method,
                url: format!("{}{}", self.base_url, path),
                session_id,
                credentials: self.credentials.clone(),
                body,
            })
            .await
    }
}
