//! HTTP round trips.
//!
//! This module provides the [`HttpTransport`] trait which abstracts the underlying HTTP client,
//! enabling mocking in tests, and [`ReqwestTransport`], the pooled implementation used in
//! production.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::trace;
use transmission_rpc_types::RpcError;

use crate::config::Credentials;

/// Header carrying the session token in both directions.
pub(crate) const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

const MAX_IDLE_CONNECTIONS: usize = 10;
const IDLE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
}

/// A single outbound request, fully resolved by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HttpRequest {
    pub(crate) method: HttpMethod,
    pub(crate) url: String,
    pub(crate) session_id: String,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) body: Option<Vec<u8>>,
}

/// The parts of a response the session looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) session_id: Option<String>,
    pub(crate) body: Vec<u8>,
}

impl HttpResponse {
    pub(crate) fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Internal trait that abstracts the HTTP client.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub(crate) trait HttpTransport {
    /// Performs one round trip. Fails only if the request could not be dispatched or the body
    /// could not be read; any HTTP status is returned as a response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RpcError>;
}

/// Default HTTP transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub(crate) fn new(timeout: Duration, accept_invalid_certs: bool) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS)
            .pool_idle_timeout(IDLE_TIMEOUT)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(connection_error)?;

        Ok(Self { client })
    }
}

/// Flattens a reqwest error and its sources into one message. Timeouts are named as such, since
/// reqwest reports them as a generic send failure.
fn connection_error(err: reqwest::Error) -> RpcError {
    let mut message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else {
        err.to_string()
    };
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    RpcError::Connection(message)
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RpcError> {
        trace!("{:?} {}", request.method, request.url);
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        }
        .header(ACCEPT, "application/json")
        .header(SESSION_ID_HEADER, request.session_id);

        if let Some(credentials) = &request.credentials {
            builder = builder.basic_auth(&credentials.username, Some(&credentials.password));
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status().as_u16();
        let session_id = response
            .headers()
            .get(SESSION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(connection_error)?
            .to_vec();

        Ok(HttpResponse {
            status,
            session_id,
            body,
        })
    }
}
