//! Client configuration.

use std::{env, fmt, time::Duration};

/// RPC endpoint of a daemon running with default settings on the local host.
pub const DEFAULT_RPC_URL: &str = "http://localhost:9091/transmission/rpc";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP basic-auth credentials for the daemon.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The RPC username.
    pub username: String,
    /// The RPC password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials from a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the password.
        write!(
            f,
            "Credentials(username=\"{}\", password=<{}>)",
            self.username,
            if self.password.is_empty() {
                "unset"
            } else {
                "set"
            },
        )
    }
}

/// Configuration for the [`TransmissionClient`](crate::TransmissionClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the daemon's RPC endpoint.
    pub rpc_url: String,
    /// Basic-auth credentials, if the daemon requires them.
    pub credentials: Option<Credentials>,
    /// Timeout for a single HTTP round trip.
    pub timeout: Duration,
    /// Skip TLS certificate verification. Only useful for self-signed daemons behind a proxy.
    pub accept_invalid_certs: bool,
    /// Download directory sent with every add, unless overridden per call.
    pub download_dir: Option<String>,
    /// Add torrents paused.
    pub paused: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_owned(),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
            download_dir: None,
            paused: false,
        }
    }
}

impl ClientConfig {
    /// Reads the configuration from the environment.
    ///
    /// Recognized variables are `TRANSMISSION_RPC_URL`, `TRANSMISSION_USERNAME`,
    /// `TRANSMISSION_PASSWORD`, `TRANSMISSION_TIMEOUT_SECS`,
    /// `TRANSMISSION_ACCEPT_INVALID_CERTS`, `TRANSMISSION_DOWNLOAD_DIR` and
    /// `TRANSMISSION_PAUSED`. Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let credentials = non_empty("TRANSMISSION_USERNAME").map(|username| Credentials {
            username,
            password: lookup("TRANSMISSION_PASSWORD").unwrap_or_default(),
        });

        Self {
            rpc_url: non_empty("TRANSMISSION_RPC_URL").unwrap_or(defaults.rpc_url),
            credentials,
            timeout: non_empty("TRANSMISSION_TIMEOUT_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            accept_invalid_certs: non_empty("TRANSMISSION_ACCEPT_INVALID_CERTS")
                .map(|s| parse_flag(&s))
                .unwrap_or(defaults.accept_invalid_certs),
            download_dir: non_empty("TRANSMISSION_DOWNLOAD_DIR"),
            paused: non_empty("TRANSMISSION_PAUSED")
                .map(|s| parse_flag(&s))
                .unwrap_or(defaults.paused),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
