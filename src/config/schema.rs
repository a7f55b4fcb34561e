//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Chain id the client expects when none is configured.
pub const DEFAULT_CHAIN_ID: &str =
    "cf057bbfb72640471fd910bcb67639c22df9f92470936cddc1ade0e2f2e7dc4f";

/// Root configuration for the chain client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Node HTTP endpoint. `None` puts the client in offline mode.
    pub http_endpoint: Option<String>,

    /// Expected chain identifier (hex, compared case-sensitively).
    pub chain_id: String,

    /// Default transaction expiration window in seconds.
    pub expire_in_seconds: u64,

    /// Node request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Route the default logger's diagnostics to `tracing`.
    pub verbose: bool,

    /// Debug output flag; stored for callers only.
    pub debug: bool,

    /// Broadcast flag; stored for callers only, the client never broadcasts.
    pub broadcast: bool,

    /// Sign transactions before returning them.
    pub sign: bool,
}

impl ClientConfig {
    /// A configuration with no node endpoint.
    pub fn offline() -> Self {
        Self {
            http_endpoint: None,
            ..Self::default()
        }
    }

    /// Whether a node endpoint is configured.
    pub fn is_offline(&self) -> bool {
        self.http_endpoint.is_none()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http_endpoint: Some("http://127.0.0.1:8888".to_string()),
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            expire_in_seconds: 60,
            rpc_timeout_secs: 10,
            verbose: false,
            debug: false,
            broadcast: true,
            sign: true,
        }
    }
}
