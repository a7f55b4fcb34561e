//! Node RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Define the `ChainApi` seam the signer and validator depend on
//! - Talk JSON over HTTP to a node's `/v1/chain/*` endpoints
//! - Bound every call with the configured timeout

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::transaction::Transaction;
use crate::blockchain::types::{ChainInfo, NetworkError, NetworkResult, RequiredKeys, RequiredKeysQuery};
use crate::config::ClientConfig;

/// Read-only chain methods served by the node.
pub const CHAIN_METHODS: &[&str] = &[
    "get_info",
    "get_block",
    "get_account",
    "get_code",
    "get_abi",
    "get_raw_code_and_abi",
    "get_table_rows",
    "get_currency_balance",
    "get_currency_stats",
    "get_producers",
    "get_required_keys",
    "push_transaction",
    "abi_json_to_bin",
    "abi_bin_to_json",
];

/// The node calls the client depends on.
#[async_trait]
pub trait ChainApi: Send + Sync {
    /// Chain metadata, including the chain id.
    async fn get_info(&self) -> NetworkResult<ChainInfo>;

    /// Subset of `available_keys` that must sign `transaction`.
    async fn get_required_keys(
        &self,
        transaction: &Transaction,
        available_keys: &[String],
    ) -> NetworkResult<RequiredKeys>;
}

/// `ChainApi` over HTTP.
#[derive(Clone)]
pub struct HttpChainApi {
    http: reqwest::Client,
    base_url: String,
    timeout_duration: Duration,
}

impl HttpChainApi {
    /// Create a client for `endpoint`.
    ///
    /// # Arguments
    /// * `endpoint` - Node base URL, e.g. `http://127.0.0.1:8888`
    /// * `timeout_secs` - Per-request timeout
    pub fn new(endpoint: &str, timeout_secs: u64) -> NetworkResult<Self> {
        let parsed: url::Url = endpoint
            .parse()
            .map_err(|e| NetworkError::Rpc(format!("Invalid endpoint URL '{}': {}", endpoint, e)))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            timeout_duration: Duration::from_secs(timeout_secs),
        })
    }

    /// Build from configuration. Offline configs yield `None`.
    pub fn from_config(config: &ClientConfig) -> NetworkResult<Option<Self>> {
        config
            .http_endpoint
            .as_deref()
            .map(|endpoint| Self::new(endpoint, config.rpc_timeout_secs))
            .transpose()
    }

    /// Node base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<B, R>(&self, method: &str, body: &B) -> NetworkResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/v1/chain/{}", self.base_url, method);

        let request = async {
            let response = self
                .http
                .post(&url)
                .json(body)
                .send()
                .await
                .map_err(|e| NetworkError::Rpc(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(NetworkError::Http {
                    status: status.as_u16(),
                    body,
                });
            }

            response
                .json::<R>()
                .await
                .map_err(|e| NetworkError::Decode(e.to_string()))
        };

        match timeout(self.timeout_duration, request).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(method = method, "RPC timeout");
                Err(NetworkError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }
}

#[async_trait]
impl ChainApi for HttpChainApi {
    async fn get_info(&self) -> NetworkResult<ChainInfo> {
        self.call("get_info", &serde_json::json!({})).await
    }

    async fn get_required_keys(
        &self,
        transaction: &Transaction,
        available_keys: &[String],
    ) -> NetworkResult<RequiredKeys> {
        let query = RequiredKeysQuery {
            transaction,
            available_keys,
        };
        self.call("get_required_keys", &query).await
    }
}

impl std::fmt::Debug for HttpChainApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChainApi")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
