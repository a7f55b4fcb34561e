//! Chain RPC payloads and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::transaction::Transaction;

/// Subset of `get_info` the client relies on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChainInfo {
    pub chain_id: String,

    #[serde(default)]
    pub head_block_num: u64,

    #[serde(default)]
    pub server_version: String,
}

/// Body of a `get_required_keys` request.
#[derive(Debug, Clone, Serialize)]
pub struct RequiredKeysQuery<'a> {
    pub transaction: &'a Transaction,
    pub available_keys: &'a [String],
}

/// Response of a `get_required_keys` request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RequiredKeys {
    pub required_keys: Vec<String>,
}

/// Errors that can occur while talking to a node.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Request could not be sent or the connection failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Node answered with a non-success status.
    #[error("HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// No endpoint configured.
    #[error("Network not available: {0}")]
    NotAvailable(String),
}

/// Result type for node operations.
pub type NetworkResult<T> = Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_info_ignores_extra_fields() {
        let info: ChainInfo = serde_json::from_str(
            r#"{"chain_id":"abc","head_block_num":7,"last_irreversible_block_num":5}"#,
        )
        .unwrap();
        assert_eq!(info.chain_id, "abc");
        assert_eq!(info.head_block_num, 7);
        assert!(info.server_version.is_empty());
    }

    #[test]
    fn test_query_body_shape() {
        let trx = Transaction::default();
        let keys = vec!["0xabc".to_string()];
        let body = serde_json::to_value(RequiredKeysQuery {
            transaction: &trx,
            available_keys: &keys,
        })
        .unwrap();
        assert_eq!(body["available_keys"][0], "0xabc");
        assert!(body["transaction"]["actions"].is_array());
    }

    #[test]
    fn test_error_display() {
        let err = NetworkError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = NetworkError::Http { status: 500, body: "boom".into() };
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_missing_endpoint_message() {
        let err = NetworkError::NotAvailable("no http_endpoint configured".into());
        assert_eq!(err.to_string(), "Network not available: no http_endpoint configured");
    }
}
