//! Chain identity check.
//!
//! Compares the configured chain id with the one the node reports. The check
//! is advisory: outcomes become diagnostics on the injected logger and never
//! reach the caller that built the client.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::blockchain::client::ChainApi;
use crate::observability::{Logger, SharedLogger};

/// Outcome of a chain id check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainIdStatus {
    Match,
    Mismatch { expected: String, actual: String },
    Unavailable(String),
}

/// Fetch the node's chain id and compare it with `expected` (case-sensitive).
pub async fn check_chain_id(network: &dyn ChainApi, expected: &str, logger: &dyn Logger) -> ChainIdStatus {
    match network.get_info().await {
        Ok(info) if info.chain_id == expected => {
            tracing::debug!(chain_id = %expected, "Chain id verified");
            ChainIdStatus::Match
        }
        Ok(info) => {
            logger.log(&format!(
                "chainId mismatch, signatures will not match transaction authority. \
                 expected {} !== actual {}",
                expected, info.chain_id
            ));
            ChainIdStatus::Mismatch {
                expected: expected.to_string(),
                actual: info.chain_id,
            }
        }
        Err(e) => {
            logger.error(&format!("Warning, unable to validate chainId: {}", e));
            ChainIdStatus::Unavailable(e.to_string())
        }
    }
}

/// Run `check_chain_id` in the background.
///
/// Returns `None` when no Tokio runtime is available; the skip is reported on
/// the logger's error channel.
pub fn spawn_chain_id_check(
    network: Arc<dyn ChainApi>,
    expected: String,
    logger: SharedLogger,
) -> Option<JoinHandle<ChainIdStatus>> {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => Some(handle.spawn(async move {
            check_chain_id(network.as_ref(), &expected, logger.as_ref()).await
        })),
        Err(_) => {
            logger.error("Warning, unable to validate chainId: no async runtime");
            None
        }
    }
}
