//! Structured transaction model.
//!
//! The structured form travels to the node for the required-keys query and to
//! key providers as context. The signed bytes are produced elsewhere.

use serde::{Deserialize, Serialize};

/// Account permission authorizing an action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PermissionLevel {
    pub actor: String,
    pub permission: String,
}

impl PermissionLevel {
    pub fn new(actor: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            permission: permission.into(),
        }
    }
}

/// A single contract action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Action {
    pub account: String,
    pub name: String,

    #[serde(default)]
    pub authorization: Vec<PermissionLevel>,

    /// Hex encoded action payload.
    #[serde(default)]
    pub data: String,
}

/// A transaction as sent to the node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Transaction {
    pub expiration: String,
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub max_net_usage_words: u32,
    pub max_cpu_usage_ms: u8,
    pub delay_sec: u32,
    pub context_free_actions: Vec<Action>,
    pub actions: Vec<Action>,
    pub transaction_extensions: Vec<serde_json::Value>,
}

impl Transaction {
    /// Start a transaction with one action.
    pub fn with_action(action: Action) -> Self {
        Self {
            actions: vec![action],
            ..Self::default()
        }
    }
}

/// A transaction with its signatures attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signatures: Vec<String>,
}
