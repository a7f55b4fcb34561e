//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! ClientConfig (endpoint, timeout)
//!     → client.rs (ChainApi over HTTP)
//!     → chain_id.rs (background identity check at construction)
//!     → signing (required-keys query)
//! ```

pub mod chain_id;
pub mod client;
pub mod transaction;
pub mod types;

pub use chain_id::{check_chain_id, spawn_chain_id_check, ChainIdStatus};
pub use client::{ChainApi, HttpChainApi, CHAIN_METHODS};
pub use transaction::{Action, PermissionLevel, SignedTransaction, Transaction};
pub use types::{ChainInfo, NetworkError, NetworkResult, RequiredKeys};
