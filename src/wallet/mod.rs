//! Keys and key sources.
//!
//! # Data Flow
//! ```text
//! KeySource (static keys, env, or KeyProvider such as Keystore)
//!     → keys.rs (normalize into KeyMaterial, derive, sign)
//!     → signing orchestrator
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - Static keys from the environment only via `KeySource::from_env`

pub mod keys;
pub mod keystore;
pub mod provider;

pub use keys::{KeyError, KeyFormat, KeyMaterial, Secp256k1, TransactionSigner};
pub use keystore::Keystore;
pub use provider::{KeyProvider, KeySource, ProviderError, KEYS_ENV_VAR};
