//! Signing inputs, outputs and error definitions.

use thiserror::Error;

use crate::blockchain::transaction::Transaction;
use crate::blockchain::types::NetworkError;
use crate::wallet::keys::KeyError;
use crate::wallet::provider::ProviderError;

/// Context handed to a `KeyProvider`.
///
/// `pubkeys_needed` is set only for the second round, when the node has named
/// public keys whose private keys are still unknown.
#[derive(Debug, Clone)]
pub struct SignContext<'a> {
    pub transaction: &'a Transaction,
    pub pubkeys_needed: Option<Vec<String>>,
}

impl<'a> SignContext<'a> {
    /// First-round context.
    pub fn new(transaction: &'a Transaction) -> Self {
        Self {
            transaction,
            pubkeys_needed: None,
        }
    }

    /// Second-round context asking for `pubkeys`.
    pub fn lookup(transaction: &'a Transaction, pubkeys: Vec<String>) -> Self {
        Self {
            transaction,
            pubkeys_needed: Some(pubkeys),
        }
    }
}

/// Signatures in the order their keys were queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureSet(Vec<String>);

impl SignatureSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for SignatureSet {
    fn from(signatures: Vec<String>) -> Self {
        Self(signatures)
    }
}

impl IntoIterator for SignatureSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Errors that can occur while signing a transaction.
#[derive(Debug, Error)]
pub enum SignError {
    #[error("This transaction requires a key provider for signing")]
    MissingKeyProvider,

    #[error("Missing key, check your key provider")]
    MissingKey,

    /// Entry at `index` parsed as neither a private nor a public key.
    #[error("Invalid key at position {index}: expecting a public or private key")]
    InvalidKey { index: usize },

    /// Offline signing was given a public key at `index`.
    #[error("Offline signing requires private keys (public key at position {index})")]
    OfflineRequiresPrivateKeys { index: usize },

    /// The node named no required keys. Carries the transaction as JSON.
    #[error("Missing required keys for {transaction}")]
    NoRequiredKeys { transaction: String },

    #[error("A key provider callback is needed for private key lookup")]
    PrivateKeyLookupRequiresCallback,

    /// Keys returned by the lookup round do not match the requested public keys.
    #[error("Private keys returned by lookup do not match requested public keys {requested:?}")]
    LookupKeyMismatch { requested: Vec<String> },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Key(#[from] KeyError),
}

impl SignError {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            SignError::MissingKeyProvider => "missing_key_provider",
            SignError::MissingKey => "missing_key",
            SignError::InvalidKey { .. } => "invalid_key",
            SignError::OfflineRequiresPrivateKeys { .. } => "offline_requires_private_keys",
            SignError::NoRequiredKeys { .. } => "no_required_keys",
            SignError::PrivateKeyLookupRequiresCallback => "lookup_requires_callback",
            SignError::LookupKeyMismatch { .. } => "lookup_key_mismatch",
            SignError::Provider(_) => "provider",
            SignError::Network(_) => "network",
            SignError::Key(_) => "key",
        }
    }
}

/// Result type for signing operations.
pub type SignResult<T> = Result<T, SignError>;
