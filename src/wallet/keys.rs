//! Key material and the key scheme capabilities.
//!
//! # Security
//! - Private keys are never logged; `Debug` output is redacted
//! - Normalized strings are only produced on the signing path

use alloy::primitives::{hex, keccak256, Address, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use thiserror::Error;

/// Errors from parsing, deriving or signing with keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Key encoding capability.
///
/// Each method accepts any encoding the scheme understands and returns the one
/// canonical string for that kind of key.
pub trait KeyFormat: Send + Sync {
    fn parse_private(&self, raw: &str) -> Result<String, KeyError>;

    fn parse_public(&self, raw: &str) -> Result<String, KeyError>;

    /// Canonical public key for a private key.
    fn derive_public(&self, private_key: &str) -> Result<String, KeyError>;
}

/// Signing capability.
pub trait TransactionSigner: Send + Sync {
    /// Sign `buf` with `private_key`, returning the encoded signature.
    fn sign(&self, buf: &[u8], private_key: &str) -> Result<String, KeyError>;
}

/// secp256k1 keys backed by `alloy`'s local signer.
///
/// - Private keys: 32-byte hex, bare (legacy) or `0x`-prefixed; canonical form
///   is lowercase `0x`-prefixed hex.
/// - Public keys are identified by their 20-byte account address, bare
///   lowercase or checksummed; canonical form is the EIP-55 checksum string.
/// - Signatures are 65-byte `r || s || v` over `keccak256(buf)`, `0x` hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1;

impl Secp256k1 {
    fn signer(private_key: &str) -> Result<PrivateKeySigner, KeyError> {
        let bytes: B256 = private_key
            .trim()
            .parse()
            .map_err(|_| KeyError::InvalidPrivateKey)?;
        PrivateKeySigner::from_bytes(&bytes).map_err(|_| KeyError::InvalidPrivateKey)
    }
}

impl KeyFormat for Secp256k1 {
    fn parse_private(&self, raw: &str) -> Result<String, KeyError> {
        let signer = Self::signer(raw)?;
        Ok(hex::encode_prefixed(signer.to_bytes()))
    }

    fn parse_public(&self, raw: &str) -> Result<String, KeyError> {
        let address: Address = raw.trim().parse().map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(address.to_checksum(None))
    }

    fn derive_public(&self, private_key: &str) -> Result<String, KeyError> {
        Ok(Self::signer(private_key)?.address().to_checksum(None))
    }
}

impl TransactionSigner for Secp256k1 {
    fn sign(&self, buf: &[u8], private_key: &str) -> Result<String, KeyError> {
        let signer = Self::signer(private_key)?;
        let signature = signer
            .sign_hash_sync(&keccak256(buf))
            .map_err(|e| KeyError::Signing(e.to_string()))?;
        Ok(hex::encode_prefixed(signature.as_bytes()))
    }
}

/// A normalized key.
#[derive(Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    Private(String),
    Public(String),
}

impl KeyMaterial {
    /// Normalize `raw`, trying the private encoding first.
    pub fn parse(format: &dyn KeyFormat, raw: &str) -> Option<Self> {
        if let Ok(private) = format.parse_private(raw) {
            return Some(KeyMaterial::Private(private));
        }
        format.parse_public(raw).ok().map(KeyMaterial::Public)
    }

    pub fn is_private(&self) -> bool {
        matches!(self, KeyMaterial::Private(_))
    }

    /// Public key for this entry, derived when the entry is private.
    pub fn public_key(&self, format: &dyn KeyFormat) -> Result<String, KeyError> {
        match self {
            KeyMaterial::Private(private) => format.derive_public(private),
            KeyMaterial::Public(public) => Ok(public.clone()),
        }
    }

    /// Private key, if this entry carries one.
    pub fn private_key(&self) -> Option<&str> {
        match self {
            KeyMaterial::Private(private) => Some(private),
            KeyMaterial::Public(_) => None,
        }
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyMaterial::Private(_) => f.write_str("Private(<redacted>)"),
            KeyMaterial::Public(public) => f.debug_tuple("Public").field(public).finish(),
        }
    }
}
