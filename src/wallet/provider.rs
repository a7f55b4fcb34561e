//! Key sources consulted when signing.
//!
//! # Design Decisions
//! - Static sources answer once; only a `KeyProvider` can answer the second
//!   round that asks for private keys by public key
//! - The two rounds are two trait methods, so a provider always knows which
//!   question it is answering

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::signing::types::SignContext;

/// Environment variable holding comma-separated keys.
pub const KEYS_ENV_VAR: &str = "CHAIN_CLIENT_KEYS";

/// A key provider failed to answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Key provider failed: {0}")]
pub struct ProviderError(pub String);

/// Callback-style key source.
#[async_trait]
pub trait KeyProvider: Send + Sync {
    /// First round: keys available for `ctx.transaction`, public or private.
    async fn resolve(&self, ctx: &SignContext<'_>) -> Result<Vec<String>, ProviderError>;

    /// Second round: private keys for `ctx.pubkeys_needed`.
    async fn lookup(&self, ctx: &SignContext<'_>) -> Result<Vec<String>, ProviderError>;
}

/// Where signing keys come from.
#[derive(Clone)]
pub enum KeySource {
    StaticList(Vec<String>),
    StaticValue(String),
    Callback(Arc<dyn KeyProvider>),
}

impl KeySource {
    /// Wrap a provider.
    pub fn callback(provider: impl KeyProvider + 'static) -> Self {
        KeySource::Callback(Arc::new(provider))
    }

    /// Read keys from `CHAIN_CLIENT_KEYS`. Unset or empty yields `None`.
    pub fn from_env() -> Option<Self> {
        let raw = std::env::var(KEYS_ENV_VAR).ok()?;
        let keys: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();
        if keys.is_empty() {
            None
        } else {
            Some(KeySource::StaticList(keys))
        }
    }

    pub fn is_callback(&self) -> bool {
        matches!(self, KeySource::Callback(_))
    }

    /// First-round resolution to raw key strings.
    pub async fn resolve(&self, ctx: &SignContext<'_>) -> Result<Vec<String>, ProviderError> {
        match self {
            KeySource::StaticList(keys) => Ok(keys.clone()),
            KeySource::StaticValue(key) => Ok(vec![key.clone()]),
            KeySource::Callback(provider) => provider.resolve(ctx).await,
        }
    }
}

impl From<&str> for KeySource {
    fn from(key: &str) -> Self {
        KeySource::StaticValue(key.to_string())
    }
}

impl From<String> for KeySource {
    fn from(key: String) -> Self {
        KeySource::StaticValue(key)
    }
}

impl From<Vec<String>> for KeySource {
    fn from(keys: Vec<String>) -> Self {
        KeySource::StaticList(keys)
    }
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::StaticList(keys) => write!(f, "StaticList(<{} keys>)", keys.len()),
            KeySource::StaticValue(_) => f.write_str("StaticValue(<redacted>)"),
            KeySource::Callback(_) => f.write_str("Callback"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Transaction;

    struct Fixed;

    #[async_trait]
    impl KeyProvider for Fixed {
        async fn resolve(&self, ctx: &SignContext<'_>) -> Result<Vec<String>, ProviderError> {
            assert!(ctx.pubkeys_needed.is_none());
            Ok(vec!["a".into(), "b".into()])
        }

        async fn lookup(&self, _ctx: &SignContext<'_>) -> Result<Vec<String>, ProviderError> {
            Err(ProviderError("not supported".into()))
        }
    }

    #[tokio::test]
    async fn test_resolve_variants() {
        let trx = Transaction::default();
        let ctx = SignContext::new(&trx);

        assert_eq!(KeySource::from("k").resolve(&ctx).await.unwrap(), vec!["k"]);
        assert_eq!(
            KeySource::from(vec!["x".to_string(), "y".to_string()]).resolve(&ctx).await.unwrap(),
            vec!["x", "y"]
        );
        let source = KeySource::callback(Fixed);
        assert!(source.is_callback());
        assert_eq!(source.resolve(&ctx).await.unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_debug_redacts() {
        let rendered = format!("{:?}", KeySource::from("secret"));
        assert!(!rendered.contains("secret"));
        let rendered = format!("{:?}", KeySource::from(vec!["s1".to_string(), "s2".to_string()]));
        assert_eq!(rendered, "StaticList(<2 keys>)");
    }
}
