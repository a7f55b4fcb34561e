//! In-memory keystore that answers both key provider rounds.
//!
//! The first round advertises public keys only; private keys leave the store
//! only when the node has named their public keys as required.

use async_trait::async_trait;
use std::sync::Arc;

use crate::signing::types::SignContext;
use crate::wallet::keys::{KeyError, KeyFormat};
use crate::wallet::provider::{KeyProvider, ProviderError};

/// Public/private key pairs held in memory.
pub struct Keystore {
    format: Arc<dyn KeyFormat>,
    /// (canonical public, canonical private)
    pairs: Vec<(String, String)>,
}

impl Keystore {
    /// Build from private keys in any accepted encoding.
    pub fn new<I, S>(format: Arc<dyn KeyFormat>, private_keys: I) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pairs = Vec::new();
        for key in private_keys {
            let private = format.parse_private(key.as_ref())?;
            let public = format.derive_public(&private)?;
            if !pairs.iter().any(|(p, _)| *p == public) {
                pairs.push((public, private));
            }
        }
        Ok(Self { format, pairs })
    }

    /// Public keys held, in insertion order.
    pub fn public_keys(&self) -> Vec<String> {
        self.pairs.iter().map(|(public, _)| public.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[async_trait]
impl KeyProvider for Keystore {
    async fn resolve(&self, _ctx: &SignContext<'_>) -> Result<Vec<String>, ProviderError> {
        Ok(self.public_keys())
    }

    async fn lookup(&self, ctx: &SignContext<'_>) -> Result<Vec<String>, ProviderError> {
        let needed = ctx.pubkeys_needed.as_deref().unwrap_or_default();
        let mut found = Vec::with_capacity(needed.len());
        for raw in needed {
            let public = self
                .format
                .parse_public(raw)
                .map_err(|e| ProviderError(e.to_string()))?;
            match self.pairs.iter().find(|(p, _)| *p == public) {
                Some((_, private)) => found.push(private.clone()),
                None => return Err(ProviderError(format!("no private key for {}", public))),
            }
        }
        Ok(found)
    }
}

impl std::fmt::Debug for Keystore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keystore")
            .field("public_keys", &self.public_keys())
            .finish()
    }
}
