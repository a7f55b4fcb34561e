//! Signing key resolution.
//!
//! # Responsibilities
//! - Turn a key source into normalized key material
//! - Decide which keys must sign, asking the node when more than one key could
//! - Ask the key provider for private keys the caller only named publicly
//! - Sign the buffer with every selected key
//!
//! # Decision Order
//! ```text
//! no source              → MissingKeyProvider
//! resolve → empty        → MissingKey
//! normalize              → InvalidKey
//! one private key        → sign, no network
//! offline                → sign with every key (all must be private)
//! online                 → get_required_keys → queue known / collect missing
//! missing keys           → KeyProvider::lookup (callback sources only)
//! ```
//! Every branch either returns a complete `SignatureSet` or an error.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::client::ChainApi;
use crate::blockchain::transaction::Transaction;
use crate::observability::metrics;
use crate::signing::types::{SignContext, SignError, SignResult, SignatureSet};
use crate::wallet::keys::{KeyFormat, KeyMaterial, TransactionSigner};
use crate::wallet::provider::KeySource;

/// Computes the signature set for a transaction.
#[derive(Clone)]
pub struct SignOrchestrator {
    signer: Arc<dyn TransactionSigner>,
    format: Arc<dyn KeyFormat>,
    /// `None` means offline.
    network: Option<Arc<dyn ChainApi>>,
}

impl SignOrchestrator {
    pub fn new(
        signer: Arc<dyn TransactionSigner>,
        format: Arc<dyn KeyFormat>,
        network: Option<Arc<dyn ChainApi>>,
    ) -> Self {
        Self {
            signer,
            format,
            network,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.network.is_none()
    }

    /// Sign `buf` for `transaction` with the keys `key_source` yields.
    ///
    /// # Arguments
    /// * `buf` - Serialized transaction bytes to sign
    /// * `transaction` - Structured form, sent to the node and key provider
    /// * `key_source` - Per-call override or the client default
    pub async fn sign(
        &self,
        buf: &[u8],
        transaction: &Transaction,
        key_source: Option<&KeySource>,
    ) -> SignResult<SignatureSet> {
        let sign_id = Uuid::new_v4();
        let span = tracing::debug_span!("sign", %sign_id, offline = self.is_offline());

        match self.resolve_and_sign(buf, transaction, key_source).instrument(span).await {
            Ok(signatures) => {
                metrics::record_signatures(signatures.len());
                Ok(signatures)
            }
            Err(e) => {
                tracing::debug!(%sign_id, error = %e, "Signing failed");
                metrics::record_sign_failure(e.reason());
                Err(e)
            }
        }
    }

    async fn resolve_and_sign(
        &self,
        buf: &[u8],
        transaction: &Transaction,
        key_source: Option<&KeySource>,
    ) -> SignResult<SignatureSet> {
        let source = key_source.ok_or(SignError::MissingKeyProvider)?;

        let raw_keys = source.resolve(&SignContext::new(transaction)).await?;
        if raw_keys.is_empty() {
            return Err(SignError::MissingKey);
        }

        let keys = raw_keys
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                KeyMaterial::parse(self.format.as_ref(), raw).ok_or(SignError::InvalidKey { index })
            })
            .collect::<SignResult<Vec<_>>>()?;

        if let [KeyMaterial::Private(private)] = keys.as_slice() {
            tracing::debug!("Single private key, skipping required keys query");
            return self.sign_with(buf, [private.as_str()]);
        }

        let network = match &self.network {
            Some(network) => network,
            None => {
                let privates = keys
                    .iter()
                    .enumerate()
                    .map(|(index, key)| {
                        key.private_key()
                            .ok_or(SignError::OfflineRequiresPrivateKeys { index })
                    })
                    .collect::<SignResult<Vec<_>>>()?;
                tracing::debug!(keys = privates.len(), "Offline, signing with every key");
                return self.sign_with(buf, privates);
            }
        };

        // public key → private key when known; first-seen order is kept for the query
        let mut candidates = Vec::with_capacity(keys.len());
        let mut known: HashMap<String, Option<String>> = HashMap::with_capacity(keys.len());
        for key in &keys {
            let public = key.public_key(self.format.as_ref())?;
            let private = key.private_key().map(str::to_string);
            match known.get_mut(&public) {
                // a public-only entry never hides a private one for the same key
                Some(existing) => {
                    if existing.is_none() {
                        *existing = private;
                    }
                }
                None => {
                    candidates.push(public.clone());
                    known.insert(public, private);
                }
            }
        }

        metrics::record_required_keys_request();
        let required = network
            .get_required_keys(transaction, &candidates)
            .await?
            .required_keys;

        if required.is_empty() {
            return Err(SignError::NoRequiredKeys {
                transaction: serde_json::to_string(transaction).unwrap_or_default(),
            });
        }

        let mut queue = Vec::with_capacity(required.len());
        let mut missing = Vec::new();
        let mut seen = HashSet::with_capacity(required.len());
        for raw in &required {
            let public = self.format.parse_public(raw)?;
            if !seen.insert(public.clone()) {
                continue;
            }
            match known.get(&public) {
                Some(Some(private)) => queue.push(private.clone()),
                _ => missing.push(public),
            }
        }

        tracing::debug!(
            candidates = candidates.len(),
            required = required.len(),
            missing = missing.len(),
            "Required keys resolved"
        );

        if !missing.is_empty() {
            let provider = match source {
                KeySource::Callback(provider) => provider,
                _ => return Err(SignError::PrivateKeyLookupRequiresCallback),
            };

            let ctx = SignContext::lookup(transaction, missing.clone());
            let supplied = provider.lookup(&ctx).await?;
            queue.extend(self.check_lookup(&missing, supplied)?);
        }

        self.sign_with(buf, queue.iter().map(String::as_str))
    }

    /// Normalize lookup results and require that they cover exactly `missing`.
    fn check_lookup(&self, missing: &[String], supplied: Vec<String>) -> SignResult<Vec<String>> {
        let mismatch = || SignError::LookupKeyMismatch {
            requested: missing.to_vec(),
        };

        let mut covered = HashSet::with_capacity(missing.len());
        let mut privates = Vec::with_capacity(supplied.len());
        for raw in &supplied {
            let private = self.format.parse_private(raw).map_err(|_| mismatch())?;
            let public = self.format.derive_public(&private)?;
            if !missing.contains(&public) || !covered.insert(public) {
                return Err(mismatch());
            }
            privates.push(private);
        }

        if covered.len() != missing.len() {
            return Err(mismatch());
        }
        Ok(privates)
    }

    fn sign_with<'k>(&self, buf: &[u8], keys: impl IntoIterator<Item = &'k str>) -> SignResult<SignatureSet> {
        let signatures = keys
            .into_iter()
            .map(|private| self.signer.sign(buf, private))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SignatureSet::from(signatures))
    }
}

impl std::fmt::Debug for SignOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignOrchestrator")
            .field("offline", &self.is_offline())
            .finish()
    }
}
