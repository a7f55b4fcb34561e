//! Chain client.
//!
//! # Responsibilities
//! - Validate configuration and compose the operation table at construction
//! - Start the background chain id check when a node is configured
//! - Sign transactions with the per-call or default key source
//! - Hand callers a capability-gated view of the configuration

use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::api::{bundled_abis, compose, read_operations, write_operations, ApiError, ContractAbi, Operation, OperationTable};
use crate::blockchain::{
    spawn_chain_id_check, ChainApi, ChainIdStatus, HttpChainApi, NetworkError, SignedTransaction, Transaction,
    CHAIN_METHODS,
};
use crate::config::validation::{validate_config, ValidationError};
use crate::config::{ClientConfig, ConfigView};
use crate::observability::{SharedLogger, TracingLogger, VerboseLogger};
use crate::signing::{SignError, SignOrchestrator, SignatureSet};
use crate::wallet::{KeyFormat, KeySource, Secp256k1, TransactionSigner};

/// Errors surfaced by the client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid configuration: {0:?}")]
    Config(Vec<ValidationError>),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Sign(#[from] SignError),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Per-call signing options.
#[derive(Debug, Clone, Default)]
pub struct SignOptions {
    /// Overrides the client's default key source for this call.
    pub key_source: Option<KeySource>,
}

impl SignOptions {
    pub fn with_keys(keys: impl Into<KeySource>) -> Self {
        Self {
            key_source: Some(keys.into()),
        }
    }
}

/// Builder for [`ChainClient`].
pub struct ClientBuilder {
    config: ClientConfig,
    key_source: Option<KeySource>,
    network: Option<Arc<dyn ChainApi>>,
    logger: Option<SharedLogger>,
    abis: Option<Vec<ContractAbi>>,
    signer: Arc<dyn TransactionSigner>,
    format: Arc<dyn KeyFormat>,
}

impl ClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            key_source: None,
            network: None,
            logger: None,
            abis: None,
            signer: Arc::new(Secp256k1),
            format: Arc::new(Secp256k1),
        }
    }

    /// Default key source for every transaction.
    pub fn key_source(mut self, source: impl Into<KeySource>) -> Self {
        self.key_source = Some(source.into());
        self
    }

    /// Use `network` instead of an HTTP client for the configured endpoint.
    /// Ignored when the configuration is offline.
    pub fn network(mut self, network: Arc<dyn ChainApi>) -> Self {
        self.network = Some(network);
        self
    }

    /// Diagnostics sink. Without one, diagnostics go to `tracing` only while
    /// `verbose` is set.
    pub fn logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Contract ABIs to generate write operations from. Defaults to the bundled set.
    pub fn abis(mut self, abis: Vec<ContractAbi>) -> Self {
        self.abis = Some(abis);
        self
    }

    /// Replace the key scheme (parsing, derivation and signing).
    pub fn key_scheme<S>(mut self, scheme: Arc<S>) -> Self
    where
        S: KeyFormat + TransactionSigner + 'static,
    {
        self.signer = scheme.clone();
        self.format = scheme;
        self
    }

    /// Build the client.
    ///
    /// Fails on invalid configuration or conflicting operation names. The chain
    /// id check never fails construction.
    pub fn build(self) -> ClientResult<ChainClient> {
        validate_config(&self.config).map_err(ClientError::Config)?;

        let network: Option<Arc<dyn ChainApi>> = if self.config.is_offline() {
            None
        } else {
            match self.network {
                Some(network) => Some(network),
                None => HttpChainApi::from_config(&self.config)?
                    .map(|api| Arc::new(api) as Arc<dyn ChainApi>),
            }
        };

        let abis = match self.abis {
            Some(abis) => abis,
            None => bundled_abis()?,
        };
        let read = if network.is_some() {
            read_operations(CHAIN_METHODS)
        } else {
            OperationTable::new()
        };
        let operations = compose(read, write_operations(&abis)?)?;

        let chain_id = self.config.chain_id.clone();
        let config = Arc::new(ArcSwap::from_pointee(self.config));
        let logger: SharedLogger = match self.logger {
            Some(logger) => logger,
            None => Arc::new(VerboseLogger::new(config.clone(), Arc::new(TracingLogger))),
        };
        let chain_check = network
            .clone()
            .and_then(|n| spawn_chain_id_check(n, chain_id, logger));

        tracing::info!(
            endpoint = config.load().http_endpoint.as_deref().unwrap_or("offline"),
            operations = operations.len(),
            has_default_keys = self.key_source.is_some(),
            "Chain client initialized"
        );

        Ok(ChainClient {
            orchestrator: SignOrchestrator::new(self.signer, self.format, network.clone()),
            config,
            network,
            operations,
            key_source: self.key_source,
            chain_check: Mutex::new(chain_check),
        })
    }
}

/// Transaction client with read and write operations.
pub struct ChainClient {
    config: Arc<ArcSwap<ClientConfig>>,
    network: Option<Arc<dyn ChainApi>>,
    operations: OperationTable,
    orchestrator: SignOrchestrator,
    key_source: Option<KeySource>,
    chain_check: Mutex<Option<JoinHandle<ChainIdStatus>>>,
}

impl ChainClient {
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    /// Capability-gated view of the configuration.
    pub fn config(&self) -> ConfigView {
        ConfigView::new(self.config.clone())
    }

    pub fn operations(&self) -> &OperationTable {
        &self.operations
    }

    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Node connection, `None` when offline.
    pub fn network(&self) -> Option<&Arc<dyn ChainApi>> {
        self.network.as_ref()
    }

    pub fn is_offline(&self) -> bool {
        self.network.is_none()
    }

    /// Take the handle of the background chain id check, if one was started.
    pub fn take_chain_id_check(&self) -> Option<JoinHandle<ChainIdStatus>> {
        self.chain_check.lock().ok().and_then(|mut guard| guard.take())
    }

    /// Signatures for `buf` using the per-call key source or the default one.
    pub async fn sign(&self, buf: &[u8], transaction: &Transaction, options: &SignOptions) -> ClientResult<SignatureSet> {
        let source = options.key_source.as_ref().or(self.key_source.as_ref());
        Ok(self.orchestrator.sign(buf, transaction, source).await?)
    }

    /// Sign and attach signatures. With `sign` disabled the transaction is
    /// returned without signatures and no keys are consulted.
    pub async fn sign_transaction(
        &self,
        buf: &[u8],
        transaction: Transaction,
        options: &SignOptions,
    ) -> ClientResult<SignedTransaction> {
        if !self.config.load().sign {
            tracing::debug!("Signing disabled, returning unsigned transaction");
            return Ok(SignedTransaction {
                transaction,
                signatures: Vec::new(),
            });
        }

        let signatures = self.sign(buf, &transaction, options).await?;
        Ok(SignedTransaction {
            transaction,
            signatures: signatures.into_vec(),
        })
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.config.load();
        f.debug_struct("ChainClient")
            .field("http_endpoint", &config.http_endpoint)
            .field("chain_id", &config.chain_id)
            .field("operations", &self.operations.len())
            .field("key_source", &self.key_source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::abi::{AbiAction, AbiDefinition};

    const KEY_A: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_B: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    #[test]
    fn test_offline_client_has_no_read_operations() {
        let client = ChainClient::builder(ClientConfig::offline()).build().unwrap();
        assert!(client.is_offline());
        assert!(client.operation("get_info").is_none());
        assert_eq!(client.operation("transfer").map(Operation::is_write), Some(true));
        assert!(client.take_chain_id_check().is_none());
    }

    #[test]
    fn test_conflicting_abi_fails_construction() {
        let abi = ContractAbi {
            account: "evil".into(),
            abi: AbiDefinition {
                version: String::new(),
                actions: vec![AbiAction {
                    name: "get_info".into(),
                    type_name: "get_info".into(),
                }],
            },
        };
        let mut config = ClientConfig::default();
        config.http_endpoint = Some("http://127.0.0.1:9".into());

        let err = ChainClient::builder(config).abis(vec![abi]).build().unwrap_err();
        assert!(matches!(err, ClientError::Api(ApiError::DuplicateOperation { ref name }) if name == "get_info"));
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let mut config = ClientConfig::offline();
        config.rpc_timeout_secs = 0;
        assert!(matches!(ChainClient::builder(config).build(), Err(ClientError::Config(_))));
    }

    #[tokio::test]
    async fn test_offline_multi_signature() {
        let client = ChainClient::builder(ClientConfig::offline())
            .key_source(vec![KEY_A.to_string(), KEY_B.to_string()])
            .build()
            .unwrap();

        let signed = client
            .sign_transaction(b"buf", Transaction::default(), &SignOptions::default())
            .await
            .unwrap();
        assert_eq!(signed.signatures.len(), 2);
    }

    #[tokio::test]
    async fn test_per_call_key_source_wins() {
        let client = ChainClient::builder(ClientConfig::offline())
            .key_source(vec![KEY_A.to_string(), KEY_B.to_string()])
            .build()
            .unwrap();

        let signatures = client
            .sign(b"buf", &Transaction::default(), &SignOptions::with_keys(KEY_B))
            .await
            .unwrap();
        assert_eq!(signatures.as_slice(), &[Secp256k1.sign(b"buf", KEY_B).unwrap()]);
    }

    #[tokio::test]
    async fn test_sign_disabled_skips_keys() {
        let client = ChainClient::builder(ClientConfig::offline()).build().unwrap();
        client.config().set_sign(false);

        // No key source at all: signing would fail with MissingKeyProvider.
        let signed = client
            .sign_transaction(b"buf", Transaction::default(), &SignOptions::default())
            .await
            .unwrap();
        assert!(signed.signatures.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_provider_surfaces() {
        let client = ChainClient::builder(ClientConfig::offline()).build().unwrap();
        let err = client
            .sign(b"buf", &Transaction::default(), &SignOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Sign(SignError::MissingKeyProvider)));
    }

    #[test]
    fn test_config_view_shares_state() {
        let client = ChainClient::builder(ClientConfig::offline()).build().unwrap();
        let view = client.config();
        view.set_verbose(true);
        assert!(client.config().verbose());
        assert!(client.config().set("chain_id", serde_json::json!("x")).is_err());
    }

    #[tokio::test]
    async fn test_debug_and_broadcast_flags_leave_signing_alone() {
        let client = ChainClient::builder(ClientConfig::offline())
            .key_source(KEY_A)
            .build()
            .unwrap();
        client.config().set_debug(true);
        client.config().set_broadcast(true);

        let signed = client
            .sign_transaction(b"buf", Transaction::default(), &SignOptions::default())
            .await
            .unwrap();
        assert_eq!(signed.signatures, vec![Secp256k1.sign(b"buf", KEY_A).unwrap()]);
        assert!(client.config().broadcast());
    }
}
