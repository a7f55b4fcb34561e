//! Structured logging.
//!
//! # Responsibilities
//! - Define the `Logger` capability handed to the client
//! - Provide a no-op logger, a `tracing` backed one and the client default
//!   that only speaks when `verbose` is set
//! - Initialize the tracing subscriber for binaries

use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ClientConfig;

/// Diagnostic sink with two channels.
///
/// Both channels are optional in spirit: an implementation that ignores a
/// message is always valid.
pub trait Logger: Send + Sync {
    /// Advisory message.
    fn log(&self, message: &str);

    /// Error-level message.
    fn error(&self, message: &str);
}

/// Shared handle passed around the client.
pub type SharedLogger = Arc<dyn Logger>;

/// Drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

/// Forwards messages to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::warn!(target: "chain_client", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "chain_client", "{}", message);
    }
}

/// Client default: forwards to `inner` only while the live `verbose` flag is set.
pub struct VerboseLogger {
    config: Arc<ArcSwap<ClientConfig>>,
    inner: SharedLogger,
}

impl VerboseLogger {
    pub fn new(config: Arc<ArcSwap<ClientConfig>>, inner: SharedLogger) -> Self {
        Self { config, inner }
    }

    fn enabled(&self) -> bool {
        self.config.load().verbose
    }
}

impl Logger for VerboseLogger {
    fn log(&self, message: &str) {
        if self.enabled() {
            self.inner.log(message);
        }
    }

    fn error(&self, message: &str) {
        if self.enabled() {
            self.inner.error(message);
        }
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // A subscriber may already be installed (tests, embedding applications).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
