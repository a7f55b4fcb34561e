//! Capability-gated view over the shared client configuration.
//!
//! # Responsibilities
//! - Expose a fixed set of fields read-only and another set read-write
//! - Reject every other field, for reads and writes alike
//!
//! # Design Decisions
//! - Access is decided by field name alone (`access`), never by value
//! - Typed accessors cover the allow-listed fields; setters exist only for
//!   read-write ones
//! - Name-keyed `get`/`set` apply the same ACL at runtime
//! - Shallow: values handed out are copies, nothing nested is guarded
//! - Writes publish a new snapshot through `ArcSwap`, so in-flight readers
//!   keep a consistent config

use arc_swap::ArcSwap;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::config::schema::ClientConfig;

/// Fields that can be read but never written.
pub const READ_ONLY_FIELDS: &[&str] = &["http_endpoint", "chain_id", "expire_in_seconds"];

/// Fields that can be read and written.
pub const READ_WRITE_FIELDS: &[&str] = &["verbose", "debug", "broadcast", "sign"];

/// Access level granted for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
    Denied,
}

/// Access level for `field`.
pub fn access(field: &str) -> Access {
    if READ_ONLY_FIELDS.contains(&field) {
        Access::ReadOnly
    } else if READ_WRITE_FIELDS.contains(&field) {
        Access::ReadWrite
    } else {
        Access::Denied
    }
}

/// Errors raised by the configuration view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigViewError {
    #[error("Access denied: {field}")]
    AccessDenied { field: String },

    #[error("Invalid value for {field}")]
    InvalidValue { field: String },
}

pub type ConfigViewResult<T> = Result<T, ConfigViewError>;

/// Facade handed to callers of the client.
#[derive(Clone)]
pub struct ConfigView {
    inner: Arc<ArcSwap<ClientConfig>>,
}

impl ConfigView {
    /// Wrap shared configuration state.
    pub fn new(inner: Arc<ArcSwap<ClientConfig>>) -> Self {
        Self { inner }
    }

    pub fn http_endpoint(&self) -> Option<String> {
        self.inner.load().http_endpoint.clone()
    }

    pub fn chain_id(&self) -> String {
        self.inner.load().chain_id.clone()
    }

    pub fn expire_in_seconds(&self) -> u64 {
        self.inner.load().expire_in_seconds
    }

    pub fn verbose(&self) -> bool {
        self.inner.load().verbose
    }

    pub fn set_verbose(&self, value: bool) {
        self.update(|c| c.verbose = value);
    }

    pub fn debug(&self) -> bool {
        self.inner.load().debug
    }

    pub fn set_debug(&self, value: bool) {
        self.update(|c| c.debug = value);
    }

    pub fn broadcast(&self) -> bool {
        self.inner.load().broadcast
    }

    pub fn set_broadcast(&self, value: bool) {
        self.update(|c| c.broadcast = value);
    }

    pub fn sign(&self) -> bool {
        self.inner.load().sign
    }

    pub fn set_sign(&self, value: bool) {
        self.update(|c| c.sign = value);
    }

    /// Read a field by name.
    pub fn get(&self, field: &str) -> ConfigViewResult<Value> {
        if access(field) == Access::Denied {
            return Err(denied(field));
        }

        let config = self.inner.load();
        let value = match field {
            "http_endpoint" => config
                .http_endpoint
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
            "chain_id" => Value::String(config.chain_id.clone()),
            "expire_in_seconds" => Value::from(config.expire_in_seconds),
            "verbose" => Value::Bool(config.verbose),
            "debug" => Value::Bool(config.debug),
            "broadcast" => Value::Bool(config.broadcast),
            "sign" => Value::Bool(config.sign),
            _ => return Err(denied(field)),
        };
        Ok(value)
    }

    /// Write a field by name. Only read-write fields accept writes.
    pub fn set(&self, field: &str, value: Value) -> ConfigViewResult<()> {
        if access(field) != Access::ReadWrite {
            return Err(denied(field));
        }

        let flag = value.as_bool().ok_or_else(|| ConfigViewError::InvalidValue {
            field: field.to_string(),
        })?;

        match field {
            "verbose" => self.set_verbose(flag),
            "debug" => self.set_debug(flag),
            "broadcast" => self.set_broadcast(flag),
            "sign" => self.set_sign(flag),
            _ => return Err(denied(field)),
        }
        Ok(())
    }

    fn update(&self, apply: impl Fn(&mut ClientConfig)) {
        self.inner.rcu(|current| {
            let mut next = ClientConfig::clone(current);
            apply(&mut next);
            next
        });
    }
}

impl std::fmt::Debug for ConfigView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.inner.load();
        f.debug_struct("ConfigView")
            .field("http_endpoint", &config.http_endpoint)
            .field("chain_id", &config.chain_id)
            .finish_non_exhaustive()
    }
}

fn denied(field: &str) -> ConfigViewError {
    ConfigViewError::AccessDenied {
        field: field.to_string(),
    }
}
