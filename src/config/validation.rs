//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the endpoint URL and chain id format
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::ClientConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("http_endpoint '{0}' is not a valid http(s) URL")]
    InvalidEndpoint(String),

    #[error("chain_id must be 64 hex characters")]
    InvalidChainId,

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(endpoint) = &config.http_endpoint {
        let valid = url::Url::parse(endpoint)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::InvalidEndpoint(endpoint.clone()));
        }
    }

    if config.chain_id.len() != 64 || !config.chain_id.chars().all(|c| c.is_ascii_hexdigit()) {
        errors.push(ValidationError::InvalidChainId);
    }

    if config.expire_in_seconds == 0 {
        errors.push(ValidationError::ZeroValue("expire_in_seconds"));
    }

    if config.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue("rpc_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
