//! Blockchain transaction client.
//!
//! Composes read-only chain queries with ABI-generated write operations and
//! signs transactions with the smallest set of keys the chain requires.

pub mod api;
pub mod blockchain;
pub mod client;
pub mod config;
pub mod observability;
pub mod signing;
pub mod wallet;

pub use client::{ChainClient, ClientBuilder, ClientError, SignOptions};
pub use config::ClientConfig;
pub use signing::{SignError, SignatureSet};
pub use wallet::{KeySource, Keystore};
