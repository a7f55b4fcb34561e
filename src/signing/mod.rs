//! Transaction signing.
//!
//! # Data Flow
//! ```text
//! KeySource (per-call override or client default)
//!     → orchestrator.rs (normalize, required keys, lookup)
//!     → SignatureSet
//! ```

pub mod orchestrator;
pub mod types;

pub use orchestrator::SignOrchestrator;
pub use types::{SignContext, SignError, SignResult, SignatureSet};
