//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! signing / blockchain / client
//!     → logging.rs (injected Logger capability + tracing setup)
//!     → metrics.rs (signature and failure counters)
//! ```
//!
//! # Design Decisions
//! - Diagnostics meant for the library user go through an injected `Logger`;
//!   the client default stays silent unless `verbose` is set
//! - Internal decision events use `tracing` directly
//! - The library records metrics but never installs an exporter

pub mod logging;
pub mod metrics;

pub use logging::{Logger, NoopLogger, SharedLogger, TracingLogger, VerboseLogger};
