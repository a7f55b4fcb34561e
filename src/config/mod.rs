//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (shared via Arc<ArcSwap<_>>)
//!     → view.rs (capability-gated facade handed to callers)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Callers never see the raw config once a client is built

pub mod loader;
pub mod schema;
pub mod validation;
pub mod view;

pub use loader::{load_config, ConfigError};
pub use schema::ClientConfig;
pub use view::{ConfigView, ConfigViewError};
