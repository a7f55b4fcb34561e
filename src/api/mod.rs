//! Client API surface.
//!
//! # Data Flow
//! ```text
//! CHAIN_METHODS (node queries)      ContractAbi list (bundled or caller supplied)
//!     → read_operations                 → write_operations
//!                  ↘                   ↙
//!                     compose (conflict check)
//!                         → OperationTable
//! ```

pub mod abi;
pub mod composer;

pub use abi::{bundled_abis, ContractAbi};
pub use composer::{compose, read_operations, write_operations, ApiError, Operation, OperationTable};
