//! Read/write operation composition.
//!
//! # Responsibilities
//! - Build the read-only table from the node's chain methods
//! - Generate the write table from contract ABIs
//! - Merge both, refusing any name that appears in both
//!
//! # Design Decisions
//! - Conflicts are found before anything is inserted, so a failed merge
//!   leaves nothing behind
//! - Read entries are never shadowed

use std::collections::BTreeMap;
use thiserror::Error;

use crate::api::abi::ContractAbi;

/// Operation name reserved for arbitrary transactions.
pub const TRANSACTION_OPERATION: &str = "transaction";

/// Operation name reserved for loading a contract's actions.
pub const CONTRACT_OPERATION: &str = "contract";

/// What a named operation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Read-only chain method served by the node.
    Query { method: String },
    /// Contract action generated from an ABI.
    Action { contract: String, action: String },
    /// Build and sign an arbitrary transaction.
    Transaction,
    /// Load a deployed contract's actions.
    Contract,
}

impl Operation {
    pub fn is_write(&self) -> bool {
        !matches!(self, Operation::Query { .. })
    }
}

/// Operations by name.
pub type OperationTable = BTreeMap<String, Operation>;

/// Errors raised while assembling the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Conflicting methods in chain API and transaction API: {name}")]
    DuplicateOperation { name: String },

    #[error("ABI error for {account}: {reason}")]
    Abi { account: String, reason: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Read-only table for the given chain methods.
pub fn read_operations(methods: &[&str]) -> OperationTable {
    methods
        .iter()
        .map(|method| {
            (
                method.to_string(),
                Operation::Query {
                    method: method.to_string(),
                },
            )
        })
        .collect()
}

/// Write table: the built-in operations plus one entry per ABI action.
///
/// Two ABIs exposing the same action name is a `DuplicateOperation`.
pub fn write_operations(abis: &[ContractAbi]) -> ApiResult<OperationTable> {
    let mut table = OperationTable::new();
    table.insert(TRANSACTION_OPERATION.to_string(), Operation::Transaction);
    table.insert(CONTRACT_OPERATION.to_string(), Operation::Contract);

    for abi in abis {
        for action in abi.action_names() {
            if table.contains_key(action) {
                return Err(ApiError::DuplicateOperation {
                    name: action.to_string(),
                });
            }
            table.insert(
                action.to_string(),
                Operation::Action {
                    contract: abi.account.clone(),
                    action: action.to_string(),
                },
            );
        }
    }
    Ok(table)
}

/// Merge `write` into `read`.
pub fn compose(read: OperationTable, write: OperationTable) -> ApiResult<OperationTable> {
    if let Some(name) = read.keys().find(|name| write.contains_key(*name)) {
        return Err(ApiError::DuplicateOperation { name: name.clone() });
    }

    let mut merged = read;
    merged.extend(write);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::abi::{bundled_abis, AbiAction, AbiDefinition};
    use crate::blockchain::CHAIN_METHODS;

    fn abi(account: &str, actions: &[&str]) -> ContractAbi {
        ContractAbi {
            account: account.to_string(),
            abi: AbiDefinition {
                version: "snax::abi/1.0".to_string(),
                actions: actions
                    .iter()
                    .map(|a| AbiAction {
                        name: a.to_string(),
                        type_name: a.to_string(),
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn test_compose_bundled() {
        let write = write_operations(&bundled_abis().unwrap()).unwrap();
        let merged = compose(read_operations(CHAIN_METHODS), write).unwrap();

        assert_eq!(
            merged.get("get_info"),
            Some(&Operation::Query { method: "get_info".into() })
        );
        assert_eq!(
            merged.get("transfer"),
            Some(&Operation::Action {
                contract: "snax.token".into(),
                action: "transfer".into()
            })
        );
        assert_eq!(merged.get("transaction"), Some(&Operation::Transaction));
        assert!(merged["newaccount"].is_write());
    }

    #[test]
    fn test_conflict_fails_without_partial_merge() {
        let read = read_operations(&["get_info", "transfer"]);
        let write = write_operations(&[abi("snax.token", &["transfer"])]).unwrap();

        let err = compose(read, write).unwrap_err();
        assert_eq!(err, ApiError::DuplicateOperation { name: "transfer".into() });
        assert!(err.to_string().ends_with(": transfer"));
    }

    #[test]
    fn test_reserved_names_conflict() {
        let read = read_operations(&["contract"]);
        let write = write_operations(&[]).unwrap();
        assert!(compose(read, write).is_err());
    }

    #[test]
    fn test_duplicate_actions_across_abis() {
        let err = write_operations(&[abi("a", &["ping"]), abi("b", &["ping"])]).unwrap_err();
        assert_eq!(err, ApiError::DuplicateOperation { name: "ping".into() });
    }

    #[test]
    fn test_empty_read_table() {
        let merged = compose(OperationTable::new(), write_operations(&[]).unwrap()).unwrap();
        assert_eq!(merged.len(), 2);
    }
}
