//! Contract ABI definitions.
//!
//! Only the parts needed to name generated operations are modeled; struct and
//! table layouts are accepted and ignored.

use serde::{Deserialize, Serialize};

use crate::api::composer::{ApiError, ApiResult};

const SNAX_NULL_ABI: &str = include_str!("../../abi/snax.null.abi.json");
const SNAX_TOKEN_ABI: &str = include_str!("../../abi/snax.token.abi.json");
const SNAX_SYSTEM_ABI: &str = include_str!("../../abi/snax.system.abi.json");

/// An action a contract exposes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AbiAction {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,
}

/// Parsed ABI document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AbiDefinition {
    pub version: String,
    pub actions: Vec<AbiAction>,
}

/// ABI bound to the account that hosts the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractAbi {
    pub account: String,
    pub abi: AbiDefinition,
}

impl ContractAbi {
    /// Parse an ABI JSON document for `account`.
    pub fn from_json(account: impl Into<String>, json: &str) -> ApiResult<Self> {
        let account = account.into();
        let abi = serde_json::from_str(json).map_err(|e| ApiError::Abi {
            account: account.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { account, abi })
    }

    /// Action names in declaration order.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.abi.actions.iter().map(|a| a.name.as_str())
    }
}

/// ABIs bundled with the client: `snax.null`, `snax.token`, `snax`.
pub fn bundled_abis() -> ApiResult<Vec<ContractAbi>> {
    Ok(vec![
        ContractAbi::from_json("snax.null", SNAX_NULL_ABI)?,
        ContractAbi::from_json("snax.token", SNAX_TOKEN_ABI)?,
        ContractAbi::from_json("snax", SNAX_SYSTEM_ABI)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_abis_parse() {
        let abis = bundled_abis().unwrap();
        assert_eq!(abis.len(), 3);
        assert_eq!(abis[0].action_names().collect::<Vec<_>>(), vec!["nonce"]);
        assert!(abis[1].action_names().any(|a| a == "transfer"));
    }

    #[test]
    fn test_invalid_abi() {
        let err = ContractAbi::from_json("bad", "{\"actions\": 3}").unwrap_err();
        assert!(matches!(err, ApiError::Abi { ref account, .. } if account == "bad"));
    }
}
