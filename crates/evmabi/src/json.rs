//! Contract ABI JSON loading

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::abi::{parse_type, ParamType};
use crate::function::{FunctionDescriptor, Param, StateMutability};
use crate::AbiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbiItem {
    #[serde(rename = "type", default = "default_item_type")]
    item_type: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    inputs: Vec<AbiParam>,
    #[serde(default)]
    outputs: Vec<AbiParam>,
    #[serde(default)]
    state_mutability: Option<StateMutability>,
    // pre-0.4.16 compilers
    #[serde(default)]
    constant: Option<bool>,
    #[serde(default)]
    payable: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbiParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    internal_type: Option<String>,
    #[serde(default)]
    components: Vec<AbiParam>,
}

fn default_item_type() -> String {
    "function".to_string()
}

impl AbiParam {
    fn resolve_type(&self) -> Result<ParamType, AbiError> {
        let components = self
            .components
            .iter()
            .map(AbiParam::resolve_type)
            .collect::<Result<Vec<_>, _>>()?;
        parse_type(&self.kind)?.with_components(components)
    }

    fn into_param(self) -> Result<Param, AbiError> {
        let kind = self.resolve_type()?;
        Ok(Param {
            name: self.name,
            kind,
            internal_type: self.internal_type,
        })
    }
}

impl AbiItem {
    fn state_mutability(&self) -> StateMutability {
        match (self.state_mutability, self.constant, self.payable) {
            (Some(mutability), _, _) => mutability,
            (None, Some(true), _) => StateMutability::View,
            (None, _, Some(true)) => StateMutability::Payable,
            _ => StateMutability::NonPayable,
        }
    }

    fn into_function(self) -> Result<FunctionDescriptor, AbiError> {
        let state_mutability = self.state_mutability();
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AbiError::Json("function item without a name".to_string()))?;
        let inputs = self
            .inputs
            .into_iter()
            .map(AbiParam::into_param)
            .collect::<Result<Vec<_>, _>>()?;
        let outputs = self
            .outputs
            .into_iter()
            .map(AbiParam::into_param)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FunctionDescriptor::new(name, inputs, outputs).with_state_mutability(state_mutability))
    }
}

/// Parse the `function` entries of a contract ABI
///
/// Accepts either a bare ABI array or a build artifact object carrying it
/// under `"abi"`. Events, errors, constructors, `fallback` and `receive`
/// entries are skipped.
pub fn parse_functions(json: &str) -> Result<Vec<FunctionDescriptor>, AbiError> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        array @ Value::Array(_) => array,
        Value::Object(mut map) => map
            .remove("abi")
            .ok_or_else(|| AbiError::Json("expected an ABI array or an object with \"abi\"".to_string()))?,
        _ => return Err(AbiError::Json("expected an ABI array".to_string())),
    };
    let items: Vec<AbiItem> = serde_json::from_value(items)?;

    let mut functions = Vec::new();
    for item in items {
        if item.item_type != "function" {
            debug!(item_type = %item.item_type, name = ?item.name, "skipping ABI item");
            continue;
        }
        functions.push(item.into_function()?);
    }
    Ok(functions)
}
