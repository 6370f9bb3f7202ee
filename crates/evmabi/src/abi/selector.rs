//! Function signatures and selectors

use super::parse::parse_list;
use super::types::ParamType;
use crate::AbiError;

/// Canonical signature, e.g. `transfer(address,uint256)`
pub fn canonical_signature(name: &str, types: &[ParamType]) -> String {
    let params: Vec<String> = types.iter().map(ToString::to_string).collect();
    format!("{}({})", name, params.join(","))
}

/// Compute function selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; 4] {
    evmabi_crypto::selector(signature.as_bytes())
}

/// Render a selector as `0x` followed by 8 hex digits
pub fn selector_hex(selector: &[u8; 4]) -> String {
    format!("0x{}", hex::encode(selector))
}

/// Split `name(type1,type2)` into its name and parameter types
pub fn parse_signature(signature: &str) -> Result<(String, Vec<ParamType>), AbiError> {
    let signature = signature.trim();
    let unrecognized = || AbiError::UnrecognizedType(signature.to_string());

    let open = signature.find('(').ok_or_else(unrecognized)?;
    let name = signature[..open].trim();
    let params = signature[open + 1..].strip_suffix(')').ok_or_else(unrecognized)?;

    let valid_name = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if !valid_name {
        return Err(unrecognized());
    }

    let types = parse_list(params).ok_or_else(unrecognized)?;
    Ok((name.to_string(), types))
}
