//! Solidity type string parsing

use std::str::FromStr;

use super::types::ParamType;
use crate::AbiError;

/// Parse a Solidity type string (e.g. `uint256`, `address[4]`,
/// `(address,bytes)[]`)
///
/// A bare `tuple` parses to `Tuple([])`; its components come from the
/// surrounding ABI description, see [`ParamType::with_components`].
pub fn parse_type(raw: &str) -> Result<ParamType, AbiError> {
    parse(raw.trim()).ok_or_else(|| AbiError::UnrecognizedType(raw.trim().to_string()))
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s)
    }
}

fn parse(s: &str) -> Option<ParamType> {
    if let Some(rest) = s.strip_suffix(']') {
        let open = rest.rfind('[')?;
        let element = parse(&rest[..open])?;
        let len = &rest[open + 1..];
        if len.is_empty() {
            return Some(ParamType::Array(Box::new(element)));
        }
        let len = parse_decimal(len)?;
        if len == 0 {
            return None;
        }
        return Some(ParamType::FixedArray(Box::new(element), len));
    }

    if let Some(inner) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        return parse_list(inner).map(ParamType::Tuple);
    }

    match s {
        "address" => return Some(ParamType::Address),
        "bool" => return Some(ParamType::Bool),
        "string" => return Some(ParamType::String),
        "bytes" => return Some(ParamType::Bytes),
        "tuple" => return Some(ParamType::Tuple(vec![])),
        _ => {}
    }

    let split = s.find(|c: char| c.is_ascii_digit())?;
    let (name, width) = s.split_at(split);
    let width = parse_decimal(width)?;
    match name {
        "uint" if valid_int_width(width) => Some(ParamType::Uint(width)),
        "int" if valid_int_width(width) => Some(ParamType::Int(width)),
        "bytes" if (1..=32).contains(&width) => Some(ParamType::FixedBytes(width)),
        _ => None,
    }
}

/// Parse a comma separated list of types, splitting only at the top level
pub(crate) fn parse_list(inner: &str) -> Option<Vec<ParamType>> {
    let inner = inner.trim();
    if inner.is_empty() {
        return Some(vec![]);
    }

    let mut types = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                types.push(parse(inner[start..i].trim())?);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    types.push(parse(inner[start..].trim())?);
    Some(types)
}

pub(crate) fn valid_int_width(bits: usize) -> bool {
    (8..=256).contains(&bits) && bits % 8 == 0
}

// Digits only, no sign and no leading zero
fn parse_decimal(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) || (s.len() > 1 && s.starts_with('0')) {
        return None;
    }
    s.parse().ok()
}
