//! ABI encoding

use evmabi_primitives::{u256_to_word, U256, WORD_SIZE};
use tracing::trace;

use super::parse::valid_int_width;
use super::types::{ParamType, Token};
use crate::AbiError;

/// Encode tokens against their declared types
///
/// `types` and `tokens` are parallel; the result is the head/tail encoding
/// of the list, always a multiple of 32 bytes long.
pub fn encode(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, AbiError> {
    if types.len() != tokens.len() {
        return Err(AbiError::ParamCountMismatch {
            expected: types.len(),
            got: tokens.len(),
        });
    }
    let items: Vec<_> = types.iter().zip(tokens).collect();
    encode_sequence(&items)
}

/// Encode a list of `(type, value)` pairs
pub fn encode_pairs(pairs: &[(ParamType, Token)]) -> Result<Vec<u8>, AbiError> {
    let items: Vec<_> = pairs.iter().map(|(ty, token)| (ty, token)).collect();
    encode_sequence(&items)
}

/// Encode function call (selector + params)
pub fn encode_function_call(
    selector: [u8; 4],
    types: &[ParamType],
    tokens: &[Token],
) -> Result<Vec<u8>, AbiError> {
    let mut result = selector.to_vec();
    result.extend(encode(types, tokens)?);
    Ok(result)
}

/// Head/tail layout shared by argument lists, arrays and tuples
///
/// Pointers to dynamic elements are relative to the start of this list.
fn encode_sequence(items: &[(&ParamType, &Token)]) -> Result<Vec<u8>, AbiError> {
    // elements are encoded before the head is sized, so a declared length
    // never reserves memory its token cannot fill
    let encoded = items
        .iter()
        .map(|(param_type, token)| encode_token(param_type, token))
        .collect::<Result<Vec<_>, _>>()?;
    let head_len = items
        .iter()
        .map(|(ty, _)| ty.memory_usage())
        .fold(0, usize::saturating_add);

    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for ((param_type, _), encoded) in items.iter().zip(encoded) {
        if param_type.is_dynamic() {
            let offset = head_len + tail.len();
            head.extend_from_slice(&u256_to_word(&U256::from(offset)));
            tail.extend(encoded);
        } else {
            if encoded.len() != param_type.memory_usage() {
                return Err(AbiError::Encoding(format!(
                    "{} encoded to {} bytes, expected {}",
                    param_type,
                    encoded.len(),
                    param_type.memory_usage()
                )));
            }
            head.extend(encoded);
        }
    }

    trace!(elements = items.len(), head_len, tail_len = tail.len(), "encoded sequence");

    head.extend(tail);
    Ok(head)
}

/// Encode a single token
fn encode_token(param_type: &ParamType, token: &Token) -> Result<Vec<u8>, AbiError> {
    match (param_type, token) {
        (ParamType::Address, Token::Address(addr)) => Ok(addr.to_word().to_vec()),
        (ParamType::Uint(bits), Token::Uint(value)) => {
            check_int_width(param_type, *bits)?;
            if value.bits() > *bits {
                return Err(AbiError::mismatch(value, param_type));
            }
            Ok(encode_u256(value))
        }
        (ParamType::Int(bits), Token::Int(value)) => {
            check_int_width(param_type, *bits)?;
            if !value.fits_in_bits(*bits) {
                return Err(AbiError::mismatch(value, param_type));
            }
            Ok(encode_u256(&value.into_twos_complement()))
        }
        (ParamType::Bool, Token::Bool(b)) => Ok(encode_u256(&U256::from(u8::from(*b)))),
        (ParamType::FixedBytes(size), Token::FixedBytes(data)) => {
            if !(1..=WORD_SIZE).contains(size) {
                return Err(AbiError::UnsupportedType(param_type.to_string()));
            }
            if data.len() != *size {
                return Err(AbiError::mismatch(token, param_type));
            }
            let mut buf = [0u8; WORD_SIZE];
            buf[..data.len()].copy_from_slice(data);
            Ok(buf.to_vec())
        }
        (ParamType::Bytes, Token::Bytes(data)) => Ok(encode_bytes(data)),
        (ParamType::String, Token::String(s)) => Ok(encode_bytes(s.as_bytes())),
        (ParamType::Array(inner), Token::Array(tokens)) => {
            let mut result = encode_u256(&U256::from(tokens.len()));
            let items: Vec<_> = tokens.iter().map(|t| (inner.as_ref(), t)).collect();
            result.extend(encode_sequence(&items)?);
            Ok(result)
        }
        (ParamType::FixedArray(inner, len), Token::FixedArray(tokens)) => {
            if tokens.len() != *len {
                return Err(AbiError::ArrayLengthMismatch {
                    expected: *len,
                    got: tokens.len(),
                });
            }
            let items: Vec<_> = tokens.iter().map(|t| (inner.as_ref(), t)).collect();
            encode_sequence(&items)
        }
        (ParamType::Tuple(types), Token::Tuple(tokens)) => {
            if types.is_empty() {
                return Err(AbiError::UnsupportedType(param_type.to_string()));
            }
            if types.len() != tokens.len() {
                return Err(AbiError::mismatch(token, param_type));
            }
            let items: Vec<_> = types.iter().zip(tokens).collect();
            encode_sequence(&items)
        }
        _ => Err(AbiError::mismatch(token, param_type)),
    }
}

fn check_int_width(param_type: &ParamType, bits: usize) -> Result<(), AbiError> {
    if valid_int_width(bits) {
        Ok(())
    } else {
        Err(AbiError::UnsupportedType(param_type.to_string()))
    }
}

/// Encode a U256 as 32 bytes
fn encode_u256(value: &U256) -> Vec<u8> {
    u256_to_word(value).to_vec()
}

/// Encode dynamic bytes: length word, then content right-padded to a word
fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut result = encode_u256(&U256::from(data.len()));

    let padded_len = data.len().div_ceil(WORD_SIZE) * WORD_SIZE;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    result.extend(padded);

    result
}
