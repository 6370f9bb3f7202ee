//! ABI decoding

use std::fmt;
use std::str::FromStr;

use evmabi_primitives::{word_to_u256, Address, U256, WORD_SIZE};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::int::I256;
use super::parse::valid_int_width;
use super::types::{ParamType, Token};
use crate::AbiError;

/// How strictly `bool` words are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolDecoding {
    /// Only the words 0 and 1
    #[default]
    Strict,
    /// Also 27/31/35 as false and 28/32/36 as true, as some contracts
    /// return recovery-id style flags
    Legacy,
}

impl BoolDecoding {
    fn decode(self, byte: u8) -> Option<bool> {
        match (self, byte) {
            (_, 0) => Some(false),
            (_, 1) => Some(true),
            (BoolDecoding::Legacy, 27 | 31 | 35) => Some(false),
            (BoolDecoding::Legacy, 28 | 32 | 36) => Some(true),
            _ => None,
        }
    }
}

impl fmt::Display for BoolDecoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolDecoding::Strict => write!(f, "strict"),
            BoolDecoding::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for BoolDecoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(BoolDecoding::Strict),
            "legacy" => Ok(BoolDecoding::Legacy),
            other => Err(format!("unknown bool decoding mode: {}", other)),
        }
    }
}

/// Decoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Accepted `bool` encodings
    #[serde(default)]
    pub bool_decoding: BoolDecoding,
}

/// Configured ABI decoder
///
/// Holds only options, so one value can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

/// Window of the input against which offsets are resolved
#[derive(Clone, Copy)]
struct Region<'a> {
    data: &'a [u8],
    /// Absolute position of `data[0]` in the caller's buffer
    base: usize,
}

impl<'a> Region<'a> {
    fn window(&self, at: usize, len: usize, ty: &ParamType) -> Result<Region<'a>, AbiError> {
        match at.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(Region {
                data: &self.data[at..end],
                base: self.base + at,
            }),
            _ => Err(self.truncated(at, len, ty)),
        }
    }

    fn tail(&self, at: usize, ty: &ParamType) -> Result<Region<'a>, AbiError> {
        if at > self.data.len() {
            return Err(self.truncated(at, WORD_SIZE, ty));
        }
        Ok(Region {
            data: &self.data[at..],
            base: self.base + at,
        })
    }

    fn word(&self, at: usize, ty: &ParamType) -> Result<[u8; WORD_SIZE], AbiError> {
        let window = self.window(at, WORD_SIZE, ty)?;
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(window.data);
        Ok(word)
    }

    /// Offset or length word; must fit in usize
    fn read_usize(&self, at: usize, ty: &ParamType) -> Result<usize, AbiError> {
        let value = word_to_u256(&self.word(at, ty)?);
        if value.bits() > 64 {
            return Err(self.invalid(at, ty, format!("{} does not fit in usize", value)));
        }
        usize::try_from(value.low_u64())
            .map_err(|_| self.invalid(at, ty, format!("{} does not fit in usize", value)))
    }

    fn truncated(&self, at: usize, needed: usize, ty: &ParamType) -> AbiError {
        AbiError::TruncatedData {
            ty: ty.to_string(),
            offset: self.base.saturating_add(at),
            needed,
            available: self.data.len().saturating_sub(at),
        }
    }

    fn invalid(&self, at: usize, ty: &ParamType, reason: String) -> AbiError {
        AbiError::InvalidValue {
            ty: ty.to_string(),
            offset: self.base.saturating_add(at),
            reason,
        }
    }
}

impl Decoder {
    /// Create a decoder with the given options
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Create a decoder with the given bool strictness
    pub fn with_bool_decoding(bool_decoding: BoolDecoding) -> Self {
        Self::new(DecodeOptions { bool_decoding })
    }

    /// Decoder options
    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decode tokens from ABI-encoded data
    pub fn decode(&self, types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
        let region = Region { data, base: 0 };
        let mut cursor = 0;
        let mut tokens = Vec::with_capacity(types.len());

        for param_type in types {
            // buffer ended cleanly after some values: the caller asked for
            // more outputs than the function returned
            if !tokens.is_empty() && cursor == data.len() {
                return Err(AbiError::OutputCountMismatch {
                    expected: types.len(),
                    got: tokens.len(),
                });
            }
            let (token, next) = self.decode_element(param_type, region, cursor)?;
            tokens.push(token);
            cursor = next;
        }

        Ok(tokens)
    }

    /// Decode one element of a list whose head slot starts at `cursor`,
    /// returning the token and the cursor of the next slot.
    fn decode_element(
        &self,
        param_type: &ParamType,
        region: Region<'_>,
        cursor: usize,
    ) -> Result<(Token, usize), AbiError> {
        if param_type.is_dynamic() {
            let offset = region.read_usize(cursor, param_type)?;
            trace!(ty = %param_type, at = region.base + cursor, offset, "following dynamic offset");
            let tail = region.tail(offset, param_type)?;
            let token = self.decode_value(param_type, tail)?;
            Ok((token, cursor + WORD_SIZE))
        } else {
            let size = param_type.memory_usage();
            let window = region.window(cursor, size, param_type)?;
            let token = self.decode_value(param_type, window)?;
            Ok((token, cursor + size))
        }
    }

    /// Decode consecutive elements laid out from the start of `region`
    fn decode_sequence<'t>(
        &self,
        types: impl Iterator<Item = &'t ParamType>,
        region: Region<'_>,
    ) -> Result<Vec<Token>, AbiError> {
        let mut cursor = 0;
        // a declared count is only a claim until the data backs it
        let mut tokens = Vec::with_capacity(types.size_hint().0.min(region.data.len() / WORD_SIZE));
        for param_type in types {
            let (token, next) = self.decode_element(param_type, region, cursor)?;
            tokens.push(token);
            cursor = next;
        }
        Ok(tokens)
    }

    /// Decode a value whose encoding starts at the beginning of `region`
    fn decode_value(&self, param_type: &ParamType, region: Region<'_>) -> Result<Token, AbiError> {
        match param_type {
            ParamType::Address => {
                let word = region.word(0, param_type)?;
                Ok(Token::Address(Address::from_word(&word)))
            }
            ParamType::Uint(bits) => {
                self.check_int_width(param_type, *bits)?;
                let value = word_to_u256(&region.word(0, param_type)?);
                if *bits < 256 {
                    let mask = (U256::one() << *bits) - U256::one();
                    Ok(Token::Uint(value & mask))
                } else {
                    Ok(Token::Uint(value))
                }
            }
            ParamType::Int(bits) => {
                self.check_int_width(param_type, *bits)?;
                let value = word_to_u256(&region.word(0, param_type)?);
                Ok(Token::Int(I256::from_twos_complement_bits(value, *bits)))
            }
            ParamType::Bool => {
                let word = region.word(0, param_type)?;
                let decoded = if word[..WORD_SIZE - 1].iter().all(|b| *b == 0) {
                    self.options.bool_decoding.decode(word[WORD_SIZE - 1])
                } else {
                    None
                };
                decoded.map(Token::Bool).ok_or_else(|| {
                    region.invalid(
                        0,
                        param_type,
                        format!("0x{} is not a boolean", hex::encode(word)),
                    )
                })
            }
            ParamType::FixedBytes(size) => {
                if !(1..=WORD_SIZE).contains(size) {
                    return Err(AbiError::UnsupportedType(param_type.to_string()));
                }
                let word = region.word(0, param_type)?;
                Ok(Token::FixedBytes(word[..*size].to_vec()))
            }
            ParamType::Bytes => Ok(Token::Bytes(self.decode_bytes(param_type, region)?)),
            ParamType::String => {
                let bytes = self.decode_bytes(param_type, region)?;
                String::from_utf8(bytes)
                    .map(Token::String)
                    .map_err(|e| region.invalid(WORD_SIZE, param_type, format!("invalid UTF-8: {}", e)))
            }
            ParamType::Array(inner) => {
                if inner.memory_usage() == 0 {
                    return Err(AbiError::UnsupportedType(param_type.to_string()));
                }
                let len = region.read_usize(0, param_type)?;
                let elements = region.tail(WORD_SIZE, param_type)?;
                // every element needs at least its head slot; refuse absurd
                // counts before allocating for them
                let needed = len.checked_mul(inner.memory_usage());
                match needed {
                    Some(needed) if needed <= elements.data.len() => {}
                    _ => {
                        return Err(elements.truncated(
                            0,
                            needed.unwrap_or(usize::MAX),
                            param_type,
                        ))
                    }
                }
                let tokens = self.decode_sequence(std::iter::repeat(inner.as_ref()).take(len), elements)?;
                Ok(Token::Array(tokens))
            }
            ParamType::FixedArray(inner, len) => {
                // static arrays arrive in a window already sized to the
                // type; dynamic ones need a pointer word per element
                if inner.is_dynamic() {
                    let needed = len.saturating_mul(WORD_SIZE);
                    if needed > region.data.len() {
                        return Err(region.truncated(0, needed, param_type));
                    }
                }
                let tokens = self.decode_sequence(std::iter::repeat(inner.as_ref()).take(*len), region)?;
                Ok(Token::FixedArray(tokens))
            }
            ParamType::Tuple(types) => {
                if types.is_empty() {
                    return Err(AbiError::UnsupportedType(param_type.to_string()));
                }
                Ok(Token::Tuple(self.decode_sequence(types.iter(), region)?))
            }
        }
    }

    /// Length word, then that many bytes
    fn decode_bytes(&self, param_type: &ParamType, region: Region<'_>) -> Result<Vec<u8>, AbiError> {
        let len = region.read_usize(0, param_type)?;
        let content = region.window(WORD_SIZE, len, param_type)?;
        Ok(content.data.to_vec())
    }

    fn check_int_width(&self, param_type: &ParamType, bits: usize) -> Result<(), AbiError> {
        if valid_int_width(bits) {
            Ok(())
        } else {
            Err(AbiError::UnsupportedType(param_type.to_string()))
        }
    }
}

/// Decode tokens from ABI-encoded data with default options
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    Decoder::default().decode(types, data)
}
