//! ABI type definitions

use std::fmt;

use evmabi_primitives::{Address, H256, U256, WORD_SIZE};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::int::I256;
use crate::AbiError;

/// Solidity parameter types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Address
    Address,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Signed integer with bit size
    Int(usize),
    /// Boolean
    Bool,
    /// Dynamic bytes
    Bytes,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// UTF-8 string
    String,
    /// Dynamic array
    Array(Box<ParamType>),
    /// Fixed-size array
    FixedArray(Box<ParamType>, usize),
    /// Tuple
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Check if this type is dynamic (variable length)
    ///
    /// A zero-length fixed array counts as dynamic so that it still
    /// occupies a pointer slot in the head.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, len) => *len == 0 || inner.is_dynamic(),
            ParamType::Tuple(types) => types.iter().any(ParamType::is_dynamic),
            _ => false,
        }
    }

    /// Check if this type has a size known from the type alone
    pub fn is_static(&self) -> bool {
        !self.is_dynamic()
    }

    /// Bytes this type occupies in the head of an enclosing list
    pub fn memory_usage(&self) -> usize {
        match self {
            ParamType::FixedArray(inner, len) if self.is_static() => {
                inner.memory_usage().saturating_mul(*len)
            }
            ParamType::Tuple(types) if self.is_static() => {
                types.iter().map(ParamType::memory_usage).fold(0, usize::saturating_add)
            }
            _ => WORD_SIZE,
        }
    }

    /// Attach tuple components to the innermost bare `tuple`
    ///
    /// ABI JSON describes `tuple`, `tuple[]` and `tuple[2][]` fields with a
    /// separate `components` list; this resolves them into the type.
    pub fn with_components(self, components: Vec<ParamType>) -> Result<ParamType, AbiError> {
        if components.is_empty() {
            return Ok(self);
        }
        match self {
            ParamType::Tuple(existing) if existing.is_empty() => Ok(ParamType::Tuple(components)),
            ParamType::Array(inner) => {
                Ok(ParamType::Array(Box::new(inner.with_components(components)?)))
            }
            ParamType::FixedArray(inner, len) => Ok(ParamType::FixedArray(
                Box::new(inner.with_components(components)?),
                len,
            )),
            other => Err(AbiError::UnrecognizedType(format!(
                "{} cannot take tuple components",
                other
            ))),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => write!(f, "address"),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Bytes => write!(f, "bytes"),
            ParamType::FixedBytes(len) => write!(f, "bytes{}", len),
            ParamType::String => write!(f, "string"),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
            ParamType::FixedArray(inner, len) => write!(f, "{}[{}]", inner, len),
            ParamType::Tuple(types) => {
                write!(f, "(")?;
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", ty)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Solidity ABI token types
///
/// Input to the encoder and output of the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Unsigned integer (8-256 bits)
    Uint(U256),
    /// Signed integer (8-256 bits)
    Int(I256),
    /// Boolean
    Bool(bool),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Dynamic array
    Array(Vec<Token>),
    /// Fixed-size array
    FixedArray(Vec<Token>),
    /// Tuple (struct)
    Tuple(Vec<Token>),
}

impl Token {
    /// Create a uint256 from u128
    pub fn uint(value: u128) -> Self {
        Token::Uint(U256::from(value))
    }

    /// Create an int from i128
    pub fn int(value: i128) -> Self {
        Token::Int(I256::from_i128(value))
    }

    /// Create a string token
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }

    /// Create a bytes32 token
    pub fn bytes32(data: H256) -> Self {
        Token::FixedBytes(data.as_bytes().to_vec())
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Address(_) => "address",
            Token::Uint(_) => "uint",
            Token::Int(_) => "int",
            Token::Bool(_) => "bool",
            Token::Bytes(_) => "bytes",
            Token::FixedBytes(_) => "fixed bytes",
            Token::String(_) => "string",
            Token::Array(_) => "array",
            Token::FixedArray(_) => "fixed array",
            Token::Tuple(_) => "tuple",
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, open: &str, items: &[Token], close: &str) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Address(addr) => write!(f, "{}", addr),
            Token::Uint(value) => write!(f, "{}", value),
            Token::Int(value) => write!(f, "{}", value),
            Token::Bool(b) => write!(f, "{}", b),
            Token::Bytes(data) | Token::FixedBytes(data) => write!(f, "0x{}", hex::encode(data)),
            Token::String(s) => write!(f, "{:?}", s),
            Token::Array(items) | Token::FixedArray(items) => write_list(f, "[", items, "]"),
            Token::Tuple(items) => write_list(f, "(", items, ")"),
        }
    }
}

/// JSON form: integers as decimal strings, byte strings as `0x` hex,
/// arrays and tuples as JSON arrays.
impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Token::Address(addr) => serializer.serialize_str(&addr.to_hex()),
            Token::Uint(value) => serializer.collect_str(value),
            Token::Int(value) => serializer.collect_str(value),
            Token::Bool(b) => serializer.serialize_bool(*b),
            Token::Bytes(data) | Token::FixedBytes(data) => {
                serializer.serialize_str(&format!("0x{}", hex::encode(data)))
            }
            Token::String(s) => serializer.serialize_str(s),
            Token::Array(items) | Token::FixedArray(items) | Token::Tuple(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array(inner: ParamType) -> ParamType {
        ParamType::Array(Box::new(inner))
    }

    fn fixed(inner: ParamType, len: usize) -> ParamType {
        ParamType::FixedArray(Box::new(inner), len)
    }

    #[test]
    fn test_param_type_is_dynamic() {
        assert!(!ParamType::Address.is_dynamic());
        assert!(!ParamType::Uint(256).is_dynamic());
        assert!(!ParamType::Bool.is_dynamic());
        assert!(!ParamType::FixedBytes(32).is_dynamic());

        assert!(ParamType::Bytes.is_dynamic());
        assert!(ParamType::String.is_dynamic());
        assert!(array(ParamType::Uint(256)).is_dynamic());
    }

    #[test]
    fn test_nested_dynamic_propagates() {
        assert!(fixed(ParamType::String, 2).is_dynamic());
        assert!(ParamType::Tuple(vec![ParamType::Address, ParamType::Bytes]).is_dynamic());
        assert!(fixed(ParamType::Tuple(vec![ParamType::Bool, array(ParamType::Bool)]), 3).is_dynamic());
        assert!(fixed(ParamType::Uint(8), 3).is_static());
    }

    #[test]
    fn test_zero_length_fixed_array_is_dynamic() {
        let ty = fixed(ParamType::Uint(256), 0);
        assert!(ty.is_dynamic());
        assert_eq!(ty.memory_usage(), 32);
    }

    #[test]
    fn test_memory_usage() {
        assert_eq!(ParamType::Uint(8).memory_usage(), 32);
        assert_eq!(ParamType::String.memory_usage(), 32);
        assert_eq!(fixed(ParamType::Address, 3).memory_usage(), 96);
        assert_eq!(fixed(fixed(ParamType::Bool, 2), 3).memory_usage(), 192);
        assert_eq!(
            ParamType::Tuple(vec![ParamType::Address, fixed(ParamType::Uint(256), 2)]).memory_usage(),
            96
        );
        // dynamic aggregates only hold a pointer
        assert_eq!(fixed(ParamType::Bytes, 4).memory_usage(), 32);
        assert_eq!(ParamType::Tuple(vec![ParamType::Address, ParamType::Bytes]).memory_usage(), 32);
    }

    #[test]
    fn test_memory_usage_saturates() {
        let huge = fixed(ParamType::Uint(256), usize::MAX / 2);
        assert_eq!(huge.memory_usage(), usize::MAX);
        assert_eq!(ParamType::Tuple(vec![huge.clone(), huge]).memory_usage(), usize::MAX);
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(ParamType::Uint(256).to_string(), "uint256");
        assert_eq!(ParamType::FixedBytes(32).to_string(), "bytes32");
        assert_eq!(fixed(ParamType::Address, 3).to_string(), "address[3]");
        assert_eq!(
            array(ParamType::Tuple(vec![ParamType::Address, ParamType::Bytes])).to_string(),
            "(address,bytes)[]"
        );
        assert_eq!(fixed(array(ParamType::Int(8)), 2).to_string(), "int8[][2]");
    }

    #[test]
    fn test_with_components() {
        let components = vec![ParamType::Address, ParamType::Bytes];

        let ty = ParamType::Tuple(vec![]).with_components(components.clone()).unwrap();
        assert_eq!(ty, ParamType::Tuple(components.clone()));

        let ty = fixed(array(ParamType::Tuple(vec![])), 2)
            .with_components(components.clone())
            .unwrap();
        assert_eq!(ty, fixed(array(ParamType::Tuple(components.clone())), 2));

        assert!(ParamType::Address.with_components(components).is_err());
        assert_eq!(ParamType::Address.with_components(vec![]).unwrap(), ParamType::Address);
    }

    #[test]
    fn test_token_display() {
        let token = Token::Tuple(vec![
            Token::uint(1),
            Token::int(-2),
            Token::Array(vec![Token::Bool(true), Token::Bool(false)]),
            Token::Bytes(vec![0xde, 0xad]),
            Token::string("hi"),
        ]);
        assert_eq!(token.to_string(), "(1,-2,[true,false],0xdead,\"hi\")");
    }

    #[test]
    fn test_token_serialize() {
        let token = Token::Array(vec![
            Token::Address(Address::from_bytes([0x11; 20])),
            Token::uint(u128::MAX),
            Token::FixedBytes(vec![0xab]),
        ]);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                "0x1111111111111111111111111111111111111111",
                "340282366920938463463374607431768211455",
                "0xab"
            ])
        );
    }
}
