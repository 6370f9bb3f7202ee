//! Typed access to decoded values

use bytes::Bytes;
use evmabi_primitives::{Address, U256};

use crate::abi::{I256, Token};
use crate::function::Param;
use crate::AbiError;

/// Name under which a single unnamed output is exposed
pub const UNNAMED_OUTPUT: &str = "value";

impl Token {
    /// Take an address
    pub fn into_address(self) -> Result<Address, AbiError> {
        match self {
            Token::Address(addr) => Ok(addr),
            other => Err(AbiError::mismatch(other, "address")),
        }
    }

    /// Take an unsigned integer
    pub fn into_uint(self) -> Result<U256, AbiError> {
        match self {
            Token::Uint(value) => Ok(value),
            other => Err(AbiError::mismatch(other, "uint")),
        }
    }

    /// Take a signed integer
    pub fn into_int(self) -> Result<I256, AbiError> {
        match self {
            Token::Int(value) => Ok(value),
            other => Err(AbiError::mismatch(other, "int")),
        }
    }

    /// Take a boolean
    pub fn into_bool(self) -> Result<bool, AbiError> {
        match self {
            Token::Bool(b) => Ok(b),
            other => Err(AbiError::mismatch(other, "bool")),
        }
    }

    /// Take a string
    pub fn into_string(self) -> Result<String, AbiError> {
        match self {
            Token::String(s) => Ok(s),
            other => Err(AbiError::mismatch(other, "string")),
        }
    }

    /// Take dynamic or fixed bytes
    pub fn into_bytes(self) -> Result<Vec<u8>, AbiError> {
        match self {
            Token::Bytes(data) | Token::FixedBytes(data) => Ok(data),
            other => Err(AbiError::mismatch(other, "bytes")),
        }
    }

    /// Take the elements of a dynamic or fixed array
    pub fn into_array(self) -> Result<Vec<Token>, AbiError> {
        match self {
            Token::Array(items) | Token::FixedArray(items) => Ok(items),
            other => Err(AbiError::mismatch(other, "array")),
        }
    }

    /// Take the components of a tuple
    pub fn into_tuple(self) -> Result<Vec<Token>, AbiError> {
        match self {
            Token::Tuple(items) => Ok(items),
            other => Err(AbiError::mismatch(other, "tuple")),
        }
    }
}

/// Conversion from a decoded token into a Rust type
pub trait FromToken: Sized {
    /// Convert, failing with `TypeMismatch` when the token has another shape
    fn from_token(token: Token) -> Result<Self, AbiError>;
}

impl FromToken for Token {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        Ok(token)
    }
}

impl FromToken for Address {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        token.into_address()
    }
}

impl FromToken for U256 {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        token.into_uint()
    }
}

impl FromToken for I256 {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        token.into_int()
    }
}

impl FromToken for bool {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        token.into_bool()
    }
}

impl FromToken for String {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        token.into_string()
    }
}

impl FromToken for Bytes {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        token.into_bytes().map(Bytes::from)
    }
}

impl<const N: usize> FromToken for [u8; N] {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        match token {
            Token::FixedBytes(data) if data.len() == N => {
                let mut out = [0u8; N];
                out.copy_from_slice(&data);
                Ok(out)
            }
            other => Err(AbiError::mismatch(other, format!("bytes{}", N))),
        }
    }
}

macro_rules! impl_from_token_uint {
    ($($t:ty),*) => {
        $(
            impl FromToken for $t {
                fn from_token(token: Token) -> Result<Self, AbiError> {
                    let value = token.into_uint()?;
                    if value.bits() > <$t>::BITS as usize {
                        return Err(AbiError::mismatch(value, stringify!($t)));
                    }
                    Ok(value.as_u128() as $t)
                }
            }
        )*
    };
}

impl_from_token_uint!(u8, u16, u32, u64, u128);

impl FromToken for i128 {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        let value = token.into_int()?;
        value.as_i128().ok_or_else(|| AbiError::mismatch(value, "i128"))
    }
}

impl<T: FromToken> FromToken for Vec<T> {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        token.into_array()?.into_iter().map(T::from_token).collect()
    }
}

/// Decoded outputs addressable by position or declared name
///
/// A function with a single unnamed output exposes it as `"value"`; other
/// unnamed outputs are addressable by position only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedOutputs {
    entries: Vec<(String, Token)>,
}

impl NamedOutputs {
    /// Zip declared outputs with decoded values
    pub fn new(outputs: &[Param], values: Vec<Token>) -> Result<Self, AbiError> {
        if outputs.len() != values.len() {
            return Err(AbiError::OutputCountMismatch {
                expected: outputs.len(),
                got: values.len(),
            });
        }
        let single_unnamed = outputs.len() == 1 && outputs[0].name.is_empty();
        let entries = outputs
            .iter()
            .zip(values)
            .map(|(param, value)| {
                let name = if single_unnamed {
                    UNNAMED_OUTPUT.to_string()
                } else {
                    param.name.clone()
                };
                (name, value)
            })
            .collect();
        Ok(Self { entries })
    }

    /// Raw token by name
    pub fn token(&self, name: &str) -> Option<&Token> {
        if name.is_empty() {
            return None;
        }
        self.entries.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    /// Output by name, converted
    pub fn get<T: FromToken>(&self, name: &str) -> Result<T, AbiError> {
        let token = self
            .token(name)
            .ok_or_else(|| AbiError::UnknownOutput(name.to_string()))?;
        T::from_token(token.clone())
    }

    /// Output by position, converted
    pub fn at<T: FromToken>(&self, index: usize) -> Result<T, AbiError> {
        let (_, token) = self
            .entries
            .get(index)
            .ok_or_else(|| AbiError::UnknownOutput(format!("#{}", index)))?;
        T::from_token(token.clone())
    }

    /// The single unnamed output
    pub fn value<T: FromToken>(&self) -> Result<T, AbiError> {
        self.get(UNNAMED_OUTPUT)
    }

    /// Number of outputs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no outputs
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, token)` in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Token)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    /// Values in declaration order
    pub fn into_tokens(self) -> Vec<Token> {
        self.entries.into_iter().map(|(_, t)| t).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::ParamType;

    #[test]
    fn test_narrowing() {
        assert!(Token::Bool(true).into_bool().unwrap());
        assert_eq!(Token::FixedBytes(vec![1, 2]).into_bytes().unwrap(), vec![1, 2]);
        assert_eq!(
            Token::FixedArray(vec![Token::uint(1)]).into_array().unwrap(),
            vec![Token::uint(1)]
        );
        match Token::string("x").into_uint() {
            Err(AbiError::TypeMismatch { ty, .. }) => assert_eq!(ty, "uint"),
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_from_token_small_uints() {
        assert_eq!(u8::from_token(Token::uint(255)).unwrap(), 255);
        assert!(u8::from_token(Token::uint(256)).is_err());
        assert_eq!(u64::from_token(Token::uint(u64::MAX as u128)).unwrap(), u64::MAX);
        assert_eq!(u128::from_token(Token::uint(u128::MAX)).unwrap(), u128::MAX);
        assert!(u128::from_token(Token::Uint(U256::MAX)).is_err());
    }

    #[test]
    fn test_from_token_i128() {
        assert_eq!(i128::from_token(Token::int(-5)).unwrap(), -5);
        assert!(i128::from_token(Token::uint(5)).is_err());
    }

    #[test]
    fn test_from_token_fixed_bytes() {
        let data: [u8; 4] = FromToken::from_token(Token::FixedBytes(vec![1, 2, 3, 4])).unwrap();
        assert_eq!(data, [1, 2, 3, 4]);
        assert!(<[u8; 4]>::from_token(Token::FixedBytes(vec![1, 2, 3])).is_err());
        assert!(<[u8; 4]>::from_token(Token::Bytes(vec![1, 2, 3, 4])).is_err());
    }

    #[test]
    fn test_from_token_vec() {
        let token = Token::Array(vec![Token::uint(1), Token::uint(2)]);
        assert_eq!(Vec::<u32>::from_token(token).unwrap(), vec![1, 2]);

        let bad = Token::Array(vec![Token::uint(1), Token::Bool(true)]);
        assert!(Vec::<u32>::from_token(bad).is_err());
    }

    #[test]
    fn test_from_token_bytes() {
        let bytes = Bytes::from_token(Token::Bytes(vec![9, 9])).unwrap();
        assert_eq!(&bytes[..], &[9, 9]);
    }

    #[test]
    fn test_named_outputs_single_unnamed() {
        let outputs = vec![Param::unnamed(ParamType::String)];
        let named = NamedOutputs::new(&outputs, vec![Token::string("Wrapped Ether")]).unwrap();
        assert_eq!(named.value::<String>().unwrap(), "Wrapped Ether");
        assert_eq!(named.at::<String>(0).unwrap(), "Wrapped Ether");
        assert_eq!(named.len(), 1);
    }

    #[test]
    fn test_named_outputs_by_name() {
        let outputs = vec![
            Param::new("amount0", ParamType::Uint(256)),
            Param::new("token0", ParamType::Address),
        ];
        let values = vec![Token::uint(10), Token::Address(Address::ZERO)];
        let named = NamedOutputs::new(&outputs, values).unwrap();

        assert_eq!(named.get::<U256>("amount0").unwrap(), U256::from(10));
        assert_eq!(named.get::<Address>("token0").unwrap(), Address::ZERO);
        assert!(matches!(named.get::<U256>("amount1"), Err(AbiError::UnknownOutput(_))));
        assert!(matches!(named.value::<U256>(), Err(AbiError::UnknownOutput(_))));
        assert!(matches!(named.at::<U256>(5), Err(AbiError::UnknownOutput(_))));

        let names: Vec<&str> = named.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["amount0", "token0"]);
    }

    #[test]
    fn test_named_outputs_count_mismatch() {
        let outputs = vec![Param::new("a", ParamType::Bool), Param::new("b", ParamType::Bool)];
        match NamedOutputs::new(&outputs, vec![Token::Bool(true)]) {
            Err(AbiError::OutputCountMismatch { expected: 2, got: 1 }) => {}
            other => panic!("Expected OutputCountMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_unnamed_among_many_not_addressable_by_name() {
        let outputs = vec![Param::unnamed(ParamType::Bool), Param::unnamed(ParamType::Bool)];
        let named = NamedOutputs::new(&outputs, vec![Token::Bool(true), Token::Bool(false)]).unwrap();
        assert!(named.get::<bool>("").is_err());
        assert!(!named.at::<bool>(1).unwrap());
    }
}
