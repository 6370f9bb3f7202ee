//! ABI encoding and decoding for Solidity contracts
//!
//! This module provides functionality for:
//! - Parsing Solidity type strings
//! - Encoding function calls
//! - Decoding function return values
//! - Computing signatures and selectors
//!
//! # Example
//!
//! ```rust
//! use evmabi::abi::{decode, encode_function_call, function_selector, parse_type, Token};
//! use evmabi::{Address, U256};
//!
//! // Encode a transfer call
//! let types = [parse_type("address").unwrap(), parse_type("uint256").unwrap()];
//! let selector = function_selector("transfer(address,uint256)");
//! let data = encode_function_call(
//!     selector,
//!     &types,
//!     &[Token::Address(Address::ZERO), Token::Uint(U256::from(1000))],
//! )
//! .unwrap();
//! assert_eq!(data.len(), 4 + 64);
//!
//! // Decode a balance response
//! let return_data = [0u8; 32];
//! let balance = decode(&[parse_type("uint256").unwrap()], &return_data).unwrap();
//! assert_eq!(balance, vec![Token::Uint(U256::zero())]);
//! ```

mod decode;
mod encode;
mod int;
mod parse;
mod selector;
mod types;

pub use decode::{decode, BoolDecoding, DecodeOptions, Decoder};
pub use encode::{encode, encode_function_call, encode_pairs};
pub use int::I256;
pub use parse::parse_type;
pub use selector::{canonical_signature, function_selector, parse_signature, selector_hex};
pub use types::{ParamType, Token};
