//! # evmabi
//!
//! Ethereum contract ABI codec.
//!
//! ## Features
//!
//! - **ABI**: type parsing, head/tail encoding and decoding, selectors
//! - **FunctionDescriptor**: encode calls and decode results for one function
//! - **Contract**: functions loaded from ABI JSON, looked up by name,
//!   signature or selector
//! - **Transport**: seam for sending calls, with an in-memory mock
//!
//! ## Quick Start
//!
//! ```rust
//! use evmabi::{Contract, Token, Address};
//!
//! let abi = r#"[{
//!     "type": "function",
//!     "name": "balanceOf",
//!     "inputs": [{"name": "owner", "type": "address"}],
//!     "outputs": [{"name": "", "type": "uint256"}],
//!     "stateMutability": "view"
//! }]"#;
//! let contract = Contract::from_json(abi)?;
//!
//! let owner = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d")?;
//! let data = contract.encode_call("balanceOf", &[Token::Address(owner)])?;
//! assert_eq!(&data[..4], &[0x70, 0xa0, 0x82, 0x31]);
//!
//! let mut ret = [0u8; 32];
//! ret[31] = 100;
//! let balance: u64 = contract.decode_result("balanceOf", &ret)?.value()?;
//! assert_eq!(balance, 100);
//! # Ok::<(), evmabi::AbiError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
mod contract;
mod error;
mod function;
mod json;
mod transport;
mod value;

pub use abi::{
    decode, encode, parse_type, BoolDecoding, DecodeOptions, Decoder, ParamType, Token, I256,
};
pub use contract::{Contract, ContractBuilder};
pub use error::AbiError;
pub use function::{FunctionDescriptor, Param, StateMutability};
pub use json::parse_functions;
pub use value::{FromToken, NamedOutputs, UNNAMED_OUTPUT};

/// Re-export Transport trait for custom implementations
pub use transport::Transport;
pub use transport::MockTransport;

// Re-export primitives for convenience
pub use evmabi_primitives::{Address, H256, U256};
