//! # evmabi-crypto
//!
//! Hashing used by the ABI codec.
//!
//! - Keccak-256 hashing
//! - 4-byte function selectors

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;

pub use hash::{keccak256, selector, SELECTOR_LEN};
