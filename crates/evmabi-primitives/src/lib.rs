//! # evmabi-primitives
//!
//! Primitive types shared by the evmabi crates.
//!
//! Everything here is sized in terms of the 32-byte EVM word that the
//! ABI encoding is built from.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::{Address, AddressError};
pub use hash::H256;

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Size of an EVM word in bytes
pub const WORD_SIZE: usize = 32;

/// Convert a U256 into a big-endian word
pub fn u256_to_word(value: &U256) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    value.to_big_endian(&mut word);
    word
}

/// Read a big-endian word as a U256
pub fn word_to_u256(word: &[u8; WORD_SIZE]) -> U256 {
    U256::from_big_endian(word)
}
