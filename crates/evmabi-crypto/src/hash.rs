//! Keccak-256 hashing

use evmabi_primitives::H256;
use sha3::{Digest, Keccak256};

/// Length of a function selector in bytes
pub const SELECTOR_LEN: usize = 4;

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    H256::from_bytes(result.into())
}

/// First four bytes of the Keccak-256 hash of `data`.
pub fn selector(data: &[u8]) -> [u8; SELECTOR_LEN] {
    let hash = keccak256(data);
    let mut out = [0u8; SELECTOR_LEN];
    out.copy_from_slice(&hash.as_bytes()[..SELECTOR_LEN]);
    out
}
