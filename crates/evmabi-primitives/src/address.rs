//! Ethereum-compatible address type (20 bytes)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::WORD_SIZE;

/// Address parsing error
#[derive(Debug, Error)]
pub enum AddressError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// Ethereum-compatible 20-byte address
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// Size of address in bytes
    pub const LEN: usize = 20;

    /// Zero address (0x0000...0000)
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create address from bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Create address from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        if slice.len() != Self::LEN {
            return Err(AddressError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(slice);
        Ok(Address(bytes))
    }

    /// Parse address from hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Take the low 20 bytes of an ABI word.
    ///
    /// The upper 12 bytes are ignored; callers that care about dirty
    /// padding have to check it themselves.
    pub fn from_word(word: &[u8; WORD_SIZE]) -> Self {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&word[WORD_SIZE - Self::LEN..]);
        Address(bytes)
    }

    /// Left-pad the address into an ABI word (encoded like a uint160)
    pub fn to_word(&self) -> [u8; WORD_SIZE] {
        let mut word = [0u8; WORD_SIZE];
        word[WORD_SIZE - Self::LEN..].copy_from_slice(&self.0);
        word
    }

    /// Get as byte slice
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Convert to lowercase hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

    #[test]
    fn test_address_from_hex() {
        let addr = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        assert!(!addr.is_zero());

        let addr2 = Address::from_hex("742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        assert_eq!(addr, addr2);
    }

    #[test]
    fn test_address_display_is_lowercase() {
        let addr = Address::from_hex(WETH).unwrap();
        assert_eq!(
            format!("{}", addr),
            "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
        );
    }

    #[test]
    fn test_address_from_str_trims() {
        let addr: Address = format!("  {}\n", WETH).parse().unwrap();
        assert_eq!(addr, Address::from_hex(WETH).unwrap());
    }

    #[test]
    fn test_address_from_hex_invalid_chars() {
        let result = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aGGG");
        match result {
            Err(AddressError::InvalidHex(_)) => {}
            _ => panic!("Expected InvalidHex error"),
        }
    }

    #[test]
    fn test_address_from_hex_wrong_length() {
        match Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB") {
            Err(AddressError::InvalidLength(19)) => {}
            _ => panic!("Expected InvalidLength(19) error"),
        }
        match Address::from_hex("0x") {
            Err(AddressError::InvalidLength(0)) => {}
            _ => panic!("Expected InvalidLength(0) error"),
        }
    }

    #[test]
    fn test_address_word_layout() {
        let addr = Address::from_hex(WETH).unwrap();
        let word = addr.to_word();

        assert!(word[..12].iter().all(|b| *b == 0));
        assert_eq!(&word[12..], addr.as_bytes());
        assert_eq!(Address::from_word(&word), addr);
    }

    #[test]
    fn test_address_from_word_ignores_high_bytes() {
        let mut word = [0xffu8; 32];
        word[12..].copy_from_slice(&[0x11u8; 20]);
        assert_eq!(Address::from_word(&word), Address::from_bytes([0x11u8; 20]));
    }
}
