//! Signed 256-bit integer

use std::fmt;
use std::str::FromStr;

use evmabi_primitives::U256;

use crate::AbiError;

/// Signed 256-bit integer
///
/// Stored as sign and magnitude; the ABI wire form is two's complement and
/// is produced by [`I256::into_twos_complement`]. Zero is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct I256 {
    /// Absolute value
    pub abs: U256,
    /// Sign (true if negative)
    pub negative: bool,
}

impl I256 {
    /// Zero
    pub const ZERO: I256 = I256 {
        abs: U256([0; 4]),
        negative: false,
    };

    /// Create a new I256
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }

    /// Read a two's complement word
    pub fn from_twos_complement(word: U256) -> Self {
        if word.bit(255) {
            Self::new((!word).overflowing_add(U256::one()).0, true)
        } else {
            Self::new(word, false)
        }
    }

    /// Read the low `bits` bits of `word` as a two's complement value of
    /// that width, sign-extending from bit `bits - 1`.
    pub fn from_twos_complement_bits(word: U256, bits: usize) -> Self {
        if bits == 0 || bits >= 256 {
            return Self::from_twos_complement(word);
        }
        let mask = (U256::one() << bits) - U256::one();
        let low = word & mask;
        if low.bit(bits - 1) {
            Self::from_twos_complement(low | !mask)
        } else {
            Self::new(low, false)
        }
    }

    /// Two's complement word
    pub fn into_twos_complement(self) -> U256 {
        if self.negative {
            (!self.abs).overflowing_add(U256::one()).0
        } else {
            self.abs
        }
    }

    /// Whether the value lies in `[-2^(bits-1), 2^(bits-1))`
    pub fn fits_in_bits(&self, bits: usize) -> bool {
        if bits == 0 || bits > 256 {
            return false;
        }
        if self.negative {
            // magnitude may reach 2^(bits-1) exactly
            self.abs.saturating_sub(U256::one()).bits() < bits
        } else {
            self.abs.bits() < bits
        }
    }

    /// Parse a decimal string with optional leading `-`
    pub fn from_dec_str(s: &str) -> Result<Self, AbiError> {
        let (digits, negative) = match s.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AbiError::mismatch(s, "int256"));
        }
        let abs = U256::from_dec_str(digits)
            .map_err(|_| AbiError::mismatch(s, "int256"))?;
        let value = Self::new(abs, negative);
        if !value.fits_in_bits(256) {
            return Err(AbiError::mismatch(s, "int256"));
        }
        Ok(value)
    }

    /// Convert to i128 if in range
    pub fn as_i128(&self) -> Option<i128> {
        if !self.fits_in_bits(128) {
            return None;
        }
        let abs = self.abs.as_u128();
        if self.negative {
            // -2^127 has no positive i128 counterpart
            Some(0i128.wrapping_sub_unsigned(abs))
        } else {
            i128::try_from(abs).ok()
        }
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }
}

impl From<i128> for I256 {
    fn from(value: i128) -> Self {
        Self::from_i128(value)
    }
}

impl From<i64> for I256 {
    fn from(value: i64) -> Self {
        Self::from_i128(value.into())
    }
}

impl FromStr for I256 {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dec_str(s.trim())
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.abs)
        } else {
            write!(f, "{}", self.abs)
        }
    }
}
