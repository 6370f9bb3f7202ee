//! Codec error types

use thiserror::Error;

/// ABI codec error type
#[derive(Debug, Error)]
pub enum AbiError {
    /// Type string that does not name an ABI type
    #[error("Unrecognized type: {0}")]
    UnrecognizedType(String),

    /// Value whose shape or range does not satisfy its declared type
    #[error("Type mismatch: {value} is not a valid {ty}")]
    TypeMismatch {
        /// Offending value, rendered
        value: String,
        /// Declared type
        ty: String,
    },

    /// Fixed array given the wrong number of elements
    #[error("Array length mismatch: expected {expected} elements, got {got}")]
    ArrayLengthMismatch {
        /// Declared length
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// Number of values differs from number of types
    #[error("Parameter count mismatch: expected {expected}, got {got}")]
    ParamCountMismatch {
        /// Declared count
        expected: usize,
        /// Supplied count
        got: usize,
    },

    /// Internal encoding invariant violated
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Buffer too short for the value being decoded
    #[error("Truncated data decoding {ty} at offset {offset}: need {needed} bytes, have {available}")]
    TruncatedData {
        /// Type being decoded
        ty: String,
        /// Absolute offset of the read
        offset: usize,
        /// Bytes required from `offset`
        needed: usize,
        /// Bytes available from `offset`
        available: usize,
    },

    /// Bytes present but not a valid encoding of the type
    #[error("Invalid {ty} at offset {offset}: {reason}")]
    InvalidValue {
        /// Type being decoded
        ty: String,
        /// Absolute offset of the word
        offset: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Type that can be named but not encoded or decoded
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Declared outputs and decoded values disagree in number
    #[error("Output count mismatch: expected {expected}, got {got}")]
    OutputCountMismatch {
        /// Declared output count
        expected: usize,
        /// Values available
        got: usize,
    },

    /// Call data does not start with the function's selector
    #[error("Selector mismatch: expected {expected}, got {got}")]
    SelectorMismatch {
        /// Function selector
        expected: String,
        /// Leading bytes of the call data
        got: String,
    },

    /// No output with that name
    #[error("Unknown output: {0}")]
    UnknownOutput(String),

    /// No function with that name, signature or selector
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Contract call attempted without an address
    #[error("Contract address not set")]
    AddressNotSet,

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Malformed ABI JSON
    #[error("JSON error: {0}")]
    Json(String),

    /// Transport/network error
    #[error("Transport error: {0}")]
    Transport(String),

    /// RPC error from node
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },
}

impl AbiError {
    pub(crate) fn mismatch(value: impl ToString, ty: impl ToString) -> Self {
        AbiError::TypeMismatch {
            value: value.to_string(),
            ty: ty.to_string(),
        }
    }
}

impl From<hex::FromHexError> for AbiError {
    fn from(e: hex::FromHexError) -> Self {
        AbiError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for AbiError {
    fn from(e: serde_json::Error) -> Self {
        AbiError::Json(e.to_string())
    }
}

impl From<evmabi_primitives::AddressError> for AbiError {
    fn from(e: evmabi_primitives::AddressError) -> Self {
        AbiError::InvalidHex(e.to_string())
    }
}

/// Decode a hex string with or without `0x` prefix
pub(crate) fn decode_hex(s: &str) -> Result<Vec<u8>, AbiError> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(s)?)
}
