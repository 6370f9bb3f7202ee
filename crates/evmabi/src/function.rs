//! Function descriptors

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::abi::{
    canonical_signature, encode_function_call, function_selector, parse_signature, selector_hex,
    Decoder, ParamType, Token,
};
use crate::error::decode_hex;
use crate::value::NamedOutputs;
use crate::AbiError;

/// A named, typed function input or output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name, empty when unnamed
    pub name: String,
    /// Parameter type, tuple components resolved
    pub kind: ParamType,
    /// Solidity-level type such as `struct Multicall.Call[]`, if known
    pub internal_type: Option<String>,
}

impl Param {
    /// Create a named parameter
    pub fn new(name: impl Into<String>, kind: ParamType) -> Self {
        Self {
            name: name.into(),
            kind,
            internal_type: None,
        }
    }

    /// Create an unnamed parameter
    pub fn unnamed(kind: ParamType) -> Self {
        Self::new("", kind)
    }

    /// Attach the Solidity internal type
    pub fn with_internal_type(mut self, internal_type: impl Into<String>) -> Self {
        self.internal_type = Some(internal_type.into());
        self
    }
}

/// Function state mutability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    /// Reads nothing from state
    Pure,
    /// Reads but does not modify state
    View,
    /// Modifies state, rejects value
    #[default]
    NonPayable,
    /// Modifies state, accepts value
    Payable,
}

/// Immutable description of a contract function
///
/// Signature and selector are computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    name: String,
    inputs: Vec<Param>,
    outputs: Vec<Param>,
    state_mutability: StateMutability,
    signature: String,
    selector: [u8; 4],
}

impl FunctionDescriptor {
    /// Create a new function descriptor
    pub fn new(name: impl Into<String>, inputs: Vec<Param>, outputs: Vec<Param>) -> Self {
        let name = name.into();
        let input_types: Vec<ParamType> = inputs.iter().map(|p| p.kind.clone()).collect();
        let signature = canonical_signature(&name, &input_types);
        let selector = function_selector(&signature);
        Self {
            name,
            inputs,
            outputs,
            state_mutability: StateMutability::default(),
            signature,
            selector,
        }
    }

    /// Build from a human signature such as `transfer(address,uint256)`
    ///
    /// The result has unnamed inputs and no outputs; add outputs with
    /// [`FunctionDescriptor::with_outputs`].
    pub fn from_signature(signature: &str) -> Result<Self, AbiError> {
        let (name, types) = parse_signature(signature)?;
        Ok(Self::new(name, types.into_iter().map(Param::unnamed).collect(), vec![]))
    }

    /// Replace the outputs
    pub fn with_outputs(mut self, outputs: Vec<Param>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Set the state mutability
    pub fn with_state_mutability(mut self, state_mutability: StateMutability) -> Self {
        self.state_mutability = state_mutability;
        self
    }

    /// Function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared inputs
    pub fn inputs(&self) -> &[Param] {
        &self.inputs
    }

    /// Declared outputs
    pub fn outputs(&self) -> &[Param] {
        &self.outputs
    }

    /// Input types in order
    pub fn input_types(&self) -> Vec<ParamType> {
        self.inputs.iter().map(|p| p.kind.clone()).collect()
    }

    /// Output types in order
    pub fn output_types(&self) -> Vec<ParamType> {
        self.outputs.iter().map(|p| p.kind.clone()).collect()
    }

    /// State mutability
    pub fn state_mutability(&self) -> StateMutability {
        self.state_mutability
    }

    /// Whether the function can be served by a read-only call
    pub fn is_constant(&self) -> bool {
        matches!(self.state_mutability, StateMutability::Pure | StateMutability::View)
    }

    /// Canonical signature (e.g., "transfer(address,uint256)")
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Function selector (4 bytes)
    pub fn selector(&self) -> [u8; 4] {
        self.selector
    }

    /// Function selector as `0x` hex
    pub fn selector_hex(&self) -> String {
        selector_hex(&self.selector)
    }

    /// Encode a call: selector followed by the encoded arguments
    pub fn encode_input(&self, args: &[Token]) -> Result<Bytes, AbiError> {
        if args.len() != self.inputs.len() {
            return Err(AbiError::ParamCountMismatch {
                expected: self.inputs.len(),
                got: args.len(),
            });
        }
        let data = encode_function_call(self.selector, &self.input_types(), args)?;
        debug!(function = %self.signature, len = data.len(), "encoded call");
        Ok(Bytes::from(data))
    }

    /// Encode a call as a `0x` hex string
    pub fn encode_input_hex(&self, args: &[Token]) -> Result<String, AbiError> {
        Ok(format!("0x{}", hex::encode(self.encode_input(args)?)))
    }

    /// Decode return data with default options
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        self.decode_output_with(&Decoder::default(), data)
    }

    /// Decode return data with a configured decoder
    pub fn decode_output_with(&self, decoder: &Decoder, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        decoder.decode(&self.output_types(), data)
    }

    /// Decode `0x` hex return data
    pub fn decode_output_hex(&self, data: &str) -> Result<Vec<Token>, AbiError> {
        self.decode_output(&decode_hex(data)?)
    }

    /// Decode return data into outputs addressable by name
    pub fn decode_named(&self, data: &[u8]) -> Result<NamedOutputs, AbiError> {
        self.decode_named_with(&Decoder::default(), data)
    }

    /// Decode return data into named outputs with a configured decoder
    pub fn decode_named_with(&self, decoder: &Decoder, data: &[u8]) -> Result<NamedOutputs, AbiError> {
        let values = self.decode_output_with(decoder, data)?;
        NamedOutputs::new(&self.outputs, values)
    }

    /// Decode call data back into arguments, checking the selector
    pub fn decode_input(&self, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        self.decode_input_with(&Decoder::default(), data)
    }

    /// Decode call data with a configured decoder
    pub fn decode_input_with(&self, decoder: &Decoder, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        if data.len() < 4 || data[..4] != self.selector {
            return Err(AbiError::SelectorMismatch {
                expected: self.selector_hex(),
                got: format!("0x{}", hex::encode(&data[..data.len().min(4)])),
            });
        }
        decoder.decode(&self.input_types(), &data[4..])
    }
}
