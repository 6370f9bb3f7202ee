//! Contract interaction helpers

use std::collections::HashMap;

use bytes::Bytes;
use evmabi_primitives::Address;
use tracing::debug;

use crate::abi::{selector_hex, Decoder, Token};
use crate::error::decode_hex;
use crate::function::FunctionDescriptor;
use crate::json::parse_functions;
use crate::transport::Transport;
use crate::value::NamedOutputs;
use crate::AbiError;

/// Function registry for one contract
///
/// Lookup tables are built once when the contract is constructed. For an
/// overloaded name, lookup by name returns the first declaration; every
/// overload stays reachable by signature and selector.
#[derive(Debug, Clone, Default)]
pub struct Contract {
    /// Contract address
    address: Option<Address>,
    /// Function definitions, in declaration order
    functions: Vec<FunctionDescriptor>,
    by_name: HashMap<String, usize>,
    by_signature: HashMap<String, usize>,
    by_selector: HashMap<[u8; 4], usize>,
    decoder: Decoder,
}

impl Contract {
    /// Create a contract from function descriptors
    pub fn new(functions: Vec<FunctionDescriptor>) -> Self {
        let mut by_name = HashMap::new();
        let mut by_signature = HashMap::new();
        let mut by_selector = HashMap::new();
        for (index, function) in functions.iter().enumerate() {
            by_name.entry(function.name().to_string()).or_insert(index);
            by_signature.entry(function.signature().to_string()).or_insert(index);
            by_selector.entry(function.selector()).or_insert(index);
        }
        debug!(functions = functions.len(), "built contract function table");
        Self {
            address: None,
            functions,
            by_name,
            by_signature,
            by_selector,
            decoder: Decoder::default(),
        }
    }

    /// Load a contract from its ABI JSON
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        Ok(Self::new(parse_functions(json)?))
    }

    /// Set the contract address
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Decode results with a configured decoder
    pub fn with_decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Get the contract address
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// All functions, in declaration order
    pub fn functions(&self) -> &[FunctionDescriptor] {
        &self.functions
    }

    /// Get a function by name
    pub fn function(&self, name: &str) -> Result<&FunctionDescriptor, AbiError> {
        self.by_name
            .get(name)
            .map(|&i| &self.functions[i])
            .ok_or_else(|| AbiError::UnknownFunction(name.to_string()))
    }

    /// Get a function by canonical signature
    pub fn function_by_signature(&self, signature: &str) -> Result<&FunctionDescriptor, AbiError> {
        self.by_signature
            .get(signature)
            .map(|&i| &self.functions[i])
            .ok_or_else(|| AbiError::UnknownFunction(signature.to_string()))
    }

    /// Get a function by selector
    pub fn function_by_selector(&self, selector: &[u8; 4]) -> Result<&FunctionDescriptor, AbiError> {
        self.by_selector
            .get(selector)
            .map(|&i| &self.functions[i])
            .ok_or_else(|| AbiError::UnknownFunction(selector_hex(selector)))
    }

    /// Whether a function with this name exists
    pub fn has_function(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Whether a function with this canonical signature exists
    pub fn has_signature(&self, signature: &str) -> bool {
        self.by_signature.contains_key(signature)
    }

    /// Encode a function call
    pub fn encode_call(&self, function_name: &str, args: &[Token]) -> Result<Bytes, AbiError> {
        self.function(function_name)?.encode_input(args)
    }

    /// Decode function output
    pub fn decode_output(&self, function_name: &str, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        self.function(function_name)?.decode_output_with(&self.decoder, data)
    }

    /// Decode function output into named values
    pub fn decode_result(&self, function_name: &str, data: &[u8]) -> Result<NamedOutputs, AbiError> {
        self.function(function_name)?.decode_named_with(&self.decoder, data)
    }

    /// Identify the function called by `data` and decode its arguments
    pub fn decode_call(&self, data: &[u8]) -> Result<(&FunctionDescriptor, Vec<Token>), AbiError> {
        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| AbiError::UnknownFunction(format!("0x{}", hex::encode(data))))?;
        let function = self.function_by_selector(&selector)?;
        let args = function.decode_input_with(&self.decoder, data)?;
        Ok((function, args))
    }

    /// Call a function through `transport` and decode its outputs
    pub async fn call<T: Transport + ?Sized>(
        &self,
        transport: &T,
        function_name: &str,
        args: &[Token],
    ) -> Result<NamedOutputs, AbiError> {
        let address = self.address.ok_or(AbiError::AddressNotSet)?;
        let function = self.function(function_name)?;
        let payload = function.encode_input_hex(args)?;

        debug!(function = %function.signature(), to = %address, "calling contract");
        let response = transport.call(&address, &payload).await?;

        function.decode_named_with(&self.decoder, &decode_hex(&response)?)
    }
}

/// Builder for contracts assembled in code rather than from JSON
#[derive(Debug, Default)]
pub struct ContractBuilder {
    address: Option<Address>,
    functions: Vec<FunctionDescriptor>,
    decoder: Decoder,
}

impl ContractBuilder {
    /// Create a new contract builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the contract address
    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Add a function
    pub fn function(mut self, function: FunctionDescriptor) -> Self {
        self.functions.push(function);
        self
    }

    /// Add every function from ABI JSON
    pub fn json(mut self, json: &str) -> Result<Self, AbiError> {
        self.functions.extend(parse_functions(json)?);
        Ok(self)
    }

    /// Set the decoder used for results
    pub fn decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Build the contract
    pub fn build(self) -> Contract {
        let contract = Contract::new(self.functions).with_decoder(self.decoder);
        match self.address {
            Some(address) => contract.with_address(address),
            None => contract,
        }
    }
}
