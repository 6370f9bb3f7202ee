//! Selector command

use clap::Args;
use evmabi::abi::{canonical_signature, function_selector, parse_signature, selector_hex};

use crate::{output::Output, CliError};

/// Compute the 4-byte selector of a function signature
#[derive(Debug, Args)]
pub struct SelectorArgs {
    /// Function signature, e.g. "transfer(address,uint256)"
    signature: String,
}

impl SelectorArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let (name, types) = parse_signature(&self.signature)?;
        let signature = canonical_signature(&name, &types);
        let selector = selector_hex(&function_selector(&signature));

        Output::new(json)
            .field("signature", &signature)
            .field("selector", &selector)
            .line(format!("{}  {}", selector, signature))
            .print();

        Ok(())
    }
}
