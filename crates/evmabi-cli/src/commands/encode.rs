//! Encode command

use clap::Args;
use evmabi::{encode, AbiError, FunctionDescriptor, Token};
use tracing::debug;

use crate::{output::Output, tokenize::tokenize, CliError};

/// ABI-encode a function call from literal arguments
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Function signature, e.g. "transfer(address,uint256)"
    signature: String,

    /// One literal per parameter: numbers, true/false, hex, text, [a,b], (a,b)
    #[arg(allow_hyphen_values = true)]
    args: Vec<String>,

    /// Emit only the argument encoding, without the selector
    #[arg(long)]
    no_selector: bool,
}

impl EncodeArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let function = FunctionDescriptor::from_signature(&self.signature)?;
        let types = function.input_types();
        if self.args.len() != types.len() {
            return Err(AbiError::ParamCountMismatch {
                expected: types.len(),
                got: self.args.len(),
            }
            .into());
        }

        let tokens = types
            .iter()
            .zip(&self.args)
            .map(|(ty, literal)| tokenize(ty, literal))
            .collect::<Result<Vec<Token>, _>>()?;
        debug!(signature = %function.signature(), args = tokens.len(), "tokenized arguments");

        let data = if self.no_selector {
            format!("0x{}", hex::encode(encode(&types, &tokens)?))
        } else {
            function.encode_input_hex(&tokens)?
        };

        Output::new(json)
            .field("signature", function.signature())
            .field("selector", &function.selector_hex())
            .field("data", &data)
            .line(data.clone())
            .print();

        Ok(())
    }
}
