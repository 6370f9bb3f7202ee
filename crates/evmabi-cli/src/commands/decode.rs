//! Decode command

use clap::Args;
use evmabi::{BoolDecoding, Decoder};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::{config::Config, output::Output, tokenize::parse_type_list, CliError};

/// Decode ABI-encoded data against a list of types
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Comma-separated types, optionally parenthesised: "uint256,bool" or "(uint256,bool)"
    types: String,

    /// Hex data, `0x` optional; read from stdin when omitted or "-"
    data: Option<String>,

    /// Accept legacy bool words (27/28, 31/32, 35/36)
    #[arg(long)]
    legacy_bool: bool,
}

impl DecodeArgs {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let types = parse_type_list(&self.types)?;

        let input = match self.data {
            Some(data) if data != "-" => data,
            _ => read_stdin().await?,
        };
        let input = input.trim();
        let bytes = hex::decode(input.strip_prefix("0x").unwrap_or(input))
            .map_err(|e| CliError::InvalidHex(e.to_string()))?;

        let bool_decoding = if self.legacy_bool {
            BoolDecoding::Legacy
        } else {
            config.bool_decoding
        };
        debug!(types = types.len(), len = bytes.len(), %bool_decoding, "decoding");
        let values = Decoder::with_bool_decoding(bool_decoding).decode(&types, &bytes)?;

        let names: Vec<String> = types.iter().map(ToString::to_string).collect();
        let mut output = Output::new(json)
            .field_value("types", &names)
            .field_value("values", &values);
        for (name, value) in names.iter().zip(&values) {
            output = output.line(format!("{}: {}", name, value));
        }
        output.print();

        Ok(())
    }
}

async fn read_stdin() -> Result<String, CliError> {
    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    Ok(input)
}
