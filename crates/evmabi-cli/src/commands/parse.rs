//! Type inspection command

use clap::Args;
use evmabi::parse_type;

use crate::{output::Output, CliError};

/// Parse a Solidity type and show its canonical form and layout
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Type string, e.g. "uint256[]" or "(address,bytes)[2]"
    #[arg(value_name = "TYPE")]
    ty: String,
}

impl ParseArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let ty = parse_type(&self.ty)?;
        let canonical = ty.to_string();
        let dynamic = ty.is_dynamic();
        let head_size = ty.memory_usage();

        Output::new(json)
            .field("type", &canonical)
            .field_bool("dynamic", dynamic)
            .field_u64("head_size", head_size as u64)
            .line(format!("Type:      {}", canonical))
            .line(format!("Dynamic:   {}", dynamic))
            .line(format!("Head size: {} bytes", head_size))
            .print();

        Ok(())
    }
}
