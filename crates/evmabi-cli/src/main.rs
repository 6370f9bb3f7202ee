//! # evmabi-cli
//!
//! Command-line interface for the evmabi codec.
//!
//! ## Usage
//!
//! ```bash
//! # Selectors and types
//! evmabi selector "approve(address,uint256)"
//! evmabi parse "(address,bytes)[]"
//!
//! # Encoding and decoding
//! evmabi encode "transfer(address,uint256)" 0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d 1000
//! evmabi decode "uint256,bool" 0x...
//! echo 0x... | evmabi decode string
//!
//! # Configuration
//! evmabi config --show
//! evmabi config --set-bool-decoding legacy
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;
mod tokenize;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// Ethereum ABI codec
#[derive(Parser, Debug)]
#[command(name = "evmabi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Canonical signature and 4-byte selector
    Selector(commands::selector::SelectorArgs),
    /// Canonical form and layout of a type
    Parse(commands::parse::ParseArgs),
    /// Encode a function call
    Encode(commands::encode::EncodeArgs),
    /// Decode ABI data
    Decode(commands::decode::DecodeArgs),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set bool strictness used by decode (strict or legacy)
        #[arg(long)]
        set_bool_decoding: Option<evmabi::BoolDecoding>,
        /// Set the default log level
        #[arg(long)]
        set_log_level: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = Config::load();
    init_tracing(&config.log_level);
    tracing::debug!(path = ?Config::config_path(), "loaded configuration");

    let result = match cli.command {
        Commands::Selector(cmd) => cmd.execute(cli.json),
        Commands::Parse(cmd) => cmd.execute(cli.json),
        Commands::Encode(cmd) => cmd.execute(cli.json),
        Commands::Decode(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Config {
            show,
            set_bool_decoding,
            set_log_level,
        } => handle_config(&mut config, show, set_bool_decoding, set_log_level, cli.json),
    };

    if let Err(e) = result {
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays machine-readable; `RUST_LOG` wins over the
/// configured level
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_bool_decoding: Option<evmabi::BoolDecoding>,
    set_log_level: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(bool_decoding) = set_bool_decoding {
        config.bool_decoding = bool_decoding;
        modified = true;
    }

    if let Some(level) = set_log_level {
        config.set_log_level(&level)?;
        modified = true;
    }

    if modified {
        let path = config.save()?;
        Output::new(json)
            .field("status", "saved")
            .field("path", &path.display().to_string())
            .line(format!("Configuration saved to {}", path.display()))
            .print();
    } else if show {
        Output::new(json)
            .field("log_level", &config.log_level)
            .field("bool_decoding", &config.bool_decoding.to_string())
            .line(format!("Log level:     {}", config.log_level))
            .line(format!("Bool decoding: {}", config.bool_decoding))
            .print();
    } else {
        Output::new(json)
            .line("Use --show to display config, or --set-bool-decoding/--set-log-level to modify")
            .print();
    }

    Ok(())
}
