//! CLI subcommands

pub mod decode;
pub mod encode;
pub mod parse;
pub mod selector;
