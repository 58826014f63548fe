//! CLI layer for stormline.
//!
//! Provides the command-line interface using clap, with an interactive
//! chat session, a one-shot ask command, and direct tool invocations.

pub mod commands;
pub mod parser;

pub use commands::execute;
pub use parser::{Cli, Commands};
