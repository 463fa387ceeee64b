//! Presentation layer for civic-bridge
//!
//! This crate contains the CLI definitions, console output and the stdio
//! tool server.

pub mod cli;
pub mod output;
pub mod server;

// Re-export commonly used types
pub use cli::arguments::{ArgumentError, build_call};
pub use cli::commands::{Cli, Command};
pub use output::console::ConsoleFormatter;
pub use server::{ServerError, ToolServer};
