//! Stdio tool server speaking the Model Context Protocol subset needed by
//! tool-calling clients

pub mod protocol;
pub mod stdio;

pub use stdio::{ServerError, ToolServer};
