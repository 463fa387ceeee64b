//! Application layer for civic-bridge
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    document_parser::DocumentParser, soap_transport::SoapTransport,
    tool_executor::ToolExecutorPort, tool_schema::ToolSchemaPort,
};
pub use use_cases::firmenbuch::FirmenbuchUseCase;
