//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod document_parser;
pub mod soap_transport;
pub mod tool_executor;
pub mod tool_schema;
