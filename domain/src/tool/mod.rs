//! Tool domain module
//!
//! Every adapter is exposed as one or more tools. A tool is described by a
//! [`ToolDefinition`] (name, description, parameters with optional closed
//! vocabularies), invoked through a [`ToolCall`] and answered with a
//! [`ToolResult`] carrying a single text payload.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (text)       │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolSpec`]: Ordered set of available tools
//! - [`ToolDefinition`]: Schema for a single tool
//! - [`ToolCall`]: An invocation request with arguments
//! - [`ToolResult`]: Execution outcome
//! - [`ToolValidator`]: Pure domain trait for parameter validation
//! - [`ToolProvider`]: One adapter's tools plus their execution
//!
//! # Architecture
//!
//! - **Domain** (this module): Pure definitions, no I/O
//! - **Application** (`ToolExecutorPort`): Port trait for tool execution
//! - **Infrastructure** (`ToolRegistry` and the adapter providers): HTTP,
//!   SOAP and HTML scraping

pub mod entities;
pub mod provider;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use provider::{ProviderError, ServerInfo, ToolProvider};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};
