//! Tool provider abstraction
//!
//! Each upstream adapter is a [`ToolProvider`]: it describes its tools and
//! executes calls against them. The registry in the infrastructure layer
//! aggregates the providers selected at start-up.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ToolRegistry                            │
//! │           (aggregates providers, routes by tool name)       │
//! └─────────────────────────────────────────────────────────────┘
//!           │              │              │              │
//!           ▼              ▼              ▼              ▼
//!    ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!    │firmenbuch│   │klimaaktiv│   │   linz   │   │   hue    │
//!    │  (SOAP)  │   │  (HTML)  │   │  (JSON)  │   │  (JSON)  │
//!    └──────────┘   └──────────┘   └──────────┘   └──────────┘
//! ```

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::entities::{ToolCall, ToolDefinition};
use super::value_objects::ToolResult;

/// Error type for tool provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider lacks the configuration it needs (e.g. API key)
    #[error("Provider not available: {0}")]
    NotAvailable(String),

    /// Provider could not be constructed from its configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Name and version announced by a tool server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// One adapter's tools plus their execution
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Unique identifier, also the adapter name on the command line
    ///
    /// Examples: "firmenbuch", "klimaaktiv", "linz", "hue"
    fn id(&self) -> &str;

    /// Display name for user-facing output
    fn display_name(&self) -> &str;

    /// Identity announced when this provider is served on its own
    fn server_info(&self) -> ServerInfo {
        ServerInfo::new(self.id(), env!("CARGO_PKG_VERSION"))
    }

    /// Check if the provider is configured well enough to serve calls
    async fn is_available(&self) -> bool {
        true
    }

    /// Tools this provider can execute
    async fn discover_tools(&self) -> Result<Vec<ToolDefinition>, ProviderError>;

    /// Execute a tool call
    ///
    /// The tool_name in the call must match one of the tools
    /// returned by `discover_tools()`.
    async fn execute(&self, call: &ToolCall) -> ToolResult;

    /// Check if this provider has a specific tool
    async fn has_tool(&self, tool_name: &str) -> bool {
        match self.discover_tools().await {
            Ok(tools) => tools.iter().any(|t| t.name == tool_name),
            Err(_) => false,
        }
    }
}
