//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how they are described on
//! the wire" (infrastructure).

use civic_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to JSON Schema descriptions.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to `{name, description, inputSchema}`.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools, in registration order.
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        spec.all().map(|tool| self.tool_to_schema(tool)).collect()
    }
}
