//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the tool listing
//! shape of the Model Context Protocol: `{name, description, inputSchema}`.

use civic_application::ports::tool_schema::ToolSchemaPort;
use civic_domain::tool::entities::ToolDefinition;

/// Default implementation producing MCP tool descriptions.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"number"` → `"number"`
/// - `"integer"` → `"integer"`
/// - `"boolean"` → `"boolean"`
/// - anything else → `"string"`
///
/// A closed vocabulary becomes an `enum`.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };

            let mut prop = serde_json::Map::new();
            prop.insert("type".to_string(), serde_json::json!(schema_type));
            prop.insert(
                "description".to_string(),
                serde_json::json!(param.description),
            );
            if !param.allowed_values.is_empty() {
                prop.insert("enum".to_string(), serde_json::json!(param.allowed_values));
            }
            properties.insert(param.name.clone(), serde_json::Value::Object(prop));

            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "name": tool.name,
            "description": tool.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}
