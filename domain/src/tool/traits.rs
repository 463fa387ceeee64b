//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use std::collections::HashSet;

use super::entities::{ToolCall, ToolDefinition, ToolParameter};

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        // Check that all required parameters are present
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        let valid_params: HashSet<&str> =
            definition.parameters.iter().map(|p| p.name.as_str()).collect();

        for (arg_name, value) in &call.arguments {
            if !valid_params.contains(arg_name.as_str()) {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            }
            if let Some(param) = definition.parameter(arg_name) {
                check_value(param, value)?;
            }
        }

        Ok(())
    }
}

fn check_value(param: &ToolParameter, value: &serde_json::Value) -> Result<(), String> {
    let type_matches = match param.param_type.as_str() {
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        _ => value.is_string(),
    };
    if !type_matches {
        return Err(format!(
            "Parameter '{}' must be of type {}, got {}",
            param.name, param.param_type, value
        ));
    }

    if !param.allowed_values.is_empty() {
        let text = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
        if !param.allowed_values.iter().any(|allowed| *allowed == text) {
            return Err(format!(
                "Invalid value '{}' for parameter '{}'. Possible values: {}",
                text,
                param.name,
                param.allowed_values.join(", ")
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> ToolDefinition {
        ToolDefinition::new("find_proposal", "Search proposals")
            .with_parameter(ToolParameter::new("page", "Result page", false).with_type("integer"))
            .with_parameter(
                ToolParameter::new("status", "Proposal status", false)
                    .with_allowed_values(["submitted", "answered"]),
            )
    }

    #[test]
    fn test_validator_missing_required() {
        let validator = DefaultToolValidator;
        let definition = ToolDefinition::new("test", "test tool")
            .with_parameter(ToolParameter::new("required_param", "A required param", true));

        let call = ToolCall::new("test");
        let result = validator.validate(&call, &definition);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Missing required parameter"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let call = ToolCall::new("find_proposal").with_arg("unknown_param", "value");
        let result = DefaultToolValidator.validate(&call, &definition());
        assert!(result.unwrap_err().contains("Unknown parameter"));
    }

    #[test]
    fn test_validator_wrong_type() {
        let call = ToolCall::new("find_proposal").with_arg("page", "two");
        let result = DefaultToolValidator.validate(&call, &definition());
        assert!(result.unwrap_err().contains("must be of type integer"));
    }

    #[test]
    fn test_validator_value_outside_vocabulary() {
        let call = ToolCall::new("find_proposal").with_arg("status", "archived");
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert!(err.contains("Invalid value 'archived'"));
        assert!(err.contains("submitted, answered"));
    }

    #[test]
    fn test_validator_valid_call() {
        let call = ToolCall::new("find_proposal")
            .with_arg("page", 3)
            .with_arg("status", "answered");

        assert!(DefaultToolValidator.validate(&call, &definition()).is_ok());
    }
}
