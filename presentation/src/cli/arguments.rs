//! Turn `call` command line arguments into a [`ToolCall`]

use civic_domain::tool::entities::{ToolCall, ToolDefinition};
use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ArgumentError {
    #[error("Argument '{0}' is not of the form key=value")]
    MissingSeparator(String),

    #[error("--json is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("--json must be a JSON object")]
    NotAnObject,

    #[error("Argument '{name}' expects a {expected}, got '{value}'")]
    InvalidValue {
        name: String,
        expected: String,
        value: String,
    },
}

/// Build a call from `--json` and `--arg key=value` pairs.
///
/// Values are typed after the tool's parameter definition when one is
/// known; anything else is passed as a string and left to validation.
pub fn build_call(
    tool: &str,
    pairs: &[String],
    json: Option<&str>,
    definition: Option<&ToolDefinition>,
) -> Result<ToolCall, ArgumentError> {
    let mut arguments = match json {
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(ArgumentError::NotAnObject),
            Err(e) => return Err(ArgumentError::InvalidJson(e.to_string())),
        },
        None => Map::new(),
    };

    for pair in pairs {
        let (name, raw) = pair
            .split_once('=')
            .ok_or_else(|| ArgumentError::MissingSeparator(pair.clone()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ArgumentError::MissingSeparator(pair.clone()));
        }

        let param_type = definition
            .and_then(|d| d.parameter(name))
            .map(|p| p.param_type.as_str())
            .unwrap_or("string");
        arguments.insert(name.to_string(), typed_value(name, raw, param_type)?);
    }

    Ok(ToolCall::new(tool).with_arguments(arguments))
}

fn typed_value(name: &str, raw: &str, param_type: &str) -> Result<Value, ArgumentError> {
    let invalid = || ArgumentError::InvalidValue {
        name: name.to_string(),
        expected: param_type.to_string(),
        value: raw.to_string(),
    };

    match param_type {
        "integer" => raw.trim().parse::<i64>().map(Value::from).map_err(|_| invalid()),
        "number" => {
            let raw = raw.trim();
            if let Ok(n) = raw.parse::<i64>() {
                return Ok(Value::from(n));
            }
            raw.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(invalid)
        }
        "boolean" => raw.trim().parse::<bool>().map(Value::Bool).map_err(|_| invalid()),
        _ => Ok(Value::String(raw.to_string())),
    }
}
