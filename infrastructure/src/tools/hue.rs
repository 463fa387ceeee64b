//! Philips Hue tools: set_light and turn_off
//!
//! Talks to the bridge's CLIP v2 API on the local network. Lights are
//! addressed by a 1-based number into the configured light id list.

use std::time::Instant;

use async_trait::async_trait;
use civic_domain::lighting::{LightCommand, parse_color, resolve_light};
use civic_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    provider::{ProviderError, ServerInfo, ToolProvider},
    value_objects::{ToolError, ToolResult},
};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::{FileHttpConfig, FileHueConfig};
use crate::http::build_local_device_client;

/// Tool name constants
pub const SET_LIGHT: &str = "set_light";
pub const TURN_OFF: &str = "turn_off";

/// Header carrying the bridge application key
const APPLICATION_KEY_HEADER: &str = "hue-application-key";

const SUCCESS: &str = "Success";
const BRIDGE_ERROR: &str = "Error talking to Philips HUE Bridge";

fn number_parameter() -> ToolParameter {
    ToolParameter::new("number", "Number of the lightbulb. Starting at 1", true).with_type("number")
}

pub fn set_light_definition() -> ToolDefinition {
    ToolDefinition::new(SET_LIGHT, "Set colour and brightness of a lightbulb")
        .with_parameter(
            ToolParameter::new("brightness", "0 means off, 100 means full brightness", true)
                .with_type("number"),
        )
        .with_parameter(ToolParameter::new(
            "color",
            "Name of the color. Either a web color like \"hotpink,\" \"yellow,\" or \"navy,\" or a HEX color like \"#FF0A13.\"",
            true,
        ))
        .with_parameter(number_parameter())
}

pub fn turn_off_definition() -> ToolDefinition {
    ToolDefinition::new(TURN_OFF, "Turn a lightbulb off").with_parameter(number_parameter())
}

/// Connection to one bridge
#[derive(Debug, Clone)]
pub struct HueBridge {
    /// Scheme and authority, e.g. `https://192.168.1.20`
    pub base_url: String,
    pub api_key: String,
    pub light_ids: Vec<String>,
}

/// Provider for the Hue bridge.
///
/// Unavailable until bridge address, application key and light ids are all
/// configured.
pub struct HueProvider {
    client: Client,
    bridge: Option<HueBridge>,
}

impl HueProvider {
    pub fn new(client: Client, bridge: HueBridge) -> Self {
        Self {
            client,
            bridge: Some(bridge),
        }
    }

    pub fn from_config(config: &FileHueConfig, http: &FileHttpConfig) -> Result<Self, ProviderError> {
        let client = build_local_device_client(http)?;
        let bridge = match (&config.bridge_address, &config.api_key) {
            (Some(address), Some(api_key))
                if !address.trim().is_empty() && !config.light_ids.is_empty() =>
            {
                Some(HueBridge {
                    base_url: format!("https://{}", address.trim()),
                    api_key: api_key.clone(),
                    light_ids: config.light_ids.clone(),
                })
            }
            _ => {
                debug!("Hue bridge not configured");
                None
            }
        };
        Ok(Self { client, bridge })
    }

    /// Build the command for a call; caller errors become the tool output
    fn command_for(call: &ToolCall) -> Result<LightCommand, ToolError> {
        if call.tool_name == TURN_OFF {
            return Ok(LightCommand::off());
        }

        let color = call
            .require_string("color")
            .map_err(ToolError::invalid_argument)?;
        let brightness = call
            .arguments
            .get("brightness")
            .and_then(|value| value.as_f64())
            .ok_or_else(|| ToolError::invalid_argument("Missing required argument: brightness"))?;
        let xy = parse_color(color).map_err(|e| ToolError::invalid_argument(e.to_string()))?;

        Ok(LightCommand::set(xy, brightness))
    }

    async fn put_light(
        &self,
        bridge: &HueBridge,
        light_id: &str,
        command: &LightCommand,
    ) -> Result<(), String> {
        let url = format!("{}/clip/v2/resource/light/{}", bridge.base_url, light_id);
        let response = self
            .client
            .put(&url)
            .header(APPLICATION_KEY_HEADER, &bridge.api_key)
            .json(command)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        let body: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        if !status.is_success() {
            return Err(format!("HTTP {}: {}", status, body));
        }

        match body.get("errors").and_then(|errors| errors.as_array()) {
            Some(errors) if !errors.is_empty() => {
                Err(serde_json::Value::from(errors.clone()).to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Light number argument; the schema allows any JSON number
fn light_number(call: &ToolCall) -> Result<i64, ToolError> {
    let value = call
        .arguments
        .get("number")
        .and_then(|value| value.as_f64())
        .ok_or_else(|| ToolError::invalid_argument("Missing required argument: number"))?;

    if value.fract() != 0.0 {
        return Err(ToolError::not_found(format!("Light number {} not found", value)));
    }
    Ok(value as i64)
}

#[async_trait]
impl ToolProvider for HueProvider {
    fn id(&self) -> &str {
        "hue"
    }

    fn display_name(&self) -> &str {
        "Philips HUE"
    }

    fn server_info(&self) -> ServerInfo {
        ServerInfo::new("Philips HUE", "1.0.0")
    }

    async fn is_available(&self) -> bool {
        self.bridge.is_some()
    }

    async fn discover_tools(&self) -> Result<Vec<ToolDefinition>, ProviderError> {
        if self.bridge.is_none() {
            return Err(ProviderError::NotAvailable(
                "hue.bridge_address, hue.api_key and hue.light_ids must be set".into(),
            ));
        }
        Ok(vec![set_light_definition(), turn_off_definition()])
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let tool_name = call.tool_name.as_str();
        if tool_name != SET_LIGHT && tool_name != TURN_OFF {
            return ToolResult::failure(
                tool_name,
                ToolError::not_found(format!("Tool not found: {}", tool_name)),
            );
        }
        let Some(bridge) = &self.bridge else {
            return ToolResult::failure(
                tool_name,
                ToolError::execution_failed("Hue bridge is not configured"),
            );
        };

        let command = match Self::command_for(call) {
            Ok(command) => command,
            Err(e) => return ToolResult::failure(tool_name, e),
        };
        let light_id = match light_number(call).and_then(|number| {
            resolve_light(&bridge.light_ids, number).map_err(|e| ToolError::not_found(e.to_string()))
        }) {
            Ok(id) => id,
            Err(e) => return ToolResult::failure(tool_name, e),
        };

        let start = Instant::now();
        let outcome = self.put_light(bridge, light_id, &command).await;
        let elapsed = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => {
                debug!(tool = tool_name, light = light_id, "Light updated");
                ToolResult::success(tool_name, SUCCESS).with_duration(elapsed)
            }
            Err(details) => {
                warn!(tool = tool_name, light = light_id, error = %details, "Bridge call failed");
                ToolResult::failure(
                    tool_name,
                    ToolError::upstream_error(BRIDGE_ERROR).with_details(details),
                )
                .with_duration(elapsed)
            }
        }
    }
}
