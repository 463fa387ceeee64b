//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing values fall back to the defaults below.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Default SOAP endpoint of the company register
pub const DEFAULT_FIRMENBUCH_ENDPOINT: &str =
    "https://justizonline.gv.at/jop/api/at.gv.justiz.fbw/ws";

/// Default page of the klimaaktiv funding catalogue
pub const DEFAULT_KLIMAAKTIV_URL: &str = "https://www.klimaaktiv.at/foerderungen";

/// Default ideas endpoint of the Linz participation platform
pub const DEFAULT_LINZ_URL: &str = "https://partizipation.linz.at/web_api/v1/ideas";

/// Default participation phase queried on the Linz platform
pub const DEFAULT_LINZ_PHASE: &str = "060ee331-38c9-4683-a493-6cd00093e617";

const REDACTED: &str = "********";

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("http.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("{0}.page_size cannot be 0")]
    InvalidPageSize(&'static str),

    #[error("{0} cannot be empty")]
    EmptyValue(&'static str),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Company register (SOAP)
    pub firmenbuch: FileFirmenbuchConfig,
    /// Funding catalogue (HTML)
    pub klimaaktiv: FileKlimaaktivConfig,
    /// Participation platform (JSON)
    pub linz: FileLinzConfig,
    /// Hue bridge on the local network
    pub hue: FileHueConfig,
    /// Shared HTTP client settings
    pub http: FileHttpConfig,
}

/// `[firmenbuch]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFirmenbuchConfig {
    /// Sent as `X-API-KEY`
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl Default for FileFirmenbuchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_FIRMENBUCH_ENDPOINT.to_string(),
        }
    }
}

/// `[klimaaktiv]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKlimaaktivConfig {
    pub base_url: String,
    /// Programmes per result page
    pub page_size: usize,
}

impl Default for FileKlimaaktivConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_KLIMAAKTIV_URL.to_string(),
            page_size: 5,
        }
    }
}

/// `[linz]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLinzConfig {
    pub base_url: String,
    /// Proposals per result page
    pub page_size: u32,
    pub phase: String,
}

impl Default for FileLinzConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LINZ_URL.to_string(),
            page_size: 10,
            phase: DEFAULT_LINZ_PHASE.to_string(),
        }
    }
}

/// `[hue]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHueConfig {
    /// Host (and optional port) of the bridge, without scheme
    pub bridge_address: Option<String>,
    /// Application key issued by the bridge
    pub api_key: Option<String>,
    /// Light ids; light number N addresses the N-th entry
    #[serde(deserialize_with = "comma_separated")]
    pub light_ids: Vec<String>,
}

/// `[http]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for FileHttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: format!("civic-bridge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Accept either a list or a single comma separated string
fn comma_separated<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrText {
        List(Vec<String>),
        Text(String),
    }

    Ok(match ListOrText::deserialize(deserializer)? {
        ListOrText::List(items) => items,
        ListOrText::Text(text) => text
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.http.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.klimaaktiv.page_size == 0 {
            return Err(ConfigValidationError::InvalidPageSize("klimaaktiv"));
        }
        if self.linz.page_size == 0 {
            return Err(ConfigValidationError::InvalidPageSize("linz"));
        }
        if self.firmenbuch.endpoint.trim().is_empty() {
            return Err(ConfigValidationError::EmptyValue("firmenbuch.endpoint"));
        }
        Ok(())
    }

    /// Copy with every secret masked, for `--show-config`
    pub fn redacted(&self) -> Self {
        let mask = |secret: &Option<String>| secret.as_ref().map(|_| REDACTED.to_string());
        let mut config = self.clone();
        config.firmenbuch.api_key = mask(&self.firmenbuch.api_key);
        config.hue.api_key = mask(&self.hue.api_key);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[firmenbuch]
api_key = "fb-key"
endpoint = "https://example.test/ws"

[klimaaktiv]
page_size = 3

[linz]
page_size = 20
phase = "abc"

[hue]
bridge_address = "192.168.1.20"
api_key = "hue-key"
light_ids = ["id-1", "id-2"]

[http]
timeout_seconds = 10
user_agent = "test-agent"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.firmenbuch.api_key.as_deref(), Some("fb-key"));
        assert_eq!(config.firmenbuch.endpoint, "https://example.test/ws");
        assert_eq!(config.klimaaktiv.page_size, 3);
        assert_eq!(config.klimaaktiv.base_url, DEFAULT_KLIMAAKTIV_URL);
        assert_eq!(config.linz.page_size, 20);
        assert_eq!(config.linz.phase, "abc");
        assert_eq!(config.hue.light_ids, vec!["id-1", "id-2"]);
        assert_eq!(config.http.timeout_seconds, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.firmenbuch.api_key.is_none());
        assert_eq!(config.firmenbuch.endpoint, DEFAULT_FIRMENBUCH_ENDPOINT);
        assert_eq!(config.klimaaktiv.page_size, 5);
        assert_eq!(config.linz.page_size, 10);
        assert_eq!(config.linz.phase, DEFAULT_LINZ_PHASE);
        assert!(config.hue.light_ids.is_empty());
        assert_eq!(config.http.timeout_seconds, 30);
        assert!(config.http.user_agent.starts_with("civic-bridge/"));
    }

    #[test]
    fn test_light_ids_from_comma_string() {
        let config: FileConfig =
            toml::from_str("[hue]\nlight_ids = \"id-1, id-2,,id-3\"").unwrap();
        assert_eq!(config.hue.light_ids, vec!["id-1", "id-2", "id-3"]);
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config: FileConfig = toml::from_str("[http]\ntimeout_seconds = 0").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_zero_page_size() {
        let config: FileConfig = toml::from_str("[linz]\npage_size = 0").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidPageSize("linz"))
        );
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "linz.page_size cannot be 0"
        );
    }

    #[test]
    fn test_redacted_masks_secrets_only() {
        let config: FileConfig = toml::from_str(
            "[firmenbuch]\napi_key = \"secret\"\n[hue]\nbridge_address = \"bridge.local\"",
        )
        .unwrap();

        let redacted = config.redacted();
        assert_eq!(redacted.firmenbuch.api_key.as_deref(), Some(REDACTED));
        assert!(redacted.hue.api_key.is_none());
        assert_eq!(redacted.hue.bridge_address.as_deref(), Some("bridge.local"));
    }
}
