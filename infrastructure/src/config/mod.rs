//! Configuration loading for civic-bridge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./civic-bridge.toml` or `./.civic-bridge.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/civic-bridge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_FIRMENBUCH_ENDPOINT, DEFAULT_KLIMAAKTIV_URL,
    DEFAULT_LINZ_PHASE, DEFAULT_LINZ_URL, FileConfig, FileFirmenbuchConfig, FileHttpConfig,
    FileHueConfig, FileKlimaaktivConfig, FileLinzConfig,
};
pub use loader::ConfigLoader;
