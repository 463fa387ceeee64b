//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_CONFIG_FILES: &[&str] = &["civic-bridge.toml", ".civic-bridge.toml"];

/// Prefix of the generic `CIVIC_BRIDGE_<SECTION>__<KEY>` variables
const ENV_PREFIX: &str = "CIVIC_BRIDGE_";

/// Conventional variable names accepted next to the generic prefix
const ENV_ALIASES: &[(&str, &str)] = &[
    ("FIRMENBUCH_API_KEY", "firmenbuch.api_key"),
    ("PHILIPS_HUE_BRIDGE_ADDRESS", "hue.bridge_address"),
    ("PHILIPS_HUE_API_KEY", "hue.api_key"),
    ("PHILIPS_HUE_LIGHT_IDS", "hue.light_ids"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment (`FIRMENBUCH_API_KEY`, `PHILIPS_HUE_*`, `CIVIC_BRIDGE_*`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./civic-bridge.toml` or `./.civic-bridge.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/civic-bridge/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Load defaults plus environment only (for --no-config)
    pub fn load_without_files() -> Result<FileConfig, Box<figment::Error>> {
        let figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Load a single file over the defaults, ignoring discovery and environment
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    fn with_env(figment: Figment) -> Figment {
        let aliases = Env::raw()
            .filter(|key| alias_target(key.as_str()).is_some())
            .map(|key| alias_target(key.as_str()).unwrap_or(key.as_str()).into());

        figment
            .merge(aliases)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/civic-bridge/config.toml if set,
    /// otherwise falls back to ~/.config/civic-bridge/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("civic-bridge").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    ///
    /// Goes to stderr: stdout belongs to the tool protocol.
    pub fn print_config_sources() {
        eprintln!("Configuration sources (in priority order):");
        eprintln!("  [ENV  ] {}<SECTION>__<KEY>, FIRMENBUCH_API_KEY, PHILIPS_HUE_*", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            eprintln!("  [FOUND] Project: {}", path.display());
        } else {
            eprintln!("  [     ] Project: ./civic-bridge.toml or ./.civic-bridge.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                eprintln!("  [FOUND] Global:  {}", path.display());
            } else {
                eprintln!("  [     ] Global:  {}", path.display());
            }
        }

        eprintln!("  [     ] Default: built-in defaults");
    }
}

fn alias_target(key: &str) -> Option<&'static str> {
    ENV_ALIASES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, target)| *target)
}
