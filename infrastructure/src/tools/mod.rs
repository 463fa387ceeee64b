//! Upstream adapters exposed as tools
//!
//! Each adapter is a [`ToolProvider`]:
//! - `firmenbuch`: Austrian company register (SOAP)
//! - `klimaaktiv`: funding catalogue (scraped HTML)
//! - `linz`: participation platform (JSON)
//! - `hue`: Philips Hue bridge on the local network
//!
//! The [`ToolRegistry`] aggregates the adapters selected at start-up.

pub mod firmenbuch;
pub mod hue;
pub mod klimaaktiv;
pub mod linz;

mod registry;
mod schema;

pub use firmenbuch::FirmenbuchProvider;
pub use hue::{HueBridge, HueProvider};
pub use klimaaktiv::KlimaaktivProvider;
pub use linz::LinzProvider;
pub use registry::{RegistryStats, ToolRegistry};
pub use schema::JsonSchemaToolConverter;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use civic_domain::tool::provider::{ProviderError, ToolProvider};

use crate::config::FileConfig;

/// The adapters this crate can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    Firmenbuch,
    Klimaaktiv,
    Linz,
    Hue,
}

impl AdapterKind {
    pub const ALL: [AdapterKind; 4] = [
        AdapterKind::Firmenbuch,
        AdapterKind::Klimaaktiv,
        AdapterKind::Linz,
        AdapterKind::Hue,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AdapterKind::Firmenbuch => "firmenbuch",
            AdapterKind::Klimaaktiv => "klimaaktiv",
            AdapterKind::Linz => "linz",
            AdapterKind::Hue => "hue",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AdapterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdapterKind::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = AdapterKind::ALL.iter().map(|kind| kind.id()).collect();
                format!("unknown adapter '{}'. Possible values: {}", s, names.join(", "))
            })
    }
}

/// Construct one adapter from the merged configuration
pub fn build_provider(
    kind: AdapterKind,
    config: &FileConfig,
) -> Result<Arc<dyn ToolProvider>, ProviderError> {
    let provider: Arc<dyn ToolProvider> = match kind {
        AdapterKind::Firmenbuch => Arc::new(FirmenbuchProvider::from_config(
            &config.firmenbuch,
            &config.http,
        )?),
        AdapterKind::Klimaaktiv => Arc::new(KlimaaktivProvider::from_config(
            &config.klimaaktiv,
            &config.http,
        )?),
        AdapterKind::Linz => Arc::new(LinzProvider::from_config(&config.linz, &config.http)?),
        AdapterKind::Hue => Arc::new(HueProvider::from_config(&config.hue, &config.http)?),
    };
    Ok(provider)
}

/// Construct the selected adapters and discover their tools.
///
/// An empty selection means every adapter. Duplicates are ignored.
pub async fn build_registry(
    kinds: &[AdapterKind],
    config: &FileConfig,
) -> Result<ToolRegistry, ProviderError> {
    let selected: Vec<AdapterKind> = if kinds.is_empty() {
        AdapterKind::ALL.to_vec()
    } else {
        let mut unique = Vec::new();
        for kind in kinds {
            if !unique.contains(kind) {
                unique.push(*kind);
            }
        }
        unique
    };

    let mut registry = ToolRegistry::new();
    for kind in selected {
        registry = registry.register_arc(build_provider(kind, config)?);
    }
    registry.discover().await;

    let stats = registry.stats();
    tracing::info!(
        providers = stats.total_providers,
        tools = stats.total_tools,
        "Tool registry ready"
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_application::ports::tool_executor::ToolExecutorPort;

    #[test]
    fn test_adapter_kind_from_str() {
        assert_eq!("linz".parse::<AdapterKind>().unwrap(), AdapterKind::Linz);
        assert_eq!("HUE".parse::<AdapterKind>().unwrap(), AdapterKind::Hue);
        let err = "zamg".parse::<AdapterKind>().unwrap_err();
        assert!(err.contains("firmenbuch, klimaaktiv, linz, hue"));
    }

    #[tokio::test]
    async fn test_build_registry_without_credentials() {
        let registry = build_registry(&[], &FileConfig::default()).await.unwrap();

        assert_eq!(registry.provider_ids(), vec!["firmenbuch", "klimaaktiv", "linz", "hue"]);
        assert_eq!(registry.available_tools(), vec!["find_funding", "find_proposal"]);
    }

    #[tokio::test]
    async fn test_build_registry_selection() {
        let kinds = [AdapterKind::Linz, AdapterKind::Linz];
        let registry = build_registry(&kinds, &FileConfig::default()).await.unwrap();

        assert_eq!(registry.provider_ids(), vec!["linz"]);
        assert_eq!(registry.server_info().name, "Innovationshauptplatz Linz");
    }
}
