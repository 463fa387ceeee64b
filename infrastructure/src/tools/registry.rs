//! Tool Registry
//!
//! The [`ToolRegistry`] aggregates the adapters selected at start-up and
//! implements [`ToolExecutorPort`]. It handles tool discovery, argument
//! validation and routing of calls to the owning provider.
//!
//! # Usage
//!
//! ```ignore
//! use civic_infrastructure::tools::{KlimaaktivProvider, LinzProvider, ToolRegistry};
//!
//! let mut registry = ToolRegistry::new()
//!     .register(KlimaaktivProvider::from_config(&config.klimaaktiv, &config.http)?)
//!     .register(LinzProvider::from_config(&config.linz, &config.http)?);
//!
//! registry.discover().await;
//!
//! let call = ToolCall::new("find_funding").with_arg("state", "vienna");
//! let result = registry.execute(&call).await;
//! ```
//!
//! # Discovery Process
//!
//! 1. Providers are visited in registration order
//! 2. Unavailable providers (missing API key, bridge address, ...) are
//!    skipped with a warning
//! 3. The first provider to announce a tool name owns it
//! 4. A unified `ToolSpec` is built for listing and validation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use civic_application::ports::tool_executor::ToolExecutorPort;
use civic_domain::tool::{
    entities::{ToolCall, ToolSpec},
    provider::{ServerInfo, ToolProvider},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};

/// Tool registry that aggregates multiple providers
pub struct ToolRegistry {
    /// Registered providers
    providers: Vec<Arc<dyn ToolProvider>>,
    /// Tool name -> provider ID mapping (cached after discovery)
    tool_mapping: HashMap<String, String>,
    /// Merged tool specification
    tool_spec: ToolSpec,
    /// Whether discovery has been run
    discovered: bool,
    validator: DefaultToolValidator,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            tool_mapping: HashMap::new(),
            tool_spec: ToolSpec::new(),
            discovered: false,
            validator: DefaultToolValidator,
        }
    }

    /// Register a tool provider
    pub fn register<P: ToolProvider + 'static>(self, provider: P) -> Self {
        self.register_arc(Arc::new(provider))
    }

    /// Register a tool provider (Arc version)
    pub fn register_arc(mut self, provider: Arc<dyn ToolProvider>) -> Self {
        self.providers.push(provider);
        self.discovered = false;
        self
    }

    /// Discover tools from all providers
    ///
    /// Providers are probed concurrently; results are merged in
    /// registration order. This must be called before using the registry.
    pub async fn discover(&mut self) {
        let mut tool_spec = ToolSpec::new();
        let mut tool_mapping = HashMap::new();

        let probes = join_all(self.providers.iter().map(|provider| async move {
            if !provider.is_available().await {
                return None;
            }
            Some(provider.discover_tools().await)
        }))
        .await;

        for (provider, probe) in self.providers.iter().zip(probes) {
            match probe {
                None => {
                    tracing::warn!(
                        provider = provider.id(),
                        "Provider not configured, its tools are not served"
                    );
                }
                Some(Ok(tools)) => {
                    for tool in tools {
                        if tool_mapping.contains_key(&tool.name) {
                            tracing::warn!(
                                tool = %tool.name,
                                provider = provider.id(),
                                "Tool already registered by another provider"
                            );
                            continue;
                        }
                        tracing::debug!(
                            tool = %tool.name,
                            provider = provider.id(),
                            "Registered tool"
                        );
                        tool_mapping.insert(tool.name.clone(), provider.id().to_string());
                        tool_spec = tool_spec.register(tool);
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!(
                        provider = provider.id(),
                        error = %e,
                        "Failed to discover tools from provider"
                    );
                }
            }
        }

        self.tool_spec = tool_spec;
        self.tool_mapping = tool_mapping;
        self.discovered = true;
    }

    /// Get the provider for a specific tool
    fn provider_for(&self, tool_name: &str) -> Option<&Arc<dyn ToolProvider>> {
        let provider_id = self.tool_mapping.get(tool_name)?;
        self.providers.iter().find(|p| p.id() == provider_id)
    }

    /// Get a list of registered provider IDs
    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Identity announced by the server.
    ///
    /// A single provider keeps its own name; several providers are announced
    /// under the aggregate name.
    pub fn server_info(&self) -> ServerInfo {
        match self.providers.as_slice() {
            [provider] => provider.server_info(),
            _ => ServerInfo::new("civic-bridge", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Get statistics about registered tools
    pub fn stats(&self) -> RegistryStats {
        let mut tools_per_provider = HashMap::new();
        for provider_id in self.tool_mapping.values() {
            *tools_per_provider.entry(provider_id.clone()).or_insert(0) += 1;
        }

        RegistryStats {
            total_providers: self.providers.len(),
            total_tools: self.tool_mapping.len(),
            tools_per_provider,
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the registry
#[derive(Debug, Clone)]
pub struct RegistryStats {
    pub total_providers: usize,
    pub total_tools: usize,
    pub tools_per_provider: HashMap<String, usize>,
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        if !self.discovered {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::execution_failed("Registry not initialized. Call discover() first."),
            );
        }

        let (Some(definition), Some(provider)) = (
            self.tool_spec.get(&call.tool_name),
            self.provider_for(&call.tool_name),
        ) else {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!("Tool not found: {}", call.tool_name)),
            );
        };

        if let Err(message) = self.validator.validate(call, definition) {
            tracing::debug!(tool = %call.tool_name, %message, "Rejected tool call");
            return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(message));
        }

        tracing::info!(tool = %call.tool_name, provider = provider.id(), "Executing tool");
        let result = provider.execute(call).await;
        tracing::debug!(
            tool = %call.tool_name,
            success = result.is_success(),
            duration_ms = ?result.metadata.duration_ms,
            "Tool finished"
        );
        result
    }
}
