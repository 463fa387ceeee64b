//! find_proposal tool: citizen proposals on the Linz participation platform

use std::time::Instant;

use async_trait::async_trait;
use civic_domain::core::error::{AdapterError, AdapterResult};
use civic_domain::participation::{
    IdeaPage, PROPOSAL_SORT, PROPOSAL_STATUS, ProposalQuery, map_proposals,
};
use civic_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    provider::{ProviderError, ServerInfo, ToolProvider},
    value_objects::{ToolError, ToolResult},
};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::{FileHttpConfig, FileLinzConfig};
use crate::http::{build_client, success_body, transport_failure};

/// Tool name constant
pub const FIND_PROPOSAL: &str = "find_proposal";

/// Get the tool definition for find_proposal
pub fn find_proposal_definition() -> ToolDefinition {
    let status = PROPOSAL_STATUS.names();
    let sort = PROPOSAL_SORT.names();

    ToolDefinition::new(
        FIND_PROPOSAL,
        "Search citizen proposals on the Innovationshauptplatz Linz participation platform",
    )
    .with_parameter(ToolParameter::new("page", "First page is number 1", false).with_type("integer"))
    .with_parameter(
        ToolParameter::new(
            PROPOSAL_STATUS.parameter(),
            format!("Possible values: {}", status.join(", ")),
            false,
        )
        .with_allowed_values(status),
    )
    .with_parameter(
        ToolParameter::new(
            PROPOSAL_SORT.parameter(),
            format!("Possible values: {}", sort.join(", ")),
            false,
        )
        .with_allowed_values(sort),
    )
}

/// Provider for the participation platform
pub struct LinzProvider {
    client: Client,
    base_url: String,
    page_size: u32,
    phase: String,
}

impl LinzProvider {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        page_size: u32,
        phase: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            page_size,
            phase: phase.into(),
        }
    }

    pub fn from_config(config: &FileLinzConfig, http: &FileHttpConfig) -> Result<Self, ProviderError> {
        Ok(Self::new(
            build_client(http)?,
            config.base_url.clone(),
            config.page_size,
            config.phase.clone(),
        ))
    }

    async fn find_proposal(&self, call: &ToolCall) -> Result<(String, usize), ToolError> {
        let query = ProposalQuery::from_names(
            call.get_i64("page"),
            call.get_string(PROPOSAL_STATUS.parameter()),
            call.get_string(PROPOSAL_SORT.parameter()),
        )?;
        let page = self.fetch(&query).await?;

        let proposals = map_proposals(page);
        debug!(count = proposals.len(), page = query.page, "Mapped proposals");

        let text = serde_json::to_string(&proposals).map_err(|e| {
            ToolError::execution_failed(format!("Failed to serialize proposals: {}", e))
        })?;
        Ok((text, proposals.len()))
    }

    async fn fetch(&self, query: &ProposalQuery) -> AdapterResult<IdeaPage> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&query.query_pairs(self.page_size, &self.phase))
            .send()
            .await
            .map_err(transport_failure)?;
        let body = success_body(response).await?;

        serde_json::from_str(&body)
            .map_err(|e| AdapterError::MalformedEnvelope(format!("invalid ideas document: {}", e)))
    }
}

#[async_trait]
impl ToolProvider for LinzProvider {
    fn id(&self) -> &str {
        "linz"
    }

    fn display_name(&self) -> &str {
        "Innovationshauptplatz Linz"
    }

    fn server_info(&self) -> ServerInfo {
        ServerInfo::new("Innovationshauptplatz Linz", "1.0.0")
    }

    async fn discover_tools(&self) -> Result<Vec<ToolDefinition>, ProviderError> {
        Ok(vec![find_proposal_definition()])
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        if call.tool_name != FIND_PROPOSAL {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!("Tool not found: {}", call.tool_name)),
            );
        }

        let start = Instant::now();
        let outcome = self.find_proposal(call).await;
        let elapsed = start.elapsed().as_millis() as u64;

        match outcome {
            Ok((text, count)) => ToolResult::success(FIND_PROPOSAL, text)
                .with_match_count(count)
                .with_duration(elapsed),
            Err(e) => {
                warn!(error = %e, "find_proposal failed");
                ToolResult::failure(FIND_PROPOSAL, e).with_duration(elapsed)
            }
        }
    }
}
