//! find_funding tool: klimaaktiv funding catalogue
//!
//! The catalogue has no API. The filtered catalogue page is fetched, every
//! accordion entry is converted to markdown and the requested page of
//! entries is returned as one document.

mod markdown;

use std::sync::LazyLock;
use std::time::Instant;

use async_trait::async_trait;
use civic_domain::core::error::AdapterResult;
use civic_domain::core::paging::paginate;
use civic_domain::funding::{
    FEDERAL_STATE, FUNDING_TYPE, Funding, FundingQuery, TARGET_AUDIENCE, render_fundings,
};
use civic_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    provider::{ProviderError, ServerInfo, ToolProvider},
    value_objects::{ToolError, ToolResult},
};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::config::{FileHttpConfig, FileKlimaaktivConfig};
use crate::http::{build_client, success_body, transport_failure};

pub use markdown::{element_to_markdown, element_text};

/// Tool name constant
pub const FIND_FUNDING: &str = "find_funding";

static ITEM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#accordion-fundings .accordion-item").expect("valid item selector")
});
static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2 button").expect("valid heading selector"));
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".accordion-body").expect("valid body selector"));

/// Get the tool definition for find_funding
pub fn find_funding_definition() -> ToolDefinition {
    let vocabulary = |name: &str, values: Vec<&'static str>| {
        ToolParameter::new(name, format!("Possible values: {}", values.join(", ")), false)
            .with_allowed_values(values)
    };

    ToolDefinition::new(
        FIND_FUNDING,
        "Search the klimaaktiv catalogue of Austrian climate and energy funding programmes",
    )
    .with_parameter(ToolParameter::new("page", "First page is number 1", false).with_type("integer"))
    .with_parameter(vocabulary(FUNDING_TYPE.parameter(), FUNDING_TYPE.names()))
    .with_parameter(vocabulary(TARGET_AUDIENCE.parameter(), TARGET_AUDIENCE.names()))
    .with_parameter(vocabulary(FEDERAL_STATE.parameter(), FEDERAL_STATE.names()))
}

/// Extract the funding programmes of a catalogue page
pub fn parse_fundings(html: &str) -> Vec<Funding> {
    let document = Html::parse_document(html);

    document
        .select(&ITEM_SELECTOR)
        .map(|item| {
            let heading = item
                .select(&HEADING_SELECTOR)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let body = item
                .select(&BODY_SELECTOR)
                .next()
                .map(element_to_markdown)
                .filter(|markdown| !markdown.is_empty());
            Funding { heading, body }
        })
        .collect()
}

/// Provider for the funding catalogue
pub struct KlimaaktivProvider {
    client: Client,
    base_url: String,
    page_size: usize,
}

impl KlimaaktivProvider {
    pub fn new(client: Client, base_url: impl Into<String>, page_size: usize) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            page_size,
        }
    }

    pub fn from_config(
        config: &FileKlimaaktivConfig,
        http: &FileHttpConfig,
    ) -> Result<Self, ProviderError> {
        Ok(Self::new(
            build_client(http)?,
            config.base_url.clone(),
            config.page_size,
        ))
    }

    async fn find_funding(&self, call: &ToolCall) -> AdapterResult<(String, usize)> {
        let query = FundingQuery::from_names(
            call.get_i64("page"),
            call.get_string(FUNDING_TYPE.parameter()),
            call.get_string(TARGET_AUDIENCE.parameter()),
            call.get_string(FEDERAL_STATE.parameter()),
        )?;
        debug!(?query, "Fetching funding catalogue");

        let response = self
            .client
            .get(&self.base_url)
            .query(&query.query_pairs())
            .send()
            .await
            .map_err(transport_failure)?;
        let html = success_body(response).await?;

        let fundings = parse_fundings(&html);
        let total = fundings.len();
        let page = paginate(fundings, query.page, self.page_size);
        debug!(total, returned = page.len(), page = query.page, "Scraped funding catalogue");

        Ok((render_fundings(&page), page.len()))
    }
}

#[async_trait]
impl ToolProvider for KlimaaktivProvider {
    fn id(&self) -> &str {
        "klimaaktiv"
    }

    fn display_name(&self) -> &str {
        "klimaaktiv Förderungen"
    }

    fn server_info(&self) -> ServerInfo {
        ServerInfo::new("klimaaktiv Förderungen", "1.0.0")
    }

    async fn discover_tools(&self) -> Result<Vec<ToolDefinition>, ProviderError> {
        Ok(vec![find_funding_definition()])
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        if call.tool_name != FIND_FUNDING {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!("Tool not found: {}", call.tool_name)),
            );
        }

        let start = Instant::now();
        let outcome = self.find_funding(call).await;
        let elapsed = start.elapsed().as_millis() as u64;

        match outcome {
            Ok((text, count)) => ToolResult::success(FIND_FUNDING, text)
                .with_match_count(count)
                .with_duration(elapsed),
            Err(e) => {
                warn!(error = %e, "find_funding failed");
                ToolResult::failure(FIND_FUNDING, e.into()).with_duration(elapsed)
            }
        }
    }
}
