//! Company register tools: find_company and get_company_by_register_number

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use civic_application::FirmenbuchUseCase;
use civic_domain::core::error::AdapterError;
use civic_domain::firmenbuch::{CompanySearch, RegisterNumber};
use civic_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    provider::{ProviderError, ServerInfo, ToolProvider},
    value_objects::{ToolError, ToolResult},
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{FileFirmenbuchConfig, FileHttpConfig};
use crate::soap::{QuickXmlParser, ReqwestSoapTransport};

/// Tool name constants
pub const FIND_COMPANY: &str = "find_company";
pub const GET_COMPANY_BY_REGISTER_NUMBER: &str = "get_company_by_register_number";

pub fn find_company_definition() -> ToolDefinition {
    ToolDefinition::new(
        FIND_COMPANY,
        "Search the Austrian company register (Firmenbuch) by company name",
    )
    .with_parameter(ToolParameter::new(
        "name",
        "Name or part of the name of the searched company",
        true,
    ))
    .with_parameter(
        ToolParameter::new(
            "exact",
            "Only return companies whose registered name matches exactly",
            false,
        )
        .with_type("boolean"),
    )
}

pub fn get_company_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_COMPANY_BY_REGISTER_NUMBER,
        "Get the current register extract of a company: name, legal form, address and persons with their functions",
    )
    .with_parameter(ToolParameter::new(
        "corporateRegisterNumber",
        "Corporate register number. German \"Firmenbuchnummer\". Bunch of digits and one (lowercase) character at the end.",
        true,
    ))
}

/// Provider for the company register.
///
/// Without an API key the provider stays registered but unavailable.
pub struct FirmenbuchProvider {
    use_case: Option<FirmenbuchUseCase>,
}

impl FirmenbuchProvider {
    pub fn new(use_case: FirmenbuchUseCase) -> Self {
        Self {
            use_case: Some(use_case),
        }
    }

    pub fn from_config(
        config: &FileFirmenbuchConfig,
        http: &FileHttpConfig,
    ) -> Result<Self, ProviderError> {
        match ReqwestSoapTransport::from_config(config, http) {
            Ok(transport) => Ok(Self::new(FirmenbuchUseCase::new(
                Arc::new(transport),
                Arc::new(QuickXmlParser::new()),
            ))),
            Err(ProviderError::NotAvailable(reason)) => {
                debug!(%reason, "Company register not configured");
                Ok(Self { use_case: None })
            }
            Err(e) => Err(e),
        }
    }

    async fn find_company(
        use_case: &FirmenbuchUseCase,
        call: &ToolCall,
    ) -> Result<(String, usize), ToolError> {
        let name = call.require_string("name").map_err(AdapterError::invalid)?;
        let search = CompanySearch::new(name)?.exact(call.get_bool("exact").unwrap_or(false));

        let results = use_case.find_company(&search).await?;
        Ok((to_json(&results)?, results.len()))
    }

    async fn get_company(
        use_case: &FirmenbuchUseCase,
        call: &ToolCall,
    ) -> Result<(String, usize), ToolError> {
        let raw = call
            .require_string("corporateRegisterNumber")
            .map_err(AdapterError::invalid)?;
        let register_number = RegisterNumber::parse(raw)?;
        let cutoff = chrono::Local::now().date_naive();

        let record = use_case.get_company(&register_number, cutoff).await?;
        Ok((to_json(&record)?, 1))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ToolError> {
    serde_json::to_string(value)
        .map_err(|e| ToolError::execution_failed(format!("Failed to serialize result: {}", e)))
}

#[async_trait]
impl ToolProvider for FirmenbuchProvider {
    fn id(&self) -> &str {
        "firmenbuch"
    }

    fn display_name(&self) -> &str {
        "Firmenbuch"
    }

    fn server_info(&self) -> ServerInfo {
        ServerInfo::new("Firmenbuch", "1.0.0")
    }

    async fn is_available(&self) -> bool {
        self.use_case.is_some()
    }

    async fn discover_tools(&self) -> Result<Vec<ToolDefinition>, ProviderError> {
        if self.use_case.is_none() {
            return Err(ProviderError::NotAvailable(
                "firmenbuch.api_key is not set".into(),
            ));
        }
        Ok(vec![find_company_definition(), get_company_definition()])
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let Some(use_case) = &self.use_case else {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::execution_failed("Company register is not configured (FIRMENBUCH_API_KEY)"),
            );
        };

        let start = Instant::now();
        let outcome = match call.tool_name.as_str() {
            FIND_COMPANY => Self::find_company(use_case, call).await,
            GET_COMPANY_BY_REGISTER_NUMBER => Self::get_company(use_case, call).await,
            other => {
                return ToolResult::failure(
                    other,
                    ToolError::not_found(format!("Tool not found: {}", other)),
                );
            }
        };
        let elapsed = start.elapsed().as_millis() as u64;

        match outcome {
            Ok((text, count)) => ToolResult::success(&call.tool_name, text)
                .with_match_count(count)
                .with_duration(elapsed),
            Err(e) => {
                warn!(tool = %call.tool_name, error = %e, "Register call failed");
                ToolResult::failure(&call.tool_name, e).with_duration(elapsed)
            }
        }
    }
}
