//! reqwest-backed SOAP transport

use async_trait::async_trait;
use civic_application::ports::soap_transport::SoapTransport;
use civic_domain::core::error::{AdapterError, AdapterResult};
use civic_domain::tool::provider::ProviderError;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::config::{FileFirmenbuchConfig, FileHttpConfig};
use crate::http::{build_client, transport_failure};

/// Header carrying the register API key
const API_KEY_HEADER: &str = "X-API-KEY";

/// Posts envelopes to the register endpoint.
///
/// SOAP faults arrive with an error status and a fault body; those bodies are
/// handed back so the envelope codec can report the fault reason. Only an
/// error status without a body counts as a transport failure.
pub struct ReqwestSoapTransport {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ReqwestSoapTransport {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(
        config: &FileFirmenbuchConfig,
        http: &FileHttpConfig,
    ) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ProviderError::NotAvailable("firmenbuch.api_key is not set".into()))?;

        Ok(Self::new(build_client(http)?, config.endpoint.clone(), api_key))
    }
}

#[async_trait]
impl SoapTransport for ReqwestSoapTransport {
    async fn send(&self, envelope: String, content_type: &str) -> AdapterResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, content_type)
            .header(API_KEY_HEADER, &self.api_key)
            .body(envelope)
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_failure)?;
        debug!(%status, bytes = body.len(), "Register responded");

        if !status.is_success() && body.trim().is_empty() {
            return Err(AdapterError::TransportFailure(format!(
                "HTTP {} without response body",
                status
            )));
        }
        Ok(body)
    }
}
