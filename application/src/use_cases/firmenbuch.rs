//! Company register use case.
//!
//! Drives one registry round trip:
//! Request Builder → Envelope Codec → Transport → Parser → Envelope Codec →
//! Record Mapper. Every step is fallible and nothing is retried.

use crate::ports::document_parser::DocumentParser;
use crate::ports::soap_transport::SoapTransport;
use chrono::NaiveDate;
use civic_domain::core::error::AdapterResult;
use civic_domain::document::AttributedNode;
use civic_domain::firmenbuch::{
    BusinessRecord, CompanySearch, RegisterNumber, SOAP_CONTENT_TYPE, SearchResultRecord,
    SoapRequest, build_extract_request, build_search_request, map_business_record,
    map_search_results, unwrap, wrap,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Use case for company lookups in the register.
#[derive(Clone)]
pub struct FirmenbuchUseCase {
    transport: Arc<dyn SoapTransport>,
    parser: Arc<dyn DocumentParser>,
}

impl FirmenbuchUseCase {
    pub fn new(transport: Arc<dyn SoapTransport>, parser: Arc<dyn DocumentParser>) -> Self {
        Self { transport, parser }
    }

    /// Fetch the short extract of one company as of `cutoff`.
    pub async fn get_company(
        &self,
        register_number: &RegisterNumber,
        cutoff: NaiveDate,
    ) -> AdapterResult<BusinessRecord> {
        info!(register_number = %register_number, %cutoff, "Fetching company extract");

        let request = build_extract_request(register_number, cutoff);
        let document = self.round_trip(&request).await?;
        let record = map_business_record(unwrap(&document)?)?;

        debug!(
            name = %record.name,
            persons = record.persons.len(),
            "Company extract mapped"
        );
        Ok(record)
    }

    /// Search companies by (part of) their registered name.
    pub async fn find_company(&self, search: &CompanySearch) -> AdapterResult<Vec<SearchResultRecord>> {
        info!(name = search.name(), exact = search.is_exact(), "Searching companies");

        let request = build_search_request(search);
        let document = self.round_trip(&request).await?;
        let results = map_search_results(unwrap(&document)?)?;

        debug!(hits = results.len(), "Company search mapped");
        Ok(results)
    }

    async fn round_trip(&self, request: &SoapRequest) -> AdapterResult<AttributedNode> {
        let envelope = wrap(&request.body, request.namespace);
        debug!(namespace = request.namespace, bytes = envelope.len(), "Sending envelope");

        let raw = self.transport.send(envelope, SOAP_CONTENT_TYPE).await?;
        debug!(bytes = raw.len(), "Received response");

        self.parser.parse(&raw)
    }
}
