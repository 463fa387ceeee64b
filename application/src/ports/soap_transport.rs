//! SOAP transport port
//!
//! One POST of a complete envelope, answered with the raw response text.

use async_trait::async_trait;
use civic_domain::core::error::AdapterResult;

/// Port for sending SOAP envelopes
///
/// Implementations own endpoint, credentials and HTTP client. A response
/// with a non-success status but a body is still returned, since SOAP faults
/// travel that way; only unreachable upstreams and empty error responses
/// fail with `AdapterError::TransportFailure`.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    async fn send(&self, envelope: String, content_type: &str) -> AdapterResult<String>;
}
