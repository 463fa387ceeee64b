//! Document parser port

use civic_domain::core::error::AdapterResult;
use civic_domain::document::AttributedNode;

/// Port for turning raw response text into an attributed document.
///
/// Namespace prefixes must be stripped and attributes preserved under the
/// `@_` prefix. Text that is not well-formed fails with
/// `AdapterError::MalformedEnvelope`.
pub trait DocumentParser: Send + Sync {
    fn parse(&self, raw: &str) -> AdapterResult<AttributedNode>;
}
