//! Domain layer for civic-bridge
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Response normalization
//!
//! The company register answers with attribute-heavy SOAP/XML whose
//! cardinality varies per response. Parsed documents arrive as an
//! [`AttributedNode`] tree; the [`firmenbuch`] mapper turns them into flat,
//! stable records:
//!
//! - **Array normalizer**: `0..N` fields are only readable as sequences
//! - **Address variants**: street address or named place, never both
//! - **Person/function cross-reference**: functions partitioned by person key
//!
//! ## Tools
//!
//! Every upstream is exposed as tools ([`tool`]): a definition with typed,
//! optionally closed-vocabulary parameters, and a single text result.

pub mod core;
pub mod document;
pub mod firmenbuch;
pub mod funding;
pub mod lighting;
pub mod participation;
pub mod tool;

// Re-export commonly used types
pub use core::error::{AdapterError, AdapterResult, FieldProblem};
pub use core::vocabulary::Vocabulary;
pub use document::{AttributedNode, NodeValue, OneOrMany, Scalar, to_sequence};
pub use firmenbuch::{
    Address, BusinessRecord, CompanySearch, FunctionRecord, PersonRecord, RegisterNumber,
    SearchResultRecord, SoapRequest,
};
pub use funding::{Funding, FundingQuery};
pub use lighting::{Chromaticity, LightCommand, LightingError};
pub use participation::{ProposalQuery, ProposalRecord};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    provider::{ProviderError, ServerInfo, ToolProvider},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
