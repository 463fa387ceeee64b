//! Domain error types

use std::fmt;

use thiserror::Error;

/// Result alias for adapter operations
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Errors raised while building requests for, or normalizing responses from,
/// an upstream service.
///
/// None of these are retried. Every variant ends the current tool
/// invocation with a single descriptive text result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The response envelope lacks its wrapper structure (or is not XML at all)
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The upstream answered with a SOAP fault instead of a payload
    #[error("Upstream fault: {0}")]
    UpstreamFault(String),

    /// A business field in an otherwise valid envelope is absent, repeated
    /// where one value is expected, or unreadable
    #[error("Malformed upstream response: {problem} '{path}'")]
    MalformedUpstreamResponse { path: String, problem: FieldProblem },

    /// Network or HTTP failure reported by the transport
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// Caller-supplied value failed shape validation
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// What is wrong with a field of an upstream response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    Repeated,
    InvalidValue,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Missing => write!(f, "missing required field"),
            FieldProblem::Repeated => write!(f, "repeated single-valued field"),
            FieldProblem::InvalidValue => write!(f, "invalid value in field"),
        }
    }
}

impl AdapterError {
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MalformedUpstreamResponse {
            path: path.into(),
            problem: FieldProblem::Missing,
        }
    }

    pub fn repeated(path: impl Into<String>) -> Self {
        Self::MalformedUpstreamResponse {
            path: path.into(),
            problem: FieldProblem::Repeated,
        }
    }

    pub fn invalid_value(path: impl Into<String>) -> Self {
        Self::MalformedUpstreamResponse {
            path: path.into(),
            problem: FieldProblem::InvalidValue,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Whether the caller (rather than the upstream) is at fault
    pub fn is_caller_error(&self) -> bool {
        matches!(self, AdapterError::InvalidParameter(_))
    }
}
