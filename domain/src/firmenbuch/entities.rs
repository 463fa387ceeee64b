//! Normalized registry records returned to tool callers.

use serde::Serialize;

use crate::document::Scalar;

/// A company extract (`AUSZUG_V2`) reduced to what a caller needs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRecord {
    pub name: String,
    pub legal_form: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_business: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub persons: Vec<PersonRecord>,
}

/// Registered business address.
///
/// The registry gives either a street with house number or a named place
/// (`STELLE`, e.g. a post office box location). The two shapes never mix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum Address {
    Street {
        street_name: String,
        street_number: Scalar,
        city: String,
        zip_code: Scalar,
    },
    Place {
        street_name: String,
        city: String,
        zip_code: Scalar,
    },
}

/// A person holding one or more functions in the company
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRecord {
    pub name: String,
    pub birthday: String,
    pub functions: Vec<FunctionRecord>,
}

/// A function (managing director, partner, authorised officer, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    pub name: String,
    pub note: String,
}

/// One hit of a free-text company search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultRecord {
    pub court: String,
    pub corporate_register_number: String,
    pub legal_form: String,
    pub name: String,
    pub place_of_business: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}
