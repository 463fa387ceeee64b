//! Request builder for registry operations.
//!
//! Produces the inner request fragment plus the namespace it belongs to; the
//! envelope codec wraps both. Caller text is XML-escaped before it is
//! embedded.

use chrono::NaiveDate;
use quick_xml::escape::escape;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::dates::to_date_string;
use crate::core::error::{AdapterError, AdapterResult};

/// Namespace of the company extract request
pub const EXTRACT_NAMESPACE: &str = "ns://firmenbuch.justiz.gv.at/Abfrage/v2/AuszugRequest";

/// Namespace of the company search request
pub const SEARCH_NAMESPACE: &str = "ns://firmenbuch.justiz.gv.at/Abfrage/SucheFirmaRequest";

static REGISTER_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+[a-z]$").expect("register number pattern is valid")
});

/// A validated corporate register number ("Firmenbuchnummer").
///
/// Digits followed by one lowercase check letter, e.g. `123456a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterNumber(String);

impl RegisterNumber {
    /// Validate a caller-supplied register number.
    ///
    /// Surrounding whitespace is ignored; nothing else is coerced, so `FN
    /// 123456a` or `123456A` are rejected rather than guessed at.
    pub fn parse(raw: &str) -> AdapterResult<Self> {
        let trimmed = raw.trim();
        if REGISTER_NUMBER.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(AdapterError::invalid(format!(
                "'{}' is not a corporate register number (expected digits followed by one lowercase letter, e.g. 123456a)",
                raw
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegisterNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text company search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySearch {
    name: String,
    exact: bool,
}

impl CompanySearch {
    pub fn new(name: &str) -> AdapterResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AdapterError::invalid("company name must not be empty"));
        }
        Ok(Self {
            name: name.to_string(),
            exact: false,
        })
    }

    /// Require the registered wording to match exactly
    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }
}

/// An inner request fragment with its namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapRequest {
    pub body: String,
    pub namespace: &'static str,
}

/// Build the `AUSZUG_V2_REQUEST` fragment (short company extract)
pub fn build_extract_request(register_number: &RegisterNumber, cutoff: NaiveDate) -> SoapRequest {
    let mut body = String::from("<AUSZUG_V2_REQUEST>");
    body.push_str(&format!("<FNR>{}</FNR>", escape(register_number.as_str())));
    body.push_str(&format!("<STICHTAG>{}</STICHTAG>", to_date_string(cutoff)));
    body.push_str("<UMFANG>Kurzinformation</UMFANG>");
    body.push_str("</AUSZUG_V2_REQUEST>");

    SoapRequest {
        body,
        namespace: EXTRACT_NAMESPACE,
    }
}

/// Build the `SUCHEFIRMAREQUEST` fragment (search by company wording)
pub fn build_search_request(search: &CompanySearch) -> SoapRequest {
    let mut body = String::from("<SUCHEFIRMAREQUEST>");
    body.push_str(&format!(
        "<FIRMENWORTLAUT>{}</FIRMENWORTLAUT>",
        escape(search.name())
    ));
    body.push_str(&format!("<EXAKTESUCHE>{}</EXAKTESUCHE>", search.is_exact()));
    body.push_str("<SUCHBEREICH>1</SUCHBEREICH>");
    body.push_str("<GERICHT></GERICHT>");
    body.push_str("<RECHTSFORM></RECHTSFORM>");
    body.push_str("<RECHTSEIGENSCHAFT></RECHTSEIGENSCHAFT>");
    body.push_str("<ORTNR></ORTNR>");
    body.push_str("</SUCHEFIRMAREQUEST>");

    SoapRequest {
        body,
        namespace: SEARCH_NAMESPACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_number_accepts_digits_and_letter() {
        assert_eq!(RegisterNumber::parse("123456a").unwrap().as_str(), "123456a");
        assert_eq!(RegisterNumber::parse("  54321x ").unwrap().as_str(), "54321x");
    }

    #[test]
    fn test_register_number_rejects_other_shapes() {
        for raw in ["", "123456", "abc", "123456A", "FN 123456a", "12 3456a", "123456ab"] {
            let err = RegisterNumber::parse(raw).unwrap_err();
            assert!(err.is_caller_error(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_extract_request() {
        let number = RegisterNumber::parse("123456a").unwrap();
        let cutoff = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let request = build_extract_request(&number, cutoff);

        assert_eq!(request.namespace, EXTRACT_NAMESPACE);
        assert_eq!(
            request.body,
            "<AUSZUG_V2_REQUEST><FNR>123456a</FNR><STICHTAG>2024-05-01</STICHTAG>\
             <UMFANG>Kurzinformation</UMFANG></AUSZUG_V2_REQUEST>"
        );
    }

    #[test]
    fn test_search_request() {
        let search = CompanySearch::new("Muster").unwrap();
        let request = build_search_request(&search);

        assert_eq!(request.namespace, SEARCH_NAMESPACE);
        assert!(request.body.starts_with("<SUCHEFIRMAREQUEST><FIRMENWORTLAUT>Muster</FIRMENWORTLAUT>"));
        assert!(request.body.contains("<EXAKTESUCHE>false</EXAKTESUCHE>"));
        assert!(request.body.contains("<SUCHBEREICH>1</SUCHBEREICH>"));
        assert!(request.body.contains("<ORTNR></ORTNR>"));
        assert!(request.body.ends_with("</SUCHEFIRMAREQUEST>"));
    }

    #[test]
    fn test_search_request_exact() {
        let search = CompanySearch::new("Muster GmbH").unwrap().exact(true);
        let request = build_search_request(&search);
        assert!(request.body.contains("<EXAKTESUCHE>true</EXAKTESUCHE>"));
    }

    #[test]
    fn test_search_request_escapes_caller_text() {
        let search = CompanySearch::new("A&B</FIRMENWORTLAUT><GERICHT>x").unwrap();
        let request = build_search_request(&search);

        assert!(request.body.contains(
            "<FIRMENWORTLAUT>A&amp;B&lt;/FIRMENWORTLAUT&gt;&lt;GERICHT&gt;x</FIRMENWORTLAUT>"
        ));
        assert_eq!(request.body.matches("<GERICHT>").count(), 1);
    }

    #[test]
    fn test_search_rejects_blank_name() {
        assert!(CompanySearch::new("   ").is_err());
        assert_eq!(CompanySearch::new(" Muster ").unwrap().name(), "Muster");
    }
}
