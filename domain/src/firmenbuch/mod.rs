//! Austrian company register ("Firmenbuch") over SOAP 1.2.
//!
//! Pure building blocks only: request fragments, the envelope codec, date
//! codecs and the mapper from parsed responses to normalized records. The
//! network round trip lives behind the application layer's transport port.

pub mod dates;
pub mod entities;
pub mod envelope;
pub mod mapper;
pub mod request;

pub use dates::{decode_packed_date, to_date_string};
pub use entities::{Address, BusinessRecord, FunctionRecord, PersonRecord, SearchResultRecord};
pub use envelope::{SOAP_CONTENT_TYPE, SOAP_ENVELOPE_NS, unwrap, wrap};
pub use mapper::{EXTRACT_RESPONSE, SEARCH_RESPONSE, map_business_record, map_search_results};
pub use request::{
    CompanySearch, EXTRACT_NAMESPACE, RegisterNumber, SEARCH_NAMESPACE, SoapRequest,
    build_extract_request, build_search_request,
};
