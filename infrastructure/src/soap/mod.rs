//! SOAP adapters for the company register
//!
//! Implements the application layer's [`SoapTransport`] and
//! [`DocumentParser`] ports.
//!
//! [`SoapTransport`]: civic_application::ports::soap_transport::SoapTransport
//! [`DocumentParser`]: civic_application::ports::document_parser::DocumentParser

pub mod transport;
pub mod xml;

pub use transport::ReqwestSoapTransport;
pub use xml::QuickXmlParser;
