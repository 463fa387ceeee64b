//! Infrastructure layer for civic-bridge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the SOAP transport and XML parser, the HTTP
//! adapters exposed as tools, and configuration file loading.

pub mod config;
pub mod http;
pub mod soap;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use soap::{QuickXmlParser, ReqwestSoapTransport};
pub use tools::{
    AdapterKind, FirmenbuchProvider, HueProvider, JsonSchemaToolConverter, KlimaaktivProvider,
    LinzProvider, ToolRegistry, build_provider, build_registry,
};
