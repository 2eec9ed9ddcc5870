//! Blocking client for the DNS.com management API.
//!
//! # Overview
//! Every operation builds a path + query string, sends one HTTP GET through a
//! [`Transport`] and parses the JSON body into a [`serde_json::Value`]. There
//! is no state between calls beyond the [`ClientConfig`].
//!
//! # Design
//! - `DnsClient::execute` is the single request path. It never panics and
//!   never lets a failure escape as anything but an [`ApiError`].
//! - Statuses 200..=220 and 403 carry a JSON body worth parsing; everything
//!   else is reported as `response has code '<code>'.`.
//! - Endpoint functions live in [`api`], one module per area, and take the
//!   client as their first argument.
//! - The transport is a trait so the executor runs against an in-memory fake
//!   in tests and against `ureq` in production.
//!
//! ```no_run
//! use dnsapi_core::{api::domains, ClientConfig, DnsClient};
//!
//! let client = DnsClient::new(ClientConfig::production("XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX"));
//! match domains::get_domains(&client, "") {
//!     Ok(doc) => println!("{}", doc["data"]),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod log_sanitizer;
pub mod query;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::{classify_response, into_document, is_accepted_status, ApiResult, DnsClient};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, ErrorEnvelope, TransportError};
pub use http::{HttpRequest, HttpResponse, Transport};
pub use query::Query;
pub use transport::UreqTransport;
pub use types::{
    DomainMode, GeoTarget, ListParams, NewDomain, NewDomainGroup, PrimaryWildcard, RecordOptions,
    RecordSpec, RecordTarget, RecordType, RecordUpdate, SortDirection, WildcardType, ZoneDefaults,
};
