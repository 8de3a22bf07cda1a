//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the probe and external systems.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod http_client;
mod reporter;

pub use http_client::{HttpClient, HttpClientError};
pub use reporter::ProbeReporter;
