//! APIProbe Application - Scenarios and ports
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP client, progress reporter)
//! - Assertion evaluation against responses
//! - The ordered backend scenarios and their runner

pub mod error;
pub mod ports;
pub mod probe;
pub mod testing;

pub use error::{StepError, StepResult};
pub use ports::{HttpClient, HttpClientError, ProbeReporter};
pub use probe::{DEFAULT_CLIENT_NAME, DEFAULT_ORIGIN, ProbeRunner};
pub use testing::AssertionRunner;
