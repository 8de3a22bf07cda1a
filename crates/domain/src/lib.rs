//! APIProbe Domain - Core types
//!
//! This crate defines the domain model for the APIProbe backend test
//! runner. All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod scenario;
pub mod status_check;
pub mod testing;

pub use config::ProbeConfig;
pub use error::{DomainError, DomainResult};
pub use scenario::{RunSummary, Scenario, ScenarioOutcome, ScenarioReport};
pub use status_check::{StatusCheck, StatusCheckCreate};
pub use testing::{Assertion, AssertionResult};
