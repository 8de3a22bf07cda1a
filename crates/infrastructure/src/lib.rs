//! APIProbe Infrastructure - Adapters
//!
//! This crate provides the concrete implementations behind the
//! application ports:
//! - `ReqwestHttpClient` for HTTP
//! - `ConsoleReporter` for progress output
//! - `SettingsLoader` for configuration
//! - tracing setup

pub mod adapters;
pub mod settings;
pub mod telemetry;

pub use adapters::{ConsoleReporter, ReqwestHttpClient};
pub use settings::{ConfigError, SettingsLoader};
pub use telemetry::init_tracing;
