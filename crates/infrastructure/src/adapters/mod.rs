//! Adapters implementing the application ports.

mod console_reporter;
mod reqwest_client;

pub use console_reporter::ConsoleReporter;
pub use reqwest_client::ReqwestHttpClient;
