//! APIProbe - Main Entry Point
//!
//! Resolves the backend URL, runs the scenario list once and exits with
//! 0 when every scenario passed, 1 otherwise.

use std::process::ExitCode;
use std::sync::Arc;

use apiprobe_application::ProbeRunner;
use apiprobe_infrastructure::{ConsoleReporter, ReqwestHttpClient, SettingsLoader, init_tracing};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    // Configuration problems abort before any request is sent.
    let config = match SettingsLoader::new().load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match ReqwestHttpClient::new() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build HTTP client");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let runner = ProbeRunner::new(Arc::new(client), config);
    let summary = runner.run(&mut ConsoleReporter::stdout()).await;

    ExitCode::from(summary.exit_code())
}
