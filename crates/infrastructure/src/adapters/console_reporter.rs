//! Console reporter.
//!
//! Prints one line per finished scenario and a summary block, in the same
//! layout as a unittest text runner.

use std::fmt;
use std::io::{self, Write};

use apiprobe_application::ports::ProbeReporter;
use apiprobe_domain::{ProbeConfig, RunSummary, Scenario, ScenarioOutcome, ScenarioReport};
use tracing::warn;

/// Writes human-readable progress to any `Write` sink.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
    base_url: String,
}

impl ConsoleReporter<io::Stdout> {
    /// Reporter printing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            base_url: String::new(),
        }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(line).and_then(|()| self.out.write_all(b"\n")) {
            warn!(error = %e, "failed to write report line");
        }
    }

    fn passed_line(&self, scenario: Scenario) -> String {
        match scenario {
            Scenario::Accessibility => format!("✅ Backend is accessible from {}", self.base_url),
            Scenario::ListStatusChecks => {
                format!("✅ {} test passed\n✅ Data persistence verified", scenario.title())
            }
            other => format!("✅ {} test passed", other.title()),
        }
    }
}

impl<W: Write> ProbeReporter for ConsoleReporter<W> {
    fn run_started(&mut self, config: &ProbeConfig) {
        self.base_url = config.base_url().to_string();
        self.emit(format_args!("Starting backend API tests..."));
        self.emit(format_args!("Testing backend API at: {}", config.api_url()));
    }

    fn scenario_finished(&mut self, report: &ScenarioReport) {
        let title = report.scenario.title();
        match &report.outcome {
            ScenarioOutcome::Passed => {
                let line = self.passed_line(report.scenario);
                self.emit(format_args!("{line}"));
            }
            ScenarioOutcome::Failed { messages } => {
                self.emit(format_args!("❌ {title} test failed: {}", messages.join("; ")));
            }
            ScenarioOutcome::Errored { message } => {
                self.emit(format_args!("💥 {title} test errored: {message}"));
            }
        }
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        self.emit(format_args!("\n=== Test Summary ==="));
        self.emit(format_args!("Tests run: {}", summary.tests_run()));
        self.emit(format_args!("Errors: {}", summary.errors()));
        self.emit(format_args!("Failures: {}", summary.failures()));

        if summary.all_passed() {
            self.emit(format_args!("\n✅ All tests passed successfully!"));
            self.emit(format_args!("The backend API is working correctly."));
            return;
        }

        self.emit(format_args!("\n=== Test Failures ==="));
        for report in &summary.reports {
            match &report.outcome {
                ScenarioOutcome::Passed => {}
                ScenarioOutcome::Failed { messages } => {
                    for message in messages {
                        self.emit(format_args!("{}: {message}", report.scenario));
                    }
                }
                ScenarioOutcome::Errored { message } => {
                    self.emit(format_args!("{}: error: {message}", report.scenario));
                }
            }
        }
    }
}
