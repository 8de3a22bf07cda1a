//! Progress reporting port

use apiprobe_domain::{ProbeConfig, RunSummary, Scenario, ScenarioReport};

/// Receives progress notifications while a probe runs.
pub trait ProbeReporter {
    /// Called once before the first scenario.
    fn run_started(&mut self, _config: &ProbeConfig) {}

    /// Called before a scenario sends its first request.
    fn scenario_started(&mut self, _scenario: Scenario) {}

    /// Called when a scenario has finished.
    fn scenario_finished(&mut self, report: &ScenarioReport);

    /// Called once after the last scenario.
    fn run_finished(&mut self, summary: &RunSummary);
}
