//! Scenario identities, outcomes and the run summary.

use std::fmt;
use std::time::Duration;

/// The fixed, ordered scenarios a probe run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// GET `/api/` returns the greeting.
    RootEndpoint,
    /// POST `/api/status` creates a record.
    CreateStatusCheck,
    /// GET `/api/status` lists a freshly created record.
    ListStatusChecks,
    /// OPTIONS `/api/` reflects the request origin.
    CorsPreflight,
    /// GET `/api/nonexistent` returns 404.
    UnknownRoute,
    /// GET `/api/` is reachable from the configured base URL.
    Accessibility,
}

impl Scenario {
    /// All scenarios in execution order.
    pub const ALL: [Self; 6] = [
        Self::RootEndpoint,
        Self::CreateStatusCheck,
        Self::ListStatusChecks,
        Self::CorsPreflight,
        Self::UnknownRoute,
        Self::Accessibility,
    ];

    /// Stable identifier used in failure listings.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::RootEndpoint => "test_01_root_endpoint",
            Self::CreateStatusCheck => "test_02_post_status_check",
            Self::ListStatusChecks => "test_03_get_status_checks",
            Self::CorsPreflight => "test_04_cors_configuration",
            Self::UnknownRoute => "test_05_invalid_endpoint",
            Self::Accessibility => "test_06_backend_accessibility",
        }
    }

    /// Short human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::RootEndpoint => "Root endpoint",
            Self::CreateStatusCheck => "POST status check",
            Self::ListStatusChecks => "GET status checks",
            Self::CorsPreflight => "CORS configuration",
            Self::UnknownRoute => "Invalid endpoint",
            Self::Accessibility => "Backend accessibility",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// How a scenario ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    /// Every assertion held.
    Passed,
    /// A response arrived but did not match; one message per failed check.
    Failed {
        /// Human-readable failure messages.
        messages: Vec<String>,
    },
    /// No usable response (connection refused, timeout, ...).
    Errored {
        /// Transport error description.
        message: String,
    },
}

impl ScenarioOutcome {
    /// Returns true for [`ScenarioOutcome::Passed`].
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns true for [`ScenarioOutcome::Failed`].
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns true for [`ScenarioOutcome::Errored`].
    #[must_use]
    pub const fn is_errored(&self) -> bool {
        matches!(self, Self::Errored { .. })
    }
}

/// Result of one executed scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    /// Which scenario ran.
    pub scenario: Scenario,
    /// How it ended.
    pub outcome: ScenarioOutcome,
    /// Wall time spent in the scenario, requests included.
    pub elapsed: Duration,
}

impl ScenarioReport {
    /// Creates a report.
    #[must_use]
    pub const fn new(scenario: Scenario, outcome: ScenarioOutcome, elapsed: Duration) -> Self {
        Self {
            scenario,
            outcome,
            elapsed,
        }
    }
}

/// Aggregate counts for one probe run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Reports in execution order.
    pub reports: Vec<ScenarioReport>,
}

impl RunSummary {
    /// Creates an empty summary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reports: Vec::new(),
        }
    }

    /// Appends a finished scenario.
    pub fn record(&mut self, report: ScenarioReport) {
        self.reports.push(report);
    }

    /// Number of scenarios executed.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn tests_run(&self) -> usize {
        self.reports.len()
    }

    /// Number of scenarios that failed an assertion.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_failed()).count()
    }

    /// Number of scenarios that hit a transport error.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_errored()).count()
    }

    /// Returns true when nothing failed or errored.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.reports.iter().all(|r| r.outcome.is_passed())
    }

    /// Process exit code for this run: 0 when all passed, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.all_passed())
    }
}
