//! Probe runner.
//!
//! Executes the fixed scenario list against a backend, one request at a
//! time, and collects a [`RunSummary`]. Each scenario is also exposed as
//! its own method so it can be driven and tested in isolation.

use std::sync::Arc;
use std::time::Instant;

use apiprobe_domain::request::{RequestBody, RequestSpec};
use apiprobe_domain::response::ResponseSpec;
use apiprobe_domain::{
    Assertion, ProbeConfig, RunSummary, Scenario, ScenarioOutcome, ScenarioReport, StatusCheck,
    StatusCheckCreate,
};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{StepError, StepResult};
use crate::ports::{HttpClient, ProbeReporter};
use crate::testing::AssertionRunner;

/// Client name sent when creating status checks.
pub const DEFAULT_CLIENT_NAME: &str = "BitSafe Test Client";

/// Origin sent with the CORS preflight request.
pub const DEFAULT_ORIGIN: &str = "http://example.com";

const GREETING: &str = "Hello World";

/// Runs the backend scenarios in their declared order.
///
/// # Example
///
/// ```ignore
/// let config = ProbeConfig::new("https://backend.example.com")?;
/// let runner = ProbeRunner::new(Arc::new(ReqwestHttpClient::new()?), config);
/// let summary = runner.run(&mut ConsoleReporter::stdout()).await;
/// std::process::exit(summary.exit_code().into());
/// ```
pub struct ProbeRunner<C: HttpClient> {
    client: Arc<C>,
    config: ProbeConfig,
    client_name: String,
    origin: String,
    assertions: AssertionRunner,
}

impl<C: HttpClient> ProbeRunner<C> {
    /// Creates a runner targeting the configured backend.
    pub fn new(client: Arc<C>, config: ProbeConfig) -> Self {
        Self {
            client,
            config,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            assertions: AssertionRunner::new(),
        }
    }

    /// Sets the client name used for created status checks.
    #[must_use]
    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    /// Sets the origin sent with the CORS preflight.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Runs every scenario in order and returns the summary.
    ///
    /// Failures and transport errors are recorded; the run always
    /// continues to the last scenario.
    pub async fn run<R: ProbeReporter + ?Sized>(&self, reporter: &mut R) -> RunSummary {
        info!(api = %self.config.api_url(), "starting probe run");
        reporter.run_started(&self.config);

        let mut summary = RunSummary::new();
        for scenario in Scenario::ALL {
            reporter.scenario_started(scenario);
            let started = Instant::now();
            let outcome = self.execute(scenario).await;
            let report = ScenarioReport::new(scenario, outcome, started.elapsed());
            info!(
                scenario = %scenario,
                passed = report.outcome.is_passed(),
                elapsed = ?report.elapsed,
                "scenario finished"
            );
            reporter.scenario_finished(&report);
            summary.record(report);
        }

        info!(
            tests_run = summary.tests_run(),
            failures = summary.failures(),
            errors = summary.errors(),
            "probe run finished"
        );
        reporter.run_finished(&summary);
        summary
    }

    /// Runs a single scenario and classifies the result.
    pub async fn execute(&self, scenario: Scenario) -> ScenarioOutcome {
        debug!(scenario = %scenario, "running scenario");
        let result = match scenario {
            Scenario::RootEndpoint => self.health_check().await,
            Scenario::CreateStatusCheck => self.create_status_check().await.map(|_| ()),
            Scenario::ListStatusChecks => self.verify_persistence().await,
            Scenario::CorsPreflight => self.cors_preflight().await,
            Scenario::UnknownRoute => self.unknown_route().await,
            Scenario::Accessibility => self.accessibility().await,
        };

        match result {
            Ok(()) => ScenarioOutcome::Passed,
            Err(StepError::Failed(messages)) => ScenarioOutcome::Failed { messages },
            Err(StepError::Transport(e)) => ScenarioOutcome::Errored {
                message: e.to_string(),
            },
        }
    }

    /// GET `{api}/` answers 200 with the greeting message.
    ///
    /// # Errors
    ///
    /// Returns a failure on any other status or payload.
    pub async fn health_check(&self) -> StepResult<()> {
        self.send(
            RequestSpec::get(self.config.endpoint("/")),
            &[
                Assertion::status(200),
                Assertion::json_equals("$.message", GREETING),
            ],
        )
        .await
        .map(drop)
    }

    /// POST `{api}/status` creates a record and echoes it back.
    ///
    /// Returns the created record so a dependent step can look it up. The
    /// `id` and `timestamp` keep whatever JSON type the backend used.
    ///
    /// # Errors
    ///
    /// Returns a failure if the status is not 200, the echoed name differs,
    /// or `id`/`timestamp` are missing or empty.
    pub async fn create_status_check(&self) -> StepResult<StatusCheck> {
        let body = RequestBody::from_serializable(&StatusCheckCreate::new(&self.client_name))
            .map_err(|e| StepError::failed(e.to_string()))?;

        let response = self
            .send(
                RequestSpec::post(self.config.endpoint("/status"), body),
                &[
                    Assertion::status(200),
                    Assertion::json_equals("$.client_name", self.client_name.as_str()),
                    Assertion::json_not_empty("$.id"),
                    Assertion::json_not_empty("$.timestamp"),
                ],
            )
            .await?;

        let created: StatusCheck = serde_json::from_str(&response.body)
            .map_err(|e| StepError::failed(format!("Unexpected status check payload: {e}")))?;
        debug!(id = %created.id, "status check created");
        Ok(created)
    }

    /// GET `{api}/status` lists an entry matching `created`.
    ///
    /// # Errors
    ///
    /// Returns a failure if the list is not a JSON array or holds no entry
    /// with the same `id` and `client_name`.
    pub async fn list_status_checks(&self, created: &StatusCheck) -> StepResult<()> {
        let mut expected = Map::new();
        expected.insert(
            "client_name".to_string(),
            Value::String(created.client_name.clone()),
        );

        self.send(
            RequestSpec::get(self.config.endpoint("/status")),
            &[
                Assertion::status(200),
                Assertion::IsJsonArray,
                Assertion::ArrayEntry {
                    key: "id".to_string(),
                    value: created.id.clone(),
                    expected,
                },
            ],
        )
        .await
        .map(drop)
    }

    /// Creates a fresh record, then checks the list endpoint returns it.
    ///
    /// # Errors
    ///
    /// Returns the first step's error if creation fails, otherwise the
    /// listing's.
    pub async fn verify_persistence(&self) -> StepResult<()> {
        let created = self.create_status_check().await?;
        self.list_status_checks(&created).await
    }

    /// OPTIONS `{api}/` reflects the request origin and lists allowed
    /// methods and headers.
    ///
    /// # Errors
    ///
    /// Returns a failure on a non-200 status, a wildcard or foreign
    /// `Access-Control-Allow-Origin`, or a missing allow header.
    pub async fn cors_preflight(&self) -> StepResult<()> {
        let request = RequestSpec::options(self.config.endpoint("/"))
            .with_header("Origin", self.origin.as_str())
            .with_header("Access-Control-Request-Method", "GET")
            .with_header("Access-Control-Request-Headers", "Content-Type");

        self.send(
            request,
            &[
                Assertion::status(200),
                Assertion::header_equals("Access-Control-Allow-Origin", self.origin.as_str()),
                Assertion::header_present("Access-Control-Allow-Methods"),
                Assertion::header_present("Access-Control-Allow-Headers"),
            ],
        )
        .await
        .map(drop)
    }

    /// GET `{api}/nonexistent` answers 404.
    ///
    /// # Errors
    ///
    /// Returns a failure for any other status.
    pub async fn unknown_route(&self) -> StepResult<()> {
        self.send(
            RequestSpec::get(self.config.endpoint("/nonexistent")),
            &[Assertion::status(404)],
        )
        .await
        .map(drop)
    }

    /// GET `{api}/` answers 200 through the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns a failure for any other status.
    pub async fn accessibility(&self) -> StepResult<()> {
        self.send(
            RequestSpec::get(self.config.endpoint("/")),
            &[Assertion::status(200)],
        )
        .await
        .map(drop)
    }

    /// Sends a request and checks every assertion against the response.
    async fn send(&self, request: RequestSpec, assertions: &[Assertion]) -> StepResult<ResponseSpec> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.client.execute(&request).await.map_err(|e| {
            warn!(method = %request.method, url = %request.url, error = %e, "request failed");
            StepError::Transport(e)
        })?;
        debug!(
            status = response.status,
            duration = %response.duration_display(),
            "response received"
        );

        let failures: Vec<String> = self
            .assertions
            .run(assertions, &response)
            .iter()
            .filter(|result| !result.passed)
            .map(apiprobe_domain::AssertionResult::message)
            .collect();

        if failures.is_empty() {
            Ok(response)
        } else {
            Err(StepError::Failed(failures))
        }
    }
}
