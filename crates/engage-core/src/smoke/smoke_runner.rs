//! Smoke test runner for a deployed personalization API.
//!
//! Sends each scenario in order, prints a diagnostic block per response and
//! pauses one second between requests. Failed requests are reported, never
//! retried, and never stop the run.
//!
//! # Example
//!
//! ```ignore
//! use engage_core::smoke::{SmokeConfig, SmokeRunner};
//!
//! let config = SmokeConfig::new("http://localhost:3000/prod/");
//! let summary = SmokeRunner::run(&config, &mut std::io::stdout()).await?;
//! println!("{} of {} passed", summary.passed(), summary.len());
//! ```

use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info};

use super::outcome::Outcome;
use super::report;
use super::request::{self, send_request};
use super::scenario::{Scenario, ScenarioSet};

/// Staging deployment targeted when no base URL is given.
pub const DEFAULT_BASE_URL: &str = "https://y55nn7iac9.execute-api.us-west-2.amazonaws.com/prod/";

/// Client-side timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause between consecutive scenarios.
pub const INTER_SCENARIO_DELAY: Duration = Duration::from_secs(1);

/// Configuration for a smoke test run.
#[derive(Debug, Clone)]
pub struct SmokeConfig {
    /// Prefix every scenario endpoint is appended to.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Scenarios, run in order.
    pub scenarios: ScenarioSet,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SmokeConfig {
    /// Creates a configuration running the personalization scenarios against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: REQUEST_TIMEOUT,
            scenarios: ScenarioSet::personalization(Utc::now()),
        }
    }

    /// Replaces the scenario set.
    pub fn with_scenarios(mut self, scenarios: ScenarioSet) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL requested for `scenario`.
    pub fn request_url(&self, scenario: &Scenario) -> String {
        request::request_url(&self.base_url, &scenario.endpoint)
    }
}

/// Per-scenario line of a run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub name: String,
    pub status_code: u16,
    pub outcome: Outcome,
}

/// Result of a smoke test run.
#[derive(Debug, Clone, Default)]
pub struct SmokeSummary {
    reports: Vec<ScenarioReport>,
}

impl SmokeSummary {
    /// Reports in execution order.
    pub fn reports(&self) -> &[ScenarioReport] {
        &self.reports
    }

    /// Number of scenarios that returned 200.
    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_pass()).count()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Errors that abort a smoke test run.
#[derive(Debug, thiserror::Error)]
pub enum SmokeTestError {
    /// The base URL and endpoint do not form a valid URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be built or the request could not be constructed.
    #[error("HTTP client error: {0}")]
    Request(#[from] reqwest::Error),

    /// Payload or response could not be rendered as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The smoke test runner.
pub struct SmokeRunner;

impl SmokeRunner {
    /// Runs every scenario in `config` and writes the report to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP client cannot be created
    /// - A scenario URL is invalid
    /// - The report cannot be written
    pub async fn run<W: Write>(
        config: &SmokeConfig,
        out: &mut W,
    ) -> Result<SmokeSummary, SmokeTestError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        info!(
            base_url = %config.base_url,
            scenarios = config.scenarios.len(),
            "Starting smoke test run"
        );
        report::write_header(out, &config.base_url)?;

        let mut summary = SmokeSummary::default();
        let total = config.scenarios.len();

        for (index, scenario) in config.scenarios.iter().enumerate() {
            report::write_request(out, scenario)?;

            let record = send_request(&client, &config.base_url, scenario).await?;
            let outcome = report::write_response(out, &record)?;

            debug!(
                scenario = %scenario.name,
                status = record.status_code,
                ?outcome,
                "Scenario finished"
            );
            summary.reports.push(ScenarioReport {
                name: scenario.name.clone(),
                status_code: record.status_code,
                outcome,
            });

            if index + 1 < total {
                tokio::time::sleep(INTER_SCENARIO_DELAY).await;
            }
        }

        report::write_footer(out)?;
        info!(
            passed = summary.passed(),
            total = summary.len(),
            "Smoke test run complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoke::scenario::HttpMethod;

    #[test]
    fn test_default_config_uses_staging_url() {
        let config = SmokeConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.scenarios.len(), 5);
    }

    #[test]
    fn test_default_request_urls() {
        let config = SmokeConfig::default();
        let urls: Vec<_> = config.scenarios.iter().map(|s| config.request_url(s)).collect();

        assert_eq!(
            urls[0],
            "https://y55nn7iac9.execute-api.us-west-2.amazonaws.com/prod/agent"
        );
        assert_eq!(
            urls[4],
            "https://y55nn7iac9.execute-api.us-west-2.amazonaws.com/prod/profile?userId=test-user-001"
        );
    }

    #[test]
    fn test_config_builder_pattern() {
        let scenarios = ScenarioSet::new(vec![Scenario::new("only", HttpMethod::Get, "health")]);
        let config = SmokeConfig::new("http://127.0.0.1:9/")
            .with_scenarios(scenarios.clone())
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://127.0.0.1:9/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.scenarios, scenarios);
    }

    #[test]
    fn test_summary_counts_passes() {
        let summary = SmokeSummary {
            reports: vec![
                ScenarioReport {
                    name: "a".into(),
                    status_code: 200,
                    outcome: Outcome::Success,
                },
                ScenarioReport {
                    name: "b".into(),
                    status_code: 503,
                    outcome: Outcome::ServiceUnavailable,
                },
            ],
        };
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.passed(), 1);
        assert!(!summary.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_aborts_run() {
        let config = SmokeConfig::new("not a url/")
            .with_scenarios(ScenarioSet::new(vec![Scenario::new("x", HttpMethod::Get, "agent")]));
        let mut out = Vec::new();

        let err = SmokeRunner::run(&config, &mut out).await.unwrap_err();
        assert!(matches!(err, SmokeTestError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_empty_scenario_set_prints_header_and_footer() {
        let config = SmokeConfig::new("http://127.0.0.1:9/").with_scenarios(ScenarioSet::default());
        let mut out = Vec::new();

        let summary = SmokeRunner::run(&config, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(summary.is_empty());
        assert!(text.contains("API URL: http://127.0.0.1:9/"));
        assert!(text.contains("✅ All tests completed!"));
    }
}
