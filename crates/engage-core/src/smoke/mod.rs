//! HTTP smoke testing against a deployed API.

mod outcome;
mod report;
pub mod request;
pub mod scenario;
pub mod smoke_runner;

pub use outcome::Outcome;
pub use report::TROUBLESHOOTING_STEPS;
pub use request::{ResponseBody, ResponseRecord, TRANSPORT_FAILURE_STATUS, request_url, send_request};
pub use scenario::{HttpMethod, Scenario, ScenarioError, ScenarioSet};
pub use smoke_runner::{
    DEFAULT_BASE_URL, INTER_SCENARIO_DELAY, REQUEST_TIMEOUT, ScenarioReport, SmokeConfig,
    SmokeRunner, SmokeSummary, SmokeTestError,
};
