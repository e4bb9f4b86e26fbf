//! Smoke test scenario definitions.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

/// HTTP method used by a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single request sent against the API under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub method: HttpMethod,
    /// Path appended to the base URL; may carry a query string.
    pub endpoint: String,
    #[serde(default, rename = "data", skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Scenario {
    /// Creates a scenario with no payload.
    pub fn new(name: impl Into<String>, method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            endpoint: endpoint.into(),
            payload: None,
        }
    }

    /// Sets the JSON payload sent as the request body.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Errors loading a scenario set.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Ordered, immutable list of scenarios for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    /// The personalization engine battery: four agent conversations followed
    /// by a profile lookup.
    ///
    /// Timestamps and the session id are derived from `now`.
    pub fn personalization(now: DateTime<Utc>) -> Self {
        let timestamp = now.to_rfc3339_opts(SecondsFormat::Micros, true);
        let session_id = format!("session-{}", now.timestamp());

        let agent = |name: &str, user_id: &str, text: &str| {
            Scenario::new(name, HttpMethod::Post, "agent").with_payload(json!({
                "userId": user_id,
                "input": {
                    "text": text,
                    "timestamp": timestamp,
                },
                "sessionId": session_id,
            }))
        };

        Self::new(vec![
            agent(
                "Test 1: First-time donor inquiry",
                "test-user-001",
                "I want to make my first donation to support cancer research. What would you recommend?",
            ),
            agent(
                "Test 2: Returning supporter",
                "test-user-002",
                "I donated £50 last year. How has my contribution helped?",
            ),
            agent(
                "Test 3: Event participation inquiry",
                "test-user-003",
                "I want to participate in Race for Life. What do I need to know?",
            ),
            agent(
                "Test 4: Personalized recommendation",
                "test-user-004",
                "Based on my interests in breast cancer research, what campaigns should I support?",
            ),
            Scenario::new(
                "Test 5: Get user profile",
                HttpMethod::Get,
                "profile?userId=test-user-001",
            ),
        ])
    }

    /// Parses a scenario set from YAML.
    ///
    /// ```yaml
    /// scenarios:
    ///   - name: Profile lookup
    ///     method: GET
    ///     endpoint: profile?userId=test-user-001
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, ScenarioError> {
        let set: Self = serde_yaml::from_str(content)?;
        debug!(scenarios = set.len(), "Scenario set parsed");
        Ok(set)
    }

    /// Loads a scenario set from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading scenarios from file");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.scenarios.iter()
    }
}

impl<'a> IntoIterator for &'a ScenarioSet {
    type Item = &'a Scenario;
    type IntoIter = std::slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenarios.iter()
    }
}
