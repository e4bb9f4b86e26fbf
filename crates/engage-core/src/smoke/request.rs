//! Single-request execution against the API under test.
//!
//! Every HTTP status, including 4xx and 5xx, comes back as a [`ResponseRecord`].
//! Transport failures become a record with status `0`. Only problems with the
//! request itself (bad URL, unserializable payload) are errors.

use std::fmt;
use std::time::Instant;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use super::scenario::Scenario;
use super::smoke_runner::SmokeTestError;

/// Status code recorded when no HTTP response was received.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// Body of a response as it will be displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Parsed JSON; `Null` for an empty body.
    Json(Value),
    /// Raw text, used for error responses and non-JSON success bodies.
    Text(String),
}

impl ResponseBody {
    /// Renders the body with two-space JSON indentation; text is returned as-is.
    pub fn pretty(&self) -> Result<String, serde_json::Error> {
        match self {
            ResponseBody::Json(value) => pretty_json(value),
            ResponseBody::Text(text) => Ok(text.clone()),
        }
    }
}

/// Two-space indented JSON with every non-ASCII character written as a
/// `\uXXXX` escape (UTF-16 surrogate pairs above the BMP).
pub fn pretty_json(value: &Value) -> Result<String, serde_json::Error> {
    let pretty = serde_json::to_string_pretty(value)?;
    if pretty.is_ascii() {
        return Ok(pretty);
    }

    // Non-ASCII can only occur inside string literals, so escaping the
    // rendered text is equivalent to escaping during serialization.
    let mut escaped = String::with_capacity(pretty.len() + 16);
    for c in pretty.chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                escaped.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    Ok(escaped)
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{value}"),
            ResponseBody::Text(text) => f.write_str(text),
        }
    }
}

/// Result of one scenario request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    /// HTTP status, or [`TRANSPORT_FAILURE_STATUS`].
    pub status_code: u16,
    pub body: ResponseBody,
    /// Wall-clock time from dispatch to end of body read. Zero on transport failure.
    pub elapsed_ms: f64,
    pub error: Option<String>,
}

impl ResponseRecord {
    fn transport_failure(err: &reqwest::Error) -> Self {
        Self {
            status_code: TRANSPORT_FAILURE_STATUS,
            body: ResponseBody::Json(Value::Null),
            elapsed_ms: 0.0,
            error: Some(error_chain(err)),
        }
    }

    fn from_status(status: StatusCode, raw: &[u8], elapsed_ms: f64) -> Self {
        let text = String::from_utf8_lossy(raw).into_owned();

        if status.is_success() {
            let body = if text.is_empty() {
                ResponseBody::Json(Value::Null)
            } else {
                match serde_json::from_str(&text) {
                    Ok(value) => ResponseBody::Json(value),
                    Err(e) => {
                        debug!(error = %e, "Success body is not JSON, keeping raw text");
                        ResponseBody::Text(text)
                    }
                }
            };
            return Self {
                status_code: status.as_u16(),
                body,
                elapsed_ms,
                error: None,
            };
        }

        Self {
            status_code: status.as_u16(),
            body: ResponseBody::Text(text),
            elapsed_ms,
            error: Some(format!(
                "HTTP Error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )),
        }
    }
}

/// Joins `base_url` and `endpoint` by plain concatenation.
pub fn request_url(base_url: &str, endpoint: &str) -> String {
    format!("{base_url}{endpoint}")
}

/// Sends the scenario's request and records the outcome.
pub async fn send_request(
    client: &Client,
    base_url: &str,
    scenario: &Scenario,
) -> Result<ResponseRecord, SmokeTestError> {
    let url = request_url(base_url, &scenario.endpoint);
    let parsed = Url::parse(&url).map_err(|e| SmokeTestError::InvalidUrl {
        url: url.clone(),
        reason: e.to_string(),
    })?;

    let mut request = client
        .request(scenario.method.into(), parsed)
        .header(CONTENT_TYPE, "application/json");
    if let Some(payload) = &scenario.payload {
        request = request.body(serde_json::to_vec(payload)?);
    }

    debug!(method = %scenario.method, url = %url, "Dispatching request");
    let start = Instant::now();

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) if e.is_builder() => return Err(SmokeTestError::Request(e)),
        Err(e) => {
            debug!(url = %url, error = %e, "Request failed before a response was received");
            return Ok(ResponseRecord::transport_failure(&e));
        }
    };

    let status = response.status();
    let raw = match response.bytes().await {
        Ok(raw) => raw,
        Err(e) => {
            debug!(url = %url, error = %e, "Failed to read response body");
            return Ok(ResponseRecord::transport_failure(&e));
        }
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    debug!(status = status.as_u16(), elapsed_ms, bytes = raw.len(), "Response received");
    Ok(ResponseRecord::from_status(status, &raw, elapsed_ms))
}

/// Formats an error with its source chain, outermost first.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_url_concatenates() {
        assert_eq!(
            request_url("https://api.example.com/prod/", "profile?userId=test-user-001"),
            "https://api.example.com/prod/profile?userId=test-user-001"
        );
        // No separator is inserted.
        assert_eq!(request_url("http://h/prod", "agent"), "http://h/prodagent");
    }

    #[test]
    fn test_success_parses_json() {
        let record = ResponseRecord::from_status(StatusCode::OK, br#"{"ok":true}"#, 12.5);
        assert_eq!(record.status_code, 200);
        assert_eq!(record.body, ResponseBody::Json(json!({"ok": true})));
        assert_eq!(record.elapsed_ms, 12.5);
        assert!(record.error.is_none());
    }

    #[test]
    fn test_empty_success_body_is_null() {
        let record = ResponseRecord::from_status(StatusCode::OK, b"", 1.0);
        assert_eq!(record.body, ResponseBody::Json(Value::Null));
    }

    #[test]
    fn test_non_json_success_body_kept_as_text() {
        let record = ResponseRecord::from_status(StatusCode::OK, b"plain words", 1.0);
        assert_eq!(record.body, ResponseBody::Text("plain words".to_string()));
        assert!(record.error.is_none());
    }

    #[test]
    fn test_error_status_keeps_raw_body_and_description() {
        let record = ResponseRecord::from_status(
            StatusCode::SERVICE_UNAVAILABLE,
            br#"{"message": "Internal server error"}"#,
            40.0,
        );
        assert_eq!(record.status_code, 503);
        assert_eq!(
            record.body,
            ResponseBody::Text(r#"{"message": "Internal server error"}"#.to_string())
        );
        assert_eq!(record.elapsed_ms, 40.0);
        assert_eq!(
            record.error.as_deref(),
            Some("HTTP Error 503: Service Unavailable")
        );
    }

    #[test]
    fn test_body_rendering() {
        let body = ResponseBody::Json(json!({"a": 1}));
        assert_eq!(body.pretty().unwrap(), "{\n  \"a\": 1\n}");
        assert_eq!(body.to_string(), r#"{"a":1}"#);
        assert_eq!(ResponseBody::Json(Value::Null).pretty().unwrap(), "null");
        assert_eq!(ResponseBody::Text("raw".into()).to_string(), "raw");
    }

    #[test]
    fn test_pretty_json_escapes_non_ascii() {
        let value = json!({"message": "I donated £50 🎗"});
        assert_eq!(
            pretty_json(&value).unwrap(),
            "{\n  \"message\": \"I donated \\u00a350 \\ud83c\\udf97\"\n}"
        );
        assert_eq!(
            ResponseBody::Json(json!("café")).pretty().unwrap(),
            "\"caf\\u00e9\""
        );
    }
}
