//! Console report for smoke test runs.

use std::io::Write;

use super::outcome::Outcome;
use super::request::{ResponseRecord, pretty_json};
use super::scenario::Scenario;
use super::smoke_runner::SmokeTestError;

const HEAVY_RULE: &str = "==================================================";
const LIGHT_RULE: &str = "--------------------------------------------------";

/// Troubleshooting steps printed for a 503.
pub const TROUBLESHOOTING_STEPS: [&str; 3] = [
    "Check Lambda handler configuration",
    "Review CloudWatch logs",
    "Verify Lambda has correct permissions",
];

pub(crate) fn write_header<W: Write>(out: &mut W, base_url: &str) -> Result<(), SmokeTestError> {
    writeln!(out, "{HEAVY_RULE}")?;
    writeln!(out, "Testing Personalization Engine")?;
    writeln!(out, "{HEAVY_RULE}")?;
    writeln!(out, "API URL: {base_url}")?;
    writeln!(out)?;
    Ok(())
}

/// Writes the scenario heading, request line and payload.
pub(crate) fn write_request<W: Write>(out: &mut W, scenario: &Scenario) -> Result<(), SmokeTestError> {
    writeln!(out, "{LIGHT_RULE}")?;
    writeln!(out, "{}", scenario.name)?;
    writeln!(out, "{LIGHT_RULE}")?;
    writeln!(out, "📤 Request: {} /{}", scenario.method, scenario.endpoint)?;
    if let Some(payload) = &scenario.payload {
        writeln!(out, "📝 Payload:")?;
        writeln!(out, "{}", pretty_json(payload)?)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the response line and the block for its outcome.
pub(crate) fn write_response<W: Write>(
    out: &mut W,
    record: &ResponseRecord,
) -> Result<Outcome, SmokeTestError> {
    writeln!(
        out,
        "📥 Response: HTTP {} ({:.0}ms)",
        record.status_code, record.elapsed_ms
    )?;

    let outcome = Outcome::classify(record.status_code);
    match outcome {
        Outcome::Success => {
            writeln!(out, "✅ SUCCESS")?;
            writeln!(out, "Response body:")?;
            writeln!(out, "{}", record.body.pretty()?)?;
        }
        Outcome::ServiceUnavailable => {
            writeln!(out, "❌ FAILED - Service Unavailable (Lambda error)")?;
            writeln!(out, "Response: {}", record.body)?;
            writeln!(out)?;
            writeln!(out, "💡 Troubleshooting:")?;
            for (i, step) in TROUBLESHOOTING_STEPS.iter().enumerate() {
                writeln!(out, "   {}. {}", i + 1, step)?;
            }
        }
        Outcome::NotFound => {
            writeln!(out, "⚠️  NOT FOUND - User or resource does not exist")?;
            writeln!(out, "Response: {}", record.body)?;
        }
        Outcome::ConnectionError => {
            writeln!(
                out,
                "❌ CONNECTION ERROR: {}",
                record.error.as_deref().unwrap_or("Unknown error")
            )?;
        }
        Outcome::Other(code) => {
            writeln!(out, "⚠️  HTTP {code}")?;
            writeln!(out, "Response: {}", record.body)?;
            if let Some(error) = &record.error {
                writeln!(out, "Error: {error}")?;
            }
        }
    }

    writeln!(out)?;
    out.flush()?;
    Ok(outcome)
}

pub(crate) fn write_footer<W: Write>(out: &mut W) -> Result<(), SmokeTestError> {
    writeln!(out, "{HEAVY_RULE}")?;
    writeln!(out, "✅ All tests completed!")?;
    writeln!(out, "{HEAVY_RULE}")?;
    out.flush()?;
    Ok(())
}
