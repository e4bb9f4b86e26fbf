//! # engage-cli
//!
//! Shared bootstrap for the Supporter Engagement developer binaries:
//! - `get-logical-ids`: scrape logical resource IDs from `cdk synth`
//! - `test-personalization`: smoke test the deployed personalization API

/// Installs the tracing subscriber.
///
/// Log records go to stderr so they never interleave with the report printed
/// on stdout.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();
}
