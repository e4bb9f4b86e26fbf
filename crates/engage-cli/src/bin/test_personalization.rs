//! Smoke test for the Supporter Engagement personalization engine.
//!
//! Usage: `test-personalization [API_URL]`

use std::io::{Write, stdout};

use anyhow::Result;
use clap::Parser;
use engage_cli::init_logging;
use engage_core::smoke::{DEFAULT_BASE_URL, SmokeConfig, SmokeRunner};
use tracing::{debug, warn};

/// Send the personalization test battery to a deployed API and report each response
#[derive(Parser, Debug)]
#[command(name = "test-personalization", version, about)]
struct Cli {
    /// API base URL, including the stage and trailing slash
    #[arg(value_name = "API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = SmokeConfig::new(cli.base_url);
    debug!(base_url = %config.base_url, "Resolved API base URL");

    let mut out = stdout();
    let result = tokio::select! {
        result = SmokeRunner::run(&config, &mut out) => Some(result),
        Ok(()) = tokio::signal::ctrl_c() => None,
    };

    match result {
        Some(Ok(_summary)) => Ok(()),
        Some(Err(e)) => {
            println!("\n\n❌ Unexpected error: {e}");
            std::process::exit(1);
        }
        None => {
            warn!("Interrupt received, stopping smoke test run");
            out.flush()?;
            println!("\n\n⚠️  Tests interrupted by user");
            std::process::exit(1);
        }
    }
}
