//! Extracts logical resource IDs from CDK synth output.
//!
//! Run from the project's `scripts/` directory; synthesis runs one level up.

use std::io::{Write, stdout};

use anyhow::{Context, Result};
use clap::Parser;
use engage_cli::init_logging;
use engage_core::resource_ids::{write_banner, write_report};
use engage_core::{SynthCommand, extract};
use tracing::info;

/// Print DynamoDB table and S3 bucket logical IDs from the synthesized stack
#[derive(Parser, Debug)]
#[command(name = "get-logical-ids", version, about)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    init_logging();

    let mut out = stdout().lock();
    write_banner(&mut out).context("Failed to write banner")?;

    let command = SynthCommand::default();
    let output = match command.run() {
        Ok(output) => output,
        Err(e) => {
            writeln!(out, "❌ Failed to run CDK synth: {e}")?;
            out.flush()?;
            std::process::exit(1);
        }
    };
    info!(exit_code = ?output.exit_code, "CDK synth finished");

    let resources = extract(&output.stdout);
    write_report(&resources, &mut out).context("Failed to write report")?;

    Ok(())
}
