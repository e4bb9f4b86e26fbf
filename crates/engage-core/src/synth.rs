//! CDK synthesis runner.
//!
//! Spawns the synthesis tool and captures its standard output for scraping.
//! A non-zero exit status is tolerated: whatever the tool printed is still
//! returned. Only a failure to launch the process is reported as an error.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, warn};

/// Stack synthesized by the default command.
pub const DEFAULT_STACK: &str = "MichaelSupporterEngagement";

/// Result of a synthesis run.
#[derive(Debug, Clone)]
pub struct SynthOutput {
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Whether the process exited with status 0.
    pub success: bool,
    /// The exit code, if the process exited normally.
    pub exit_code: Option<i32>,
}

/// Errors that can occur when running synthesis.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("could not launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// An external synthesis command.
///
/// `SynthCommand::default()` runs `npx cdk synth MichaelSupporterEngagement`
/// from the parent directory, i.e. the project root when invoked from the
/// `scripts/` directory.
#[derive(Debug, Clone)]
pub struct SynthCommand {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl Default for SynthCommand {
    fn default() -> Self {
        Self::new("npx")
            .args(["cdk", "synth", DEFAULT_STACK])
            .current_dir("..")
    }
}

impl SynthCommand {
    /// Creates a command for `program` with no arguments, run from `.`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: PathBuf::from("."),
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory the process is spawned in.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Runs the command to completion and captures its output.
    pub fn run(&self) -> Result<SynthOutput, SynthError> {
        debug!(
            command = %self.program,
            args = ?self.args,
            cwd = ?self.working_dir,
            "Spawning synthesis command"
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SynthError::Launch {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(stderr = %stderr.trim_end(), "Synthesis wrote to stderr");
        }

        // Output is scraped regardless of exit status.
        if !output.status.success() {
            warn!(
                exit_code = ?output.status.code(),
                "Synthesis exited unsuccessfully, scanning its output anyway"
            );
        }

        debug!(bytes = stdout.len(), "Synthesis output captured");

        Ok(SynthOutput {
            stdout,
            success: output.status.success(),
            exit_code: output.status.code(),
        })
    }
}
