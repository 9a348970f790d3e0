//! `simctl` command execution
//!
//! The [`CommandRunner`] trait is the seam between the gateway and the
//! operating system: production code uses [`SystemRunner`], tests substitute
//! a scripted runner. [`Simctl`] owns the fixed set of command templates.

pub mod parse;

use std::{path::Path, process::Stdio, sync::Arc};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::{
    config::DEFAULT_SIMCTL_PROGRAM,
    error::{SimulatorError, SimulatorResult},
    model::CommandOutput,
};

/// Capability: run an external program to completion and capture its output.
///
/// Implementations must not interpret the exit status; [`Simctl`] decides
/// what counts as failure.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and waits for it to exit.
    async fn run(&self, program: &str, args: &[String]) -> SimulatorResult<CommandOutput>;
}

/// Runs commands as child processes via `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> SimulatorResult<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SimulatorError::CommandNotFound {
                    program: program.to_string(),
                },
                _ => SimulatorError::Io(e),
            })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// The simctl command templates used by the gateway
#[derive(Clone)]
pub struct Simctl {
    runner:  Arc<dyn CommandRunner>,
    program: String,
}

impl std::fmt::Debug for Simctl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simctl").field("program", &self.program).finish_non_exhaustive()
    }
}

impl Simctl {
    /// Creates a simctl wrapper that invokes `program simctl ...`
    pub fn new(runner: Arc<dyn CommandRunner>, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// Simctl through `xcrun` using real child processes
    pub fn system() -> Self {
        Self::new(Arc::new(SystemRunner), DEFAULT_SIMCTL_PROGRAM)
    }

    /// The host program (usually `xcrun`)
    pub fn program(&self) -> &str {
        &self.program
    }

    /// `simctl list devices`
    pub async fn list_devices(&self) -> SimulatorResult<String> {
        self.run(&["list", "devices"]).await
    }

    /// `simctl boot <device_id>`
    pub async fn boot(&self, device_id: &str) -> SimulatorResult<String> {
        self.run(&["boot", device_id]).await
    }

    /// `simctl io <device_id> screenshot <path>`
    pub async fn screenshot(&self, device_id: &str, path: &Path) -> SimulatorResult<String> {
        let path = path.to_string_lossy();
        self.run(&["io", device_id, "screenshot", &*path]).await
    }

    async fn run(&self, args: &[&str]) -> SimulatorResult<String> {
        let args: Vec<String> = std::iter::once("simctl")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect();
        let command = render_command(&self.program, &args);
        debug!(%command, "running simctl");

        let output = self.runner.run(&self.program, &args).await?;
        if !output.success() {
            debug!(%command, status = ?output.status, "simctl failed");
            return Err(SimulatorError::CommandFailed {
                command,
                status: output.status,
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
