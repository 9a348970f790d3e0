//! Scripted stand-in for `xcrun simctl`

use std::{collections::HashMap, path::PathBuf};

use async_trait::async_trait;
use ios_simulator_core::{error::SimulatorResult, model::CommandOutput, simctl::CommandRunner};
use parking_lot::Mutex;

/// One invocation seen by a [`ScriptedRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args:    Vec<String>,
}

impl RecordedCall {
    /// The simctl subcommand (`list`, `boot`, `io`), if any
    pub fn subcommand(&self) -> Option<&str> {
        self.args.get(1).map(String::as_str)
    }
}

/// Answers simctl invocations from a script keyed by subcommand
///
/// Unscripted subcommands fail with exit code 1. When screenshot bytes are
/// configured, a successful `io <id> screenshot <path>` writes them to
/// `<path>` first, the way the real tool does.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses:        HashMap<String, CommandOutput>,
    device_failures:  HashMap<String, CommandOutput>,
    screenshot_bytes: Option<Vec<u8>>,
    calls:            Mutex<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the output for a simctl subcommand
    pub fn respond(mut self, subcommand: &str, output: CommandOutput) -> Self {
        self.responses.insert(subcommand.to_string(), output);
        self
    }

    /// Makes every command naming `device_id` fail with `output`
    pub fn fail_for_device(mut self, device_id: &str, output: CommandOutput) -> Self {
        self.device_failures.insert(device_id.to_string(), output);
        self
    }

    /// Bytes written to the output path of successful screenshot commands
    pub fn with_screenshot_bytes(mut self, bytes: &[u8]) -> Self {
        self.screenshot_bytes = Some(bytes.to_vec());
        self
    }

    /// All invocations so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of invocations of `subcommand`
    pub fn count(&self, subcommand: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.subcommand() == Some(subcommand))
            .count()
    }

    fn scripted_output(&self, args: &[String]) -> CommandOutput {
        if let Some(output) = args.iter().find_map(|a| self.device_failures.get(a)) {
            return output.clone();
        }
        let subcommand = args.get(1).map(String::as_str).unwrap_or_default();
        self.responses.get(subcommand).cloned().unwrap_or_else(|| {
            CommandOutput::failed(1, format!("no scripted response for '{subcommand}'"))
        })
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> SimulatorResult<CommandOutput> {
        self.calls.lock().push(RecordedCall {
            program: program.to_string(),
            args:    args.to_vec(),
        });

        let output = self.scripted_output(args);
        if output.success() {
            if let (Some(bytes), Some(path)) = (&self.screenshot_bytes, screenshot_path(args)) {
                tokio::fs::write(path, bytes).await?;
            }
        }
        Ok(output)
    }
}

// `simctl io <id> screenshot <path>`
fn screenshot_path(args: &[String]) -> Option<PathBuf> {
    match args {
        [_, io, _, screenshot, path] if io == "io" && screenshot == "screenshot" => {
            Some(PathBuf::from(path))
        }
        _ => None,
    }
}
