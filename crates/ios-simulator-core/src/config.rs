//! Runtime configuration
//!
//! Configuration comes from the environment:
//!
//! - `SCREENSHOT_RESOURCE_DIR`: directory for captured screenshots (default
//!   `$HOME/Downloads/ios-simulator-screenshots`)
//! - `SIMCTL_PROGRAM`: program invoked for simctl commands (default `xcrun`)

use std::path::{Path, PathBuf};

use crate::error::SimulatorResult;

/// Environment variable overriding the screenshot directory
pub const SCREENSHOT_DIR_ENV: &str = "SCREENSHOT_RESOURCE_DIR";

/// Environment variable overriding the simctl host program
pub const SIMCTL_PROGRAM_ENV: &str = "SIMCTL_PROGRAM";

/// Program that hosts the `simctl` subcommand
pub const DEFAULT_SIMCTL_PROGRAM: &str = "xcrun";

const DEFAULT_DIR_NAME: &str = "ios-simulator-screenshots";

/// Server configuration resolved at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Where captures without an explicit output path are written
    pub screenshot_dir: PathBuf,
    /// Program invoked with `simctl ...` arguments
    pub simctl_program: String,
}

impl ServerConfig {
    /// Builds a configuration with the given screenshot directory and the
    /// default simctl program
    pub fn new(screenshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            screenshot_dir: screenshot_dir.into(),
            simctl_program: DEFAULT_SIMCTL_PROGRAM.to_string(),
        }
    }

    /// Reads the configuration from the process environment
    pub fn from_env() -> Self {
        let screenshot_dir = std::env::var_os(SCREENSHOT_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_screenshot_dir);

        let simctl_program = std::env::var(SIMCTL_PROGRAM_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SIMCTL_PROGRAM.to_string());

        Self {
            screenshot_dir,
            simctl_program,
        }
    }

    /// Reads the environment, then applies an explicit directory (such as a
    /// command-line flag), which takes precedence over `SCREENSHOT_RESOURCE_DIR`
    pub fn from_env_with_override(screenshot_dir: Option<PathBuf>) -> Self {
        let config = Self::from_env();
        match screenshot_dir {
            Some(dir) => config.with_screenshot_dir(dir),
            None => config,
        }
    }

    /// Replaces the screenshot directory
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// Replaces the simctl host program
    pub fn with_simctl_program(mut self, program: impl Into<String>) -> Self {
        self.simctl_program = program.into();
        self
    }

    /// Creates the screenshot directory if it does not exist
    pub fn ensure_screenshot_dir(&self) -> SimulatorResult<&Path> {
        if !self.screenshot_dir.exists() {
            std::fs::create_dir_all(&self.screenshot_dir)?;
            tracing::info!(dir = %self.screenshot_dir.display(), "created screenshot directory");
        }
        Ok(&self.screenshot_dir)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(default_screenshot_dir())
    }
}

/// `$HOME/Downloads/ios-simulator-screenshots`, or the system temp dir when
/// `HOME` is unset
pub fn default_screenshot_dir() -> PathBuf {
    match std::env::var_os("HOME").filter(|h| !h.is_empty()) {
        Some(home) => PathBuf::from(home).join("Downloads").join(DEFAULT_DIR_NAME),
        None => std::env::temp_dir().join(DEFAULT_DIR_NAME),
    }
}
