//! Error types for simulator operations
//!
//! Every failure carries a user-facing message plus a remediation hint. The
//! MCP layer renders both into a text envelope, so callers always receive a
//! readable explanation instead of a protocol fault.

/// Result type alias for simulator operations
pub type SimulatorResult<T> = Result<T, SimulatorError>;

/// Error type for simulator command and screenshot operations
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    /// The external program could not be spawned because it does not exist
    #[error("Command '{program}' was not found")]
    CommandNotFound {
        /// Program that failed to spawn
        program: String,
    },

    /// The external command ran but exited unsuccessfully
    #[error("Command `{command}` failed ({}): {stderr}", exit_label(.status))]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit code, `None` when terminated by a signal
        status:  Option<i32>,
        /// Captured standard error, trimmed
        stderr:  String,
    },

    /// The capture command succeeded but left no usable file behind
    #[error("Screenshot was not written to {path}")]
    ScreenshotNotWritten {
        /// Path the capture was expected at
        path: String,
    },

    /// Invalid parameter provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: String,
        /// Reason why it's invalid
        reason:    String,
    },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl SimulatorError {
    /// Shorthand for an [`SimulatorError::InvalidParameter`]
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        SimulatorError::InvalidParameter {
            parameter: parameter.into(),
            reason:    reason.into(),
        }
    }

    /// Returns an actionable remediation hint for this error
    ///
    /// # Examples
    ///
    /// ```
    /// use ios_simulator_core::error::SimulatorError;
    ///
    /// let error = SimulatorError::CommandNotFound {
    ///     program: "xcrun".to_string(),
    /// };
    /// assert!(error.remediation_hint().contains("Xcode"));
    /// ```
    pub fn remediation_hint(&self) -> &str {
        match self {
            SimulatorError::CommandNotFound { .. } => {
                "Install Xcode and its command line tools (xcode-select --install), or point \
                 SIMCTL_PROGRAM at a working xcrun binary."
            }
            SimulatorError::CommandFailed { stderr, .. } => {
                if stderr.contains("Invalid device") || stderr.contains("No devices") {
                    "The device id was not recognised. Use get_all_simulators to list valid ids."
                } else if stderr.contains("current state: Booted") {
                    "The simulator is already booted."
                } else if stderr.contains("Shutdown") {
                    "The simulator is not running. Boot it with boot_simulator first."
                } else {
                    "Check the simctl output above and make sure the simulator is available."
                }
            }
            SimulatorError::ScreenshotNotWritten { .. } => {
                "The capture did not produce a file. Make sure the simulator is booted and the \
                 output directory is writable."
            }
            SimulatorError::InvalidParameter { parameter, .. } => match parameter.as_str() {
                "deviceId" => "Pass a simulator UDID as returned by get_all_simulators.",
                "name" => "Use a name without path separators and other than 'list'.",
                _ => "Check the parameter value against the tool description.",
            },
            SimulatorError::Io(_) => {
                "An I/O error occurred. Check file permissions, disk space, and that the \
                 screenshot directory is accessible."
            }
        }
    }
}
