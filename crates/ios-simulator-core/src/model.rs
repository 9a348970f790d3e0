//! Data models shared by the gateway, the registry and the MCP layer

use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// MIME type of every screenshot produced by `simctl io screenshot`
pub const PNG_MIME_TYPE: &str = "image/png";

/// A simulator reported as booted by the device listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BootedSimulator {
    /// Human readable device name, e.g. "iPhone 15"
    pub name: String,
    /// Device UDID
    pub id:   String,
}

impl std::fmt::Display for BootedSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Captured standard streams and exit status of one external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failed(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the command exited with status 0
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Parameters of a single screenshot capture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Simulator UDID to capture
    pub device_id:   String,
    /// Registry name; derived from the capture time when absent
    pub name:        Option<String>,
    /// Explicit output file; defaults to `<screenshot_dir>/<name>.png`
    pub output_path: Option<PathBuf>,
}

impl CaptureRequest {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }
}

/// Screenshot bytes held by the registry
#[derive(Debug, Clone)]
pub struct Screenshot {
    /// Encoded PNG bytes
    pub data:        Arc<[u8]>,
    /// When the bytes were registered
    pub captured_at: DateTime<Utc>,
}

impl Screenshot {
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            data:        data.into(),
            captured_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Vec<u8>> for Screenshot {
    fn from(data: Vec<u8>) -> Self {
        Screenshot::new(data)
    }
}

impl From<&[u8]> for Screenshot {
    fn from(data: &[u8]) -> Self {
        Screenshot::new(data)
    }
}

/// Outcome of a successful capture
#[derive(Debug, Clone)]
pub struct CapturedScreenshot {
    /// Registry name
    pub name:         String,
    /// File the capture was written to
    pub path:         PathBuf,
    /// `screenshot://<name>`
    pub resource_uri: String,
    /// The registered bytes
    pub screenshot:   Screenshot,
    /// Whether the name was not registered before this capture
    pub is_new:       bool,
}
