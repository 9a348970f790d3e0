//! Simulator command gateway
//!
//! Translates each high-level operation into exactly one simctl invocation
//! and, for captures, hands the resulting bytes to the
//! [`ScreenshotRegistry`]. The gateway holds no state of its own beyond the
//! injected registry.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::{
    config::ServerConfig,
    error::{SimulatorError, SimulatorResult},
    model::{BootedSimulator, CaptureRequest, CapturedScreenshot, Screenshot},
    registry::{ScreenshotRegistry, resource_uri},
    simctl::{Simctl, SystemRunner, parse::parse_booted_simulator},
    util::paths::{
        default_screenshot_name, ensure_parent_dir, resolve_output_path, validate_screenshot_name,
    },
};

/// Runs simctl operations and records captures in the registry
#[derive(Debug, Clone)]
pub struct SimulatorGateway {
    simctl:   Simctl,
    registry: Arc<ScreenshotRegistry>,
    config:   ServerConfig,
}

impl SimulatorGateway {
    /// Creates a gateway over an explicit simctl wrapper and registry
    pub fn new(simctl: Simctl, registry: Arc<ScreenshotRegistry>, config: ServerConfig) -> Self {
        Self {
            simctl,
            registry,
            config,
        }
    }

    /// Creates a gateway that spawns `config.simctl_program` as a child process
    pub fn system(config: ServerConfig, registry: Arc<ScreenshotRegistry>) -> Self {
        let simctl = Simctl::new(Arc::new(SystemRunner), config.simctl_program.clone());
        Self::new(simctl, registry, config)
    }

    pub fn registry(&self) -> &Arc<ScreenshotRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Finds the first booted simulator, `None` when nothing is booted
    pub async fn booted_simulator(&self) -> SimulatorResult<Option<BootedSimulator>> {
        let listing = self.simctl.list_devices().await?;
        Ok(parse_booted_simulator(&listing))
    }

    /// Raw `simctl list devices` output
    pub async fn list_simulators(&self) -> SimulatorResult<String> {
        self.simctl.list_devices().await
    }

    /// Boots `device_id`, returning simctl's (trimmed) output
    pub async fn boot_simulator(&self, device_id: &str) -> SimulatorResult<String> {
        require_device_id(device_id)?;
        let output = self.simctl.boot(device_id).await?;
        info!(%device_id, "booted simulator");
        Ok(output.trim().to_string())
    }

    /// Captures a screenshot of `request.device_id` and registers it
    ///
    /// The capture is all-or-nothing: the registry is only touched once the
    /// command succeeded and a non-empty file was read back.
    pub async fn capture_screenshot(
        &self,
        request: CaptureRequest,
    ) -> SimulatorResult<CapturedScreenshot> {
        require_device_id(&request.device_id)?;

        // Blank optional values mean "use the default"
        let name = match request.name.filter(|n| !n.trim().is_empty()) {
            Some(name) => {
                validate_screenshot_name(&name)?;
                name
            }
            None => default_screenshot_name(Utc::now()),
        };
        let output_path = request
            .output_path
            .filter(|p| !p.to_string_lossy().trim().is_empty());
        let path = resolve_output_path(&self.config.screenshot_dir, &name, output_path.as_deref());

        ensure_parent_dir(&path).await?;
        self.simctl.screenshot(&request.device_id, &path).await?;

        let data = match tokio::fs::read(&path).await {
            Ok(data) if !data.is_empty() => data,
            Ok(_) => {
                warn!(path = %path.display(), "capture produced an empty file");
                return Err(SimulatorError::ScreenshotNotWritten {
                    path: path.display().to_string(),
                });
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SimulatorError::ScreenshotNotWritten {
                    path: path.display().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let screenshot = Screenshot::new(data);
        let is_new = self.registry.register(name.clone(), screenshot.clone());
        info!(
            %name,
            path = %path.display(),
            bytes = screenshot.len(),
            is_new,
            "captured screenshot"
        );

        Ok(CapturedScreenshot {
            resource_uri: resource_uri(&name),
            name,
            path,
            screenshot,
            is_new,
        })
    }

    /// Removes a screenshot from the registry; files on disk are untouched
    pub fn delete_screenshot(&self, name: &str) -> bool {
        self.registry.delete(name)
    }
}

fn require_device_id(device_id: &str) -> SimulatorResult<()> {
    if device_id.trim().is_empty() {
        return Err(SimulatorError::invalid_parameter("deviceId", "must not be empty"));
    }
    Ok(())
}
