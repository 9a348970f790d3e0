//! Screenshot naming and output path helpers
//!
//! Default names follow the `screenshot-<unix millis>` pattern and default
//! files live directly inside the configured screenshot directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{SimulatorError, SimulatorResult};

/// Name reserved for the aggregate `screenshot://list` resource
pub const RESERVED_LIST_NAME: &str = "list";

/// Builds the default screenshot name for a capture at `at`
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use ios_simulator_core::util::paths::default_screenshot_name;
///
/// let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
/// assert_eq!(default_screenshot_name(at), "screenshot-1700000000123");
/// ```
pub fn default_screenshot_name(at: DateTime<Utc>) -> String {
    format!("screenshot-{}", at.timestamp_millis())
}

/// Checks a caller supplied screenshot name
///
/// Names become both a file stem and a URI suffix, so they must be non-empty,
/// free of path separators and distinct from the aggregate resource name.
pub fn validate_screenshot_name(name: &str) -> SimulatorResult<()> {
    if name.trim().is_empty() {
        return Err(SimulatorError::invalid_parameter("name", "must not be empty"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(SimulatorError::invalid_parameter(
            "name",
            format!("'{name}' must not contain path separators"),
        ));
    }
    if name == RESERVED_LIST_NAME {
        return Err(SimulatorError::invalid_parameter(
            "name",
            "'list' is reserved for the screenshot listing resource",
        ));
    }
    Ok(())
}

/// Resolves where a capture should be written
pub fn resolve_output_path(dir: &Path, name: &str, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => dir.join(format!("{name}.png")),
    }
}

/// Creates the parent directory of `path` if it does not exist yet
pub async fn ensure_parent_dir(path: &Path) -> SimulatorResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !tokio::fs::try_exists(parent).await? {
            tracing::debug!(dir = %parent.display(), "creating screenshot directory");
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}
