//! MCP content builders for tool results
//!
//! Converts gateway outcomes into MCP `CallToolResult`s. Captures produce a
//! text summary followed by an inline PNG; failures produce a single text
//! item flagged as an error, so the client always gets a readable message.
//!
//! # Examples
//!
//! ```
//! use ios_simulator_core::error::SimulatorError;
//! use ios_simulator_mcp_server::mcp_content::build_error_result;
//!
//! let error = SimulatorError::CommandNotFound {
//!     program: "xcrun".to_string(),
//! };
//! let result = build_error_result("Failed to boot simulator", &error);
//! assert!(result.is_error.unwrap_or(false));
//! ```

use base64::{Engine, engine::general_purpose::STANDARD};
use ios_simulator_core::{
    error::SimulatorError,
    model::{CapturedScreenshot, PNG_MIME_TYPE},
};
use rmcp::model::{CallToolResult, Content};

/// Builds MCP image content from raw image bytes
///
/// # Examples
///
/// ```
/// use ios_simulator_mcp_server::mcp_content::build_image_content;
///
/// let png_data = vec![137, 80, 78, 71, 13, 10, 26, 10];
/// let content = build_image_content(&png_data, "image/png");
/// assert!(content.as_image().is_some());
/// ```
pub fn build_image_content(data: &[u8], mime_type: &str) -> Content {
    Content::image(STANDARD.encode(data), mime_type)
}

/// Builds the result of a successful `take_screenshot`
///
/// Content order is fixed: the summary text (name, file path, resource URI)
/// first, then the PNG itself.
pub fn build_capture_result(captured: &CapturedScreenshot) -> CallToolResult {
    let summary = format!(
        "Screenshot '{}' saved to {}\nResource: {}",
        captured.name,
        captured.path.display(),
        captured.resource_uri
    );

    CallToolResult::success(vec![
        Content::text(summary),
        build_image_content(&captured.screenshot.data, PNG_MIME_TYPE),
    ])
}

/// Builds an error result carrying the failure and its remediation hint
pub fn build_error_result(context: &str, error: &SimulatorError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!(
        "{context}: {error}\n\nHint: {}",
        error.remediation_hint()
    ))])
}

/// Builds a plain text success result
pub fn build_text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}
