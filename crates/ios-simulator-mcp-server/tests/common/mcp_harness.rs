//! MCP Server Test Harness
//!
//! Builds a `SimulatorMcpServer` over a [`ScriptedRunner`] and a scratch
//! screenshot directory, and decodes the content of tool results.
//!
//! # Usage
//!
//! ```rust
//! use common::mcp_harness::{ContentValidator, McpTestContext};
//!
//! #[tokio::test]
//! async fn test_capture() {
//!     let ctx = McpTestContext::capturing();
//!     let result = ctx.take_screenshot("ABCD", Some("home")).await.unwrap();
//!     let parts = ContentValidator::validate_capture_result(&result).unwrap();
//!     assert!(parts.image_bytes.starts_with(&[0x89, 0x50, 0x4e, 0x47])); // PNG
//! }
//! ```

#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use base64::{Engine, engine::general_purpose::STANDARD};
use ios_simulator_core::{
    config::ServerConfig, gateway::SimulatorGateway, model::CommandOutput,
    registry::ScreenshotRegistry, simctl::Simctl,
};
use ios_simulator_mcp_server::mcp::{
    BootSimulatorParams, DeleteScreenshotParams, SimulatorMcpServer, TakeScreenshotParams,
    ToolOutcome,
};
use ios_simulator_test_utils::{ScriptedRunner, fixtures};
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ErrorData, ReadResourceResult, ResourceContents},
};
use tempfile::TempDir;

/// Test fixture for MCP server integration tests
pub struct McpTestContext {
    /// The MCP server instance
    pub server: SimulatorMcpServer,
    /// Scripted simctl, for inspecting recorded invocations
    pub runner: Arc<ScriptedRunner>,
    /// Scratch directory holding the screenshot directory
    pub dir:    TempDir,
}

impl McpTestContext {
    /// Creates a context over the given scripted simctl
    pub fn new(runner: ScriptedRunner) -> Self {
        let dir = tempfile::tempdir().expect("create scratch dir");
        let runner = Arc::new(runner);
        let simctl = Simctl::new(runner.clone(), "xcrun");
        let gateway = SimulatorGateway::new(
            simctl,
            Arc::new(ScreenshotRegistry::new()),
            ServerConfig::new(dir.path().join("screenshots")),
        );
        Self {
            server: SimulatorMcpServer::new(Arc::new(gateway)),
            runner,
            dir,
        }
    }

    /// Context whose simctl lists one booted device and writes fixture PNGs
    pub fn capturing() -> Self {
        Self::new(
            ScriptedRunner::new()
                .respond("list", CommandOutput::ok(fixtures::LISTING_ONE_BOOTED))
                .respond("boot", CommandOutput::ok(""))
                .respond("io", CommandOutput::ok("Wrote screenshot"))
                .with_screenshot_bytes(fixtures::PNG_BYTES),
        )
    }

    /// Default screenshot directory of this context
    pub fn screenshot_dir(&self) -> PathBuf {
        self.dir.path().join("screenshots")
    }

    /// Registered names, straight from the registry
    pub fn registered_names(&self) -> Vec<String> {
        self.server.gateway().registry().names()
    }

    // --- Tool invocation helpers ---
    //
    // take_screenshot and delete_screenshot need a connected peer for their
    // list_changed notification, so these run the tool bodies directly.

    pub async fn take_screenshot(
        &self,
        device_id: &str,
        name: Option<&str>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome = self
            .capture(TakeScreenshotParams {
                device_id: device_id.to_string(),
                name: name.map(str::to_string),
                output_path: None,
            })
            .await;
        Ok(outcome.result)
    }

    /// Runs take_screenshot, keeping the resource change flag
    pub async fn capture(&self, params: TakeScreenshotParams) -> ToolOutcome {
        self.server.run_take_screenshot(params).await
    }

    pub async fn boot_simulator(&self, device_id: &str) -> Result<CallToolResult, ErrorData> {
        self.server
            .boot_simulator(Parameters(BootSimulatorParams {
                device_id: device_id.to_string(),
            }))
            .await
    }

    pub async fn delete_screenshot(&self, name: &str) -> Result<CallToolResult, ErrorData> {
        Ok(self.delete(name).result)
    }

    /// Runs delete_screenshot, keeping the resource change flag
    pub fn delete(&self, name: &str) -> ToolOutcome {
        self.server.run_delete_screenshot(DeleteScreenshotParams {
            name: name.to_string(),
        })
    }

    // --- Resource helpers ---

    pub fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ErrorData> {
        ios_simulator_mcp_server::resources::read_resource(self.server.gateway().registry(), uri)
    }

    /// Body of `screenshot://list`
    pub fn list_text(&self) -> String {
        let result = self.read_resource("screenshot://list").expect("list resource");
        match result.contents.into_iter().next() {
            Some(ResourceContents::TextResourceContents { text, .. }) => text,
            other => panic!("expected text contents, got {other:?}"),
        }
    }

    /// Decoded bytes of `screenshot://<name>`
    pub fn screenshot_bytes(&self, name: &str) -> Result<Vec<u8>, ErrorData> {
        let result = self.read_resource(&format!("screenshot://{name}"))?;
        match result.contents.into_iter().next() {
            Some(ResourceContents::BlobResourceContents { blob, .. }) => {
                Ok(STANDARD.decode(blob).expect("valid base64 blob"))
            }
            other => panic!("expected blob contents, got {other:?}"),
        }
    }
}

// ============================================================================
// Content Validators
// ============================================================================

/// Parsed components of a take_screenshot result
#[derive(Debug)]
pub struct CaptureResultParts {
    /// Summary text (name, path, resource URI)
    pub summary:     String,
    /// Decoded PNG bytes
    pub image_bytes: Vec<u8>,
}

/// Validation utilities for MCP tool responses
pub struct ContentValidator;

impl ContentValidator {
    /// Text of the first content item
    pub fn text(result: &CallToolResult) -> Result<String, String> {
        let first = result.content.first().ok_or("Missing content")?;
        let text = first.as_text().ok_or("First content is not text")?;
        Ok(text.text.clone())
    }

    /// Validates the two-part capture result: summary text, then image/png
    pub fn validate_capture_result(result: &CallToolResult) -> Result<CaptureResultParts, String> {
        if result.is_error.unwrap_or(false) {
            return Err(format!("Capture failed: {}", Self::text(result)?));
        }
        if result.content.len() != 2 {
            return Err(format!("Expected 2 content items, got {}", result.content.len()));
        }

        let summary = Self::text(result)?;
        let image = result.content[1]
            .as_image()
            .ok_or("Second content is not an image")?;
        if image.mime_type != "image/png" {
            return Err(format!("Expected MIME type 'image/png', got '{}'", image.mime_type));
        }
        let image_bytes = STANDARD
            .decode(&image.data)
            .map_err(|e| format!("Invalid base64: {}", e))?;

        Ok(CaptureResultParts {
            summary,
            image_bytes,
        })
    }
}
