//! MCP service implementation with tool routing
//!
//! This module provides the ios-simulator-mcp server: five tools backed by
//! [`SimulatorGateway`] and the `screenshot://` resources backed by its
//! registry. Every tool failure is rendered as an error-flagged text result;
//! only malformed protocol requests surface as MCP errors. Captures that add a
//! name and deletes that remove one send `notifications/resources/list_changed`.

use std::{path::PathBuf, sync::Arc};

use ios_simulator_core::{
    config::ServerConfig, gateway::SimulatorGateway, model::CaptureRequest,
    registry::ScreenshotRegistry,
};
use rmcp::{
    RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, ErrorData as McpError, Implementation, ListResourcesResult,
        PaginatedRequestParams, ReadResourceRequestParams, ReadResourceResult,
        ServerCapabilities, ServerInfo,
    },
    service::{Peer, RequestContext},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    mcp_content::{build_capture_result, build_error_result, build_text_result},
    resources,
};

/// Parameters for the take_screenshot tool
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TakeScreenshotParams {
    /// UDID of the simulator to capture
    pub device_id: String,
    /// Name to register the screenshot under (default: screenshot-<unix millis>)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// File to write the PNG to (default: <screenshot dir>/<name>.png)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

/// Parameters for the boot_simulator tool
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BootSimulatorParams {
    /// UDID of the simulator to boot
    pub device_id: String,
}

/// Parameters for the delete_screenshot tool
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct DeleteScreenshotParams {
    /// Registered screenshot name
    pub name: String,
}

const INSTRUCTIONS: &str = "Boots, inspects and screenshots iOS simulators through xcrun simctl. Use \
                            get_booted_sim_id or get_all_simulators to find a device id, \
                            boot_simulator to start one and take_screenshot to capture it. \
                            Captures are also readable as screenshot://<name> resources; \
                            screenshot://list enumerates them.";

/// A tool result and whether producing it changed the set of resources
#[derive(Debug)]
pub struct ToolOutcome {
    pub result:            CallToolResult,
    pub resources_changed: bool,
}

impl ToolOutcome {
    fn unchanged(result: CallToolResult) -> Self {
        Self {
            result,
            resources_changed: false,
        }
    }

    /// Notifies the client when the resource list changed and yields the result
    async fn publish(self, peer: &Peer<RoleServer>) -> CallToolResult {
        if self.resources_changed {
            if let Err(e) = peer.notify_resource_list_changed().await {
                warn!(error = %e, "failed to send resource list change notification");
            }
        }
        self.result
    }
}

/// iOS simulator MCP server
///
/// # Tools
///
/// - `get_booted_sim_id`: name and UDID of the first booted simulator
/// - `get_all_simulators`: raw `simctl list devices` output
/// - `take_screenshot`: capture a simulator screen and register it
/// - `boot_simulator`: boot a simulator by UDID
/// - `delete_screenshot`: drop a screenshot from the registry
#[derive(Clone)]
pub struct SimulatorMcpServer {
    tool_router: ToolRouter<Self>,
    gateway:     Arc<SimulatorGateway>,
}

#[tool_router]
impl SimulatorMcpServer {
    /// Creates a server over an existing gateway
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use ios_simulator_core::{
    ///     config::ServerConfig, gateway::SimulatorGateway, registry::ScreenshotRegistry,
    /// };
    /// use ios_simulator_mcp_server::mcp::SimulatorMcpServer;
    ///
    /// let gateway = SimulatorGateway::system(
    ///     ServerConfig::new("/tmp/shots"),
    ///     Arc::new(ScreenshotRegistry::new()),
    /// );
    /// let server = SimulatorMcpServer::new(Arc::new(gateway));
    /// assert!(server.gateway().registry().is_empty());
    /// ```
    pub fn new(gateway: Arc<SimulatorGateway>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            gateway,
        }
    }

    /// Creates a server that runs the real simctl with a fresh registry
    pub fn from_config(config: ServerConfig) -> Self {
        let registry = Arc::new(ScreenshotRegistry::new());
        Self::new(Arc::new(SimulatorGateway::system(config, registry)))
    }

    pub fn gateway(&self) -> &Arc<SimulatorGateway> {
        &self.gateway
    }

    #[tool(description = "Get the name and UDID of the currently booted iOS simulator")]
    pub async fn get_booted_sim_id(&self) -> Result<CallToolResult, McpError> {
        let result = match self.gateway.booted_simulator().await {
            Ok(Some(sim)) => build_text_result(format!(
                "Booted Simulator: \"{}\". UUID: \"{}\"",
                sim.name, sim.id
            )),
            Ok(None) => build_text_result("No booted simulator found"),
            Err(e) => build_error_result("Failed to list simulators", &e),
        };
        Ok(result)
    }

    #[tool(description = "List all available iOS simulators and their states")]
    pub async fn get_all_simulators(&self) -> Result<CallToolResult, McpError> {
        let result = match self.gateway.list_simulators().await {
            Ok(listing) => build_text_result(listing),
            Err(e) => build_error_result("Failed to list simulators", &e),
        };
        Ok(result)
    }

    #[tool(
        description = "Take a screenshot of an iOS simulator. The PNG is saved to disk, returned \
                       inline and registered as the resource screenshot://<name>"
    )]
    pub async fn take_screenshot(
        &self,
        peer: Peer<RoleServer>,
        Parameters(params): Parameters<TakeScreenshotParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run_take_screenshot(params).await.publish(&peer).await)
    }

    #[tool(description = "Boot an iOS simulator by its UDID")]
    pub async fn boot_simulator(
        &self,
        Parameters(params): Parameters<BootSimulatorParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = match self.gateway.boot_simulator(&params.device_id).await {
            Ok(output) if output.is_empty() => {
                build_text_result(format!("Simulator {} booted", params.device_id))
            }
            Ok(output) => {
                build_text_result(format!("Simulator {} booted\n{output}", params.device_id))
            }
            Err(e) => build_error_result("Failed to boot simulator", &e),
        };
        Ok(result)
    }

    #[tool(description = "Remove a screenshot from the resource registry (the file is kept)")]
    pub async fn delete_screenshot(
        &self,
        peer: Peer<RoleServer>,
        Parameters(params): Parameters<DeleteScreenshotParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run_delete_screenshot(params).publish(&peer).await)
    }
}

impl SimulatorMcpServer {
    /// Body of `take_screenshot`, without the client notification
    pub async fn run_take_screenshot(&self, params: TakeScreenshotParams) -> ToolOutcome {
        debug!(device_id = %params.device_id, name = ?params.name, "take_screenshot");

        let mut request = CaptureRequest::new(params.device_id);
        request.name = params.name;
        request.output_path = params.output_path.map(PathBuf::from);

        match self.gateway.capture_screenshot(request).await {
            Ok(captured) => ToolOutcome {
                result:            build_capture_result(&captured),
                resources_changed: captured.is_new,
            },
            Err(e) => ToolOutcome::unchanged(build_error_result("Failed to take screenshot", &e)),
        }
    }

    /// Body of `delete_screenshot`, without the client notification
    pub fn run_delete_screenshot(&self, params: DeleteScreenshotParams) -> ToolOutcome {
        let deleted = self.gateway.delete_screenshot(&params.name);
        let text = if deleted {
            format!("Screenshot '{}' deleted", params.name)
        } else {
            format!("Screenshot '{}' not found", params.name)
        };
        ToolOutcome {
            result:            build_text_result(text),
            resources_changed: deleted,
        }
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for SimulatorMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name:        "ios-simulator-mcp".to_string(),
                title:       None,
                version:     env!("CARGO_PKG_VERSION").to_string(),
                icons:       None,
                website_url: None,
            },
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_resources_list_changed()
                .build(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _pagination: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(resources::list_resources(self.gateway.registry()))
    }

    async fn read_resource(
        &self,
        params: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        resources::read_resource(self.gateway.registry(), &params.uri)
    }
}
