//! ios-simulator-mcp-server: MCP server for iOS simulator control
//!
//! Thin protocol layer that wraps ios-simulator-core with MCP tool routing,
//! `screenshot://` resources and response formatting.

pub mod mcp;
pub mod mcp_content;
pub mod resources;
