//! Shared test utilities for MCP server integration tests

pub mod mcp_harness;
