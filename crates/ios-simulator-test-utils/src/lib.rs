//! Test utilities for ios-simulator-mcp integration tests
//!
//! Provides a [`ScriptedRunner`] that stands in for `xcrun simctl` plus
//! fixture listings and image bytes.
//!
//! # Usage
//!
//! Add to your crate's dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! ios-simulator-test-utils = { path = "../ios-simulator-test-utils" }
//! ```
//!
//! ```ignore
//! use ios_simulator_test_utils::{ScriptedRunner, fixtures};
//! use ios_simulator_core::model::CommandOutput;
//!
//! let runner = ScriptedRunner::new()
//!     .respond("list", CommandOutput::ok(fixtures::LISTING_ONE_BOOTED))
//!     .respond("io", CommandOutput::ok(""))
//!     .with_screenshot_bytes(fixtures::PNG_BYTES);
//! ```

pub mod fixtures;
mod runner;

pub use runner::{RecordedCall, ScriptedRunner};
