//! ios-simulator-core: simulator command gateway and screenshot registry
//!
//! This library wraps the `xcrun simctl` command line behind a small set of
//! typed operations (list, boot, capture) and keeps captured screenshots in
//! an in-memory registry addressable through `screenshot://` URIs.

pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod registry;
pub mod simctl;
pub mod util;
