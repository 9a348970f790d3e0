//! In-memory screenshot registry
//!
//! Maps screenshot names to their PNG bytes. Each entry is addressable as
//! `screenshot://<name>`; `screenshot://list` enumerates the current names.
//! Resource handles are not stored: a read resolves the name against the
//! registry at that moment, so a deleted entry simply stops resolving.
//!
//! # Examples
//!
//! ```
//! use ios_simulator_core::registry::{ResourceTarget, ScreenshotRegistry, parse_resource_uri};
//!
//! let registry = ScreenshotRegistry::new();
//! assert!(registry.register("home", vec![1u8, 2, 3]));
//!
//! let target = parse_resource_uri("screenshot://home").unwrap();
//! assert_eq!(target, ResourceTarget::Screenshot("home".to_string()));
//! assert_eq!(&*registry.resolve("home").unwrap().data, &[1, 2, 3]);
//! ```

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::{model::Screenshot, util::paths::RESERVED_LIST_NAME};

/// URI scheme prefix for screenshot resources
pub const RESOURCE_SCHEME: &str = "screenshot://";

/// URI of the aggregate listing resource
pub const LIST_RESOURCE_URI: &str = "screenshot://list";

/// What a `screenshot://` URI points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceTarget {
    /// The aggregate `screenshot://list` resource
    List,
    /// A single named screenshot
    Screenshot(String),
}

/// Builds the resource URI for a screenshot name
pub fn resource_uri(name: &str) -> String {
    format!("{RESOURCE_SCHEME}{name}")
}

/// Parses a `screenshot://` URI; `None` for other schemes or an empty name
pub fn parse_resource_uri(uri: &str) -> Option<ResourceTarget> {
    let rest = uri.strip_prefix(RESOURCE_SCHEME)?;
    match rest {
        "" => None,
        RESERVED_LIST_NAME => Some(ResourceTarget::List),
        name => Some(ResourceTarget::Screenshot(name.to_string())),
    }
}

#[derive(Debug, Default)]
struct Entries {
    by_name: HashMap<String, Screenshot>,
    // Insertion order of the keys in `by_name`
    order:   Vec<String>,
}

/// Thread-safe name → screenshot map
///
/// All mutations take the write lock, so a reader never observes a
/// half-replaced entry. Bytes are shared as `Arc<[u8]>`; resolving is cheap.
#[derive(Debug, Default)]
pub struct ScreenshotRegistry {
    entries: RwLock<Entries>,
}

impl ScreenshotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the bytes stored under `name`
    ///
    /// Returns `true` when the name was not registered before. Replacing an
    /// existing entry keeps its position in [`names`](Self::names).
    pub fn register(&self, name: impl Into<String>, data: impl Into<Screenshot>) -> bool {
        let name = name.into();
        let screenshot = data.into();
        let mut entries = self.entries.write();

        let is_new = entries.by_name.insert(name.clone(), screenshot).is_none();
        if is_new {
            entries.order.push(name.clone());
        }
        debug!(%name, is_new, "registered screenshot");
        is_new
    }

    /// Removes `name`; returns whether it existed
    pub fn delete(&self, name: &str) -> bool {
        let mut entries = self.entries.write();
        if entries.by_name.remove(name).is_none() {
            return false;
        }
        entries.order.retain(|n| n != name);
        debug!(%name, "deleted screenshot");
        true
    }

    /// Returns the screenshot registered under `name`
    pub fn resolve(&self, name: &str) -> Option<Screenshot> {
        self.entries.read().by_name.get(name).cloned()
    }

    /// Registered names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.entries.read().order.clone()
    }

    /// Registered names joined by newlines, the body of `screenshot://list`
    pub fn list_text(&self) -> String {
        self.entries.read().order.join("\n")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
