//! `screenshot://` resources
//!
//! `screenshot://list` reads as the newline-separated registry names;
//! `screenshot://<name>` reads as the base64 PNG registered under that name.
//! Reads resolve against the registry at request time, so a deleted
//! screenshot reports "not found" instead of serving stale bytes.

use base64::{Engine, engine::general_purpose::STANDARD};
use ios_simulator_core::{
    model::PNG_MIME_TYPE,
    registry::{
        LIST_RESOURCE_URI, ResourceTarget, ScreenshotRegistry, parse_resource_uri, resource_uri,
    },
};
use rmcp::model::{
    AnnotateAble, ErrorData, ListResourcesResult, RawResource, ReadResourceResult, Resource,
    ResourceContents,
};
use tracing::debug;

/// MIME type of the `screenshot://list` body
pub const LIST_MIME_TYPE: &str = "text/plain";

/// The listing resource followed by one resource per registered screenshot
pub fn list_resources(registry: &ScreenshotRegistry) -> ListResourcesResult {
    let mut list = RawResource::new(LIST_RESOURCE_URI, "Screenshot list");
    list.description = Some("Names of all registered screenshots, one per line".to_string());
    list.mime_type = Some(LIST_MIME_TYPE.to_string());

    let resources: Vec<Resource> = std::iter::once(list.no_annotation())
        .chain(registry.names().into_iter().map(screenshot_resource))
        .collect();

    ListResourcesResult {
        resources,
        next_cursor: None,
        meta: None,
    }
}

fn screenshot_resource(name: String) -> Resource {
    let mut resource = RawResource::new(resource_uri(&name), name);
    resource.mime_type = Some(PNG_MIME_TYPE.to_string());
    resource.no_annotation()
}

/// Resolves `uri` against the registry
pub fn read_resource(
    registry: &ScreenshotRegistry,
    uri: &str,
) -> Result<ReadResourceResult, ErrorData> {
    debug!(%uri, "reading resource");
    let contents = match parse_resource_uri(uri) {
        Some(ResourceTarget::List) => ResourceContents::TextResourceContents {
            uri:       uri.to_string(),
            mime_type: Some(LIST_MIME_TYPE.to_string()),
            text:      registry.list_text(),
            meta:      None,
        },
        Some(ResourceTarget::Screenshot(name)) => {
            let screenshot = registry.resolve(&name).ok_or_else(|| not_found(uri))?;
            ResourceContents::BlobResourceContents {
                uri:       uri.to_string(),
                mime_type: Some(PNG_MIME_TYPE.to_string()),
                blob:      STANDARD.encode(&screenshot.data),
                meta:      None,
            }
        }
        None => return Err(not_found(uri)),
    };

    Ok(ReadResourceResult {
        contents: vec![contents],
    })
}

fn not_found(uri: &str) -> ErrorData {
    ErrorData::resource_not_found(format!("Resource not found: {uri}"), None)
}
