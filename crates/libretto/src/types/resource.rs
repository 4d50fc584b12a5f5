//! Resource Types
//!
//! Types for MCP resource descriptors and contents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::BlobResourceContents;

/// MIME type given to resources and templates unless told otherwise.
pub const DEFAULT_RESOURCE_MIME_TYPE: &str = "application/json";

/// A resource descriptor as listed by `resources/list`.
///
/// Unlike blob contents, `mime_type` carries no wire alias here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceInfo {
    /// URI identifying the resource.
    pub uri: String,

    /// Programmatic name.
    pub name: String,

    /// Description for the LLM.
    #[serde(default)]
    pub description: String,

    /// MIME type of the resource.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub mime_type: Option<String>,
}

/// A resource template using `{placeholder}` URI syntax.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResourceTemplateInfo {
    /// URI template.
    #[serde(rename = "uriTemplate")]
    pub uri_template: String,

    /// Programmatic name.
    pub name: String,

    /// Description for the LLM.
    #[serde(default)]
    pub description: String,

    /// MIME type for resources matching this template.
    #[serde(rename = "mimeType", default = "default_mime_type")]
    pub mime_type: String,
}

fn default_mime_type() -> String {
    DEFAULT_RESOURCE_MIME_TYPE.to_string()
}

/// Parameters for resources/read request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadResourceParams {
    /// URI of the resource to read.
    pub uri: String,
}

/// Result of resources/read request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadResourceResult {
    #[serde(
        rename = "_meta",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub meta: Option<Map<String, Value>>,

    /// Resource contents.
    pub resource: BlobResourceContents,
}

impl ReadResourceResult {
    pub fn new(resource: BlobResourceContents) -> Self {
        Self {
            meta: None,
            resource,
        }
    }
}

/// Result of resources/list request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ListResourcesResult {
    /// Available resources.
    pub resources: Vec<ResourceInfo>,

    /// Pagination cursor for next page.
    #[serde(
        rename = "nextCursor",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub next_cursor: Option<String>,
}

impl ListResourcesResult {
    /// Create a result with all resources (no pagination).
    pub fn all(resources: Vec<ResourceInfo>) -> Self {
        Self {
            resources,
            next_cursor: None,
        }
    }
}

/// Result of resources/templates/list request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ListResourceTemplatesResult {
    /// Available resource templates.
    #[serde(rename = "resourceTemplates")]
    pub resource_templates: Vec<ResourceTemplateInfo>,

    /// Pagination cursor for next page.
    #[serde(
        rename = "nextCursor",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub next_cursor: Option<String>,
}

impl ListResourceTemplatesResult {
    /// Create a result with all templates (no pagination).
    pub fn all(templates: Vec<ResourceTemplateInfo>) -> Self {
        Self {
            resource_templates: templates,
            next_cursor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_info_has_no_mime_alias() {
        let resource = ResourceInfo {
            uri: "weather://current".to_string(),
            name: "current".to_string(),
            description: String::new(),
            mime_type: Some(DEFAULT_RESOURCE_MIME_TYPE.to_string()),
        };

        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["mime_type"], "application/json");
        assert!(json.get("mimeType").is_none());
    }

    #[test]
    fn test_resource_template_wire_names() {
        let template = ResourceTemplateInfo {
            uri_template: "weather://{city}".to_string(),
            name: "city-weather".to_string(),
            description: "Weather by city".to_string(),
            mime_type: default_mime_type(),
        };

        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["uriTemplate"], "weather://{city}");
        assert_eq!(json["mimeType"], "application/json");
        assert!(json.get("uri_template").is_none());
    }

    #[test]
    fn test_read_resource_result() {
        let result = ReadResourceResult::new(
            BlobResourceContents::new("weather://current", "c3Vubnk=").with_mime_type("text/plain"),
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["resource"]["uri"], "weather://current");
        assert_eq!(json["resource"]["mimeType"], "text/plain");
    }

    #[test]
    fn test_list_resources_result() {
        let result = ListResourcesResult::all(vec![]);

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["resources"].as_array().unwrap().is_empty());
        assert!(json.get("nextCursor").is_none());
    }
}
