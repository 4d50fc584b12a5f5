//! Tool Types
//!
//! Types for MCP tool descriptors and call results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::Content;

/// A tool descriptor as listed by `tools/list`.
///
/// Built from a registered signature, see [`ToolInfo::from_signature`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ToolInfo {
    /// Programmatic name of the tool.
    pub name: String,

    /// Description for the LLM.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub description: Option<String>,

    /// JSON Schema for input parameters.
    #[serde(rename = "inputSchema")]
    pub input_schema: ToolSchema,
}

/// JSON Schema for tool input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolSchema {
    /// Always "object" for tool schemas.
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Property definitions.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub properties: Option<Map<String, Value>>,

    /// Required property names.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub required: Option<Vec<String>>,

    /// Whether properties beyond `properties` are accepted.
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub additional_properties: Option<bool>,
}

impl ToolSchema {
    /// Create an empty schema (no parameters).
    pub fn empty() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: None,
            required: None,
            additional_properties: None,
        }
    }

    /// Names of the required properties, empty when none are declared.
    pub fn required_names(&self) -> &[String] {
        self.required.as_deref().unwrap_or(&[])
    }
}

impl Default for ToolSchema {
    fn default() -> Self {
        Self::empty()
    }
}

/// Parameters for tools/call request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallToolParams {
    /// Name of the tool to call.
    pub name: String,

    /// Arguments to pass to the tool.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub arguments: Option<Map<String, Value>>,
}

/// Result of a tool call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CallToolResult {
    #[serde(
        rename = "_meta",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub meta: Option<Map<String, Value>>,

    /// Content blocks representing the result.
    pub content: Vec<Content>,

    /// Whether the tool call resulted in an error.
    #[serde(
        rename = "isError",
        default,
        skip_serializing_if = "crate::codec::omit_false"
    )]
    pub is_error: bool,
}

impl CallToolResult {
    /// Create a successful result with content.
    pub fn success(content: Vec<Content>) -> Self {
        Self {
            meta: None,
            content,
            is_error: false,
        }
    }

    /// Create a successful result with a single text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::success(vec![Content::text(text)])
    }

    /// Create an error result.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            meta: None,
            content: vec![Content::text(message)],
            is_error: true,
        }
    }
}

/// Result of tools/list request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ListToolsResult {
    /// Available tools.
    pub tools: Vec<ToolInfo>,

    /// Pagination cursor for next page.
    #[serde(
        rename = "nextCursor",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub next_cursor: Option<String>,
}

impl ListToolsResult {
    /// Create a result with all tools (no pagination).
    pub fn all(tools: Vec<ToolInfo>) -> Self {
        Self {
            tools,
            next_cursor: None,
        }
    }
}
