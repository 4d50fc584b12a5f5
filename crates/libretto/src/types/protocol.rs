//! MCP Protocol Types
//!
//! Types for the initialize handshake, capability negotiation and ping.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The MCP protocol version advertised by default.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server or client implementation info.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Implementation {
    /// Programmatic name of the implementation.
    pub name: String,

    /// Version string.
    pub version: String,
}

impl Implementation {
    /// Create a new implementation info.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Initialize request params from client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct InitializeParams {
    /// Protocol version the client supports.
    pub protocol_version: String,

    /// Client capabilities.
    #[serde(default)]
    pub capabilities: ClientCapabilities,

    /// Client implementation info.
    pub client_info: Implementation,
}

/// Initialize result from server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct InitializeResult {
    /// Protocol version the server wants to use.
    pub protocol_version: String,

    /// Server capabilities.
    pub capabilities: ServerCapabilities,

    /// Server implementation info.
    pub server_info: Implementation,

    /// Optional instructions for the LLM.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub instructions: Option<String>,
}

impl InitializeResult {
    /// Create a new initialize result.
    pub fn new(server_info: Implementation, capabilities: ServerCapabilities) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities,
            server_info,
            instructions: None,
        }
    }

    /// Override the advertised protocol version.
    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    /// Set instructions for the LLM.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

/// Client capabilities.
///
/// Capability payloads are open-ended objects; only their presence matters here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientCapabilities {
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub experimental: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub roots: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub sampling: Option<Map<String, Value>>,
}

/// Server capabilities.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServerCapabilities {
    /// Server offers tools.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub tools: Option<ListChangedCapability>,

    /// Server offers resources.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub resources: Option<ResourcesCapability>,

    /// Server offers prompts.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub prompts: Option<ListChangedCapability>,

    /// Server supports logging.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub logging: Option<Map<String, Value>>,

    /// Server supports completions.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub completions: Option<Map<String, Value>>,

    /// Experimental capabilities.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub experimental: Option<Map<String, Value>>,
}

impl ServerCapabilities {
    /// Enable tools.
    pub fn enable_tools(mut self) -> Self {
        self.tools = Some(ListChangedCapability::default());
        self
    }

    /// Enable resources.
    pub fn enable_resources(mut self) -> Self {
        self.resources = Some(ResourcesCapability::default());
        self
    }

    /// Enable prompts.
    pub fn enable_prompts(mut self) -> Self {
        self.prompts = Some(ListChangedCapability::default());
        self
    }

    /// Enable logging.
    pub fn enable_logging(mut self) -> Self {
        self.logging = Some(Map::new());
        self
    }

    /// Enable completions.
    pub fn enable_completions(mut self) -> Self {
        self.completions = Some(Map::new());
        self
    }
}

/// Capability for a listing that may announce changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ListChangedCapability {
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub list_changed: Option<bool>,
}

/// Resources capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ResourcesCapability {
    /// Server supports resource list changed notifications.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub list_changed: Option<bool>,

    /// Server supports resource subscriptions.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub subscribe: Option<bool>,
}

/// Result of ping, and of any request that succeeds without a payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmptyResult {
    #[serde(
        rename = "_meta",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub meta: Option<Map<String, Value>>,
}
