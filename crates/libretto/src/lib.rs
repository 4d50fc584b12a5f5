//! libretto - MCP (Model Context Protocol) message model for Rust
//!
//! Typed wire shapes for the MCP 2024-11-05 protocol, a two-phase decoder
//! that tells protocol errors apart from schema errors, and argument schemas
//! synthesized from handler signatures.
//!
//! # Features
//!
//! - **Messages**: every request, result and notification as a serde type
//! - **Codec**: compact or strict encoding, strict decoding
//! - **Schemas**: describe a handler once, get `inputSchema`, prompt
//!   arguments and argument validation from it
//! - **Registry**: route decoded requests to tool, prompt and resource handlers
//!
//! # Example
//!
//! ```rust
//! use libretto::{CallToolResult, Implementation, ParamType, Registry, Signature};
//! use serde_json::json;
//!
//! let registry = Registry::new(Implementation::new("weather", "0.1.0")).tool(
//!     "get_weather",
//!     Signature::new("get_weather")
//!         .doc("Get the current weather for a city.")
//!         .param("city", ParamType::String),
//!     |args| {
//!         let city = args.str("city").unwrap_or_default();
//!         Ok(CallToolResult::text(format!("Sunny in {}", city)))
//!     },
//! );
//!
//! let response = registry
//!     .handle_message(json!({
//!         "jsonrpc": "2.0",
//!         "id": 1,
//!         "method": "tools/call",
//!         "params": { "name": "get_weather", "arguments": { "city": "Oslo" } },
//!     }))
//!     .unwrap();
//!
//! assert_eq!(response["result"]["content"][0]["text"], "Sunny in Oslo");
//! ```

pub mod codec;
pub mod config;
pub mod descriptor;
pub mod registry;
pub mod schema;
pub mod signature;
pub mod template;
pub mod types;

// Re-export commonly used types at crate root
pub use types::content::{BlobResourceContents, Content};
pub use types::error::{ErrorData, ProtocolError, SchemaError, SchemaLocation, ValidationError};
pub use types::jsonrpc::{JsonRpcMessage, McpResponse, RequestId};
pub use types::messages::{ClientRequest, Envelope, Notification, ServerRequest};
pub use types::prompt::{GetPromptResult, PromptArgument, PromptInfo, PromptMessage};
pub use types::protocol::{Implementation, ServerCapabilities, PROTOCOL_VERSION};
pub use types::resource::{ResourceInfo, ResourceTemplateInfo};
pub use types::tool::{CallToolResult, ToolInfo, ToolSchema};
pub use types::{Annotations, Role};

pub use codec::{decode_envelope, decode_response, encode, encode_envelope, EncodeMode};
pub use config::{ConfigError, RegistryConfig};
pub use registry::{Registry, RegistryError};
pub use schema::{synthesize_schema, ArgumentSchema, Arguments, FieldSpec};
pub use signature::{Parameter, ParamType, Signature};
pub use template::{TemplateError, UriTemplate};
