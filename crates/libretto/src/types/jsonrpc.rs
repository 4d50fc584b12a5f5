//! JSON-RPC 2.0 Types
//!
//! Envelope primitives as used by MCP. Envelopes are strict: unknown
//! top-level fields are rejected so that protocol drift shows up early.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{ErrorData, ProtocolError, SchemaError, SchemaLocation};

/// The only JSON-RPC version this crate speaks.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC version constant - always "2.0".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonRpcVersion;

impl Serialize for JsonRpcVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(JSONRPC_VERSION)
    }
}

impl<'de> Deserialize<'de> for JsonRpcVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == JSONRPC_VERSION {
            Ok(JsonRpcVersion)
        } else {
            Err(serde::de::Error::custom(format!(
                "expected JSON-RPC version '{}', got '{}'",
                JSONRPC_VERSION, s
            )))
        }
    }
}

/// Request ID - can be a string or integer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        RequestId::String(s)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

/// A generic JSON-RPC request or notification, before method dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonRpcMessage {
    pub jsonrpc: JsonRpcVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcMessage {
    /// Create a request (has an id).
    pub fn request(id: impl Into<RequestId>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            id: Some(id.into()),
            method: method.into(),
            params,
        }
    }

    /// Create a notification (no id).
    pub fn notification(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            id: None,
            method: method.into(),
            params,
        }
    }

    /// Returns true if this is a notification (no id).
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Returns true if this is a request (has id).
    pub fn is_request(&self) -> bool {
        self.id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Result(Value),
    Error(ErrorData),
}

/// A JSON-RPC response carrying exactly one of `result` or `error`.
///
/// The two are exclusive by construction; there is no way to build a
/// response holding both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ResponseWire", try_from = "ResponseWire")]
pub struct McpResponse {
    id: Option<RequestId>,
    outcome: Outcome,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResponseWire {
    jsonrpc: JsonRpcVersion,
    #[serde(default)]
    id: Option<RequestId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ErrorData>,
}

impl From<McpResponse> for ResponseWire {
    fn from(response: McpResponse) -> Self {
        let (result, error) = match response.outcome {
            Outcome::Result(value) => (Some(value), None),
            Outcome::Error(error) => (None, Some(error)),
        };
        Self {
            jsonrpc: JsonRpcVersion,
            id: response.id,
            result,
            error,
        }
    }
}

impl TryFrom<ResponseWire> for McpResponse {
    type Error = ProtocolError;

    fn try_from(wire: ResponseWire) -> Result<Self, Self::Error> {
        McpResponse::from_parts(wire.id, wire.result, wire.error)
    }
}

impl McpResponse {
    /// Create a successful response.
    pub fn success(id: impl Into<RequestId>, result: Value) -> Self {
        Self {
            id: Some(id.into()),
            outcome: Outcome::Result(result),
        }
    }

    /// Create a successful response with an empty result object.
    pub fn empty(id: impl Into<RequestId>) -> Self {
        Self::success(id, Value::Object(Map::new()))
    }

    /// Create an error response. `id` is `None` when the request id could
    /// not be determined.
    pub fn error(id: Option<RequestId>, error: ErrorData) -> Self {
        Self {
            id,
            outcome: Outcome::Error(error),
        }
    }

    /// Assemble a response from optional parts.
    ///
    /// Both present is rejected. Neither present yields an empty result object.
    pub fn from_parts(
        id: Option<RequestId>,
        result: Option<Value>,
        error: Option<ErrorData>,
    ) -> Result<Self, ProtocolError> {
        let outcome = match (result, error) {
            (Some(_), Some(_)) => {
                return Err(SchemaError::new(
                    SchemaLocation::Envelope,
                    "response carries both `result` and `error`",
                )
                .into())
            }
            (Some(result), None) => Outcome::Result(result),
            (None, Some(error)) => Outcome::Error(error),
            (None, None) => Outcome::Result(Value::Object(Map::new())),
        };
        Ok(Self { id, outcome })
    }

    pub fn id(&self) -> Option<&RequestId> {
        self.id.as_ref()
    }

    /// True iff this response carries an error.
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    pub fn error_data(&self) -> Option<&ErrorData> {
        match &self.outcome {
            Outcome::Error(error) => Some(error),
            Outcome::Result(_) => None,
        }
    }

    /// Split into the id and either the result or the error.
    pub fn into_result(self) -> (Option<RequestId>, Result<Value, ErrorData>) {
        let outcome = match self.outcome {
            Outcome::Result(value) => Ok(value),
            Outcome::Error(error) => Err(error),
        };
        (self.id, outcome)
    }
}
