//! MCP Error Types
//!
//! `ErrorData` is the wire error object carried in a response's `error` field.
//! `ProtocolError` is the failure taxonomy of the codec and the argument
//! synthesizer; every variant converts into an `ErrorData` at the envelope
//! boundary.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// JSON-RPC error data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorData {
    /// The error code.
    pub code: i32,

    /// A short description of the error.
    pub message: String,

    /// Additional error data (optional).
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub data: Option<Value>,
}

impl ErrorData {
    // JSON-RPC 2.0 standard error codes
    // https://www.jsonrpc.org/specification#error_object

    /// Parse error - Invalid JSON was received.
    pub const PARSE_ERROR: i32 = -32700;

    /// Invalid Request - The JSON sent is not a valid Request object.
    pub const INVALID_REQUEST: i32 = -32600;

    /// Method not found - The method does not exist / is not available.
    pub const METHOD_NOT_FOUND: i32 = -32601;

    /// Invalid params - Invalid method parameter(s).
    pub const INVALID_PARAMS: i32 = -32602;

    /// Internal error - Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i32 = -32603;

    /// Create a new error with code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create a new error with additional data.
    pub fn with_data(code: i32, message: impl Into<String>, data: Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create a parse error.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(Self::PARSE_ERROR, message)
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_REQUEST, message)
    }

    /// Create a method not found error.
    pub fn method_not_found(method: &str) -> Self {
        Self::with_data(
            Self::METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
            json!({ "method": method }),
        )
    }

    /// Create an invalid params error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_PARAMS, message)
    }

    /// Create an internal error.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL_ERROR, message)
    }

    /// Create a tool not found error.
    pub fn tool_not_found(name: &str) -> Self {
        Self::new(Self::METHOD_NOT_FOUND, format!("Tool not found: {}", name))
    }

    /// Create a resource not found error.
    pub fn resource_not_found(uri: &str) -> Self {
        Self::new(Self::INVALID_PARAMS, format!("Resource not found: {}", uri))
    }

    /// Create a prompt not found error.
    pub fn prompt_not_found(name: &str) -> Self {
        Self::new(Self::INVALID_PARAMS, format!("Prompt not found: {}", name))
    }
}

impl std::fmt::Display for ErrorData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorData {}

/// Where in a message a schema failure was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaLocation {
    /// The outer JSON-RPC object.
    Envelope,
    /// A method's `params` payload.
    Params,
    /// A content block inside a result or message.
    Content,
    /// A response's `result` payload.
    Result,
}

impl std::fmt::Display for SchemaLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SchemaLocation::Envelope => "envelope",
            SchemaLocation::Params => "params",
            SchemaLocation::Content => "content",
            SchemaLocation::Result => "result",
        };
        f.write_str(name)
    }
}

/// A payload that is malformed or whose discriminator disagrees with its shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {location}: {message}")]
pub struct SchemaError {
    pub location: SchemaLocation,
    pub message: String,
}

impl SchemaError {
    pub fn new(location: SchemaLocation, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }

    pub fn envelope(message: impl Into<String>) -> Self {
        Self::new(SchemaLocation::Envelope, message)
    }

    pub fn params(message: impl Into<String>) -> Self {
        Self::new(SchemaLocation::Params, message)
    }

    pub fn content(message: impl Into<String>) -> Self {
        Self::new(SchemaLocation::Content, message)
    }
}

/// A single argument or constrained-value failure.
///
/// Every variant names the offending field so that a client can point at it.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("missing required argument '{field}' (expected {expected})")]
    MissingArgument { field: String, expected: String },

    #[error("argument '{field}' expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("'{field}' must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unexpected argument '{field}'")]
    UnexpectedArgument { field: String },
}

impl ValidationError {
    /// Name of the field this error is about.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingArgument { field, .. }
            | ValidationError::TypeMismatch { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::UnexpectedArgument { field } => field,
        }
    }
}

/// Everything that can go wrong while decoding, validating or encoding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProtocolError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("method not found: {method}")]
    MethodNotFound { method: String },

    #[error("invalid arguments: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    #[error("unsupported JSON-RPC version '{found}', expected '2.0'")]
    ProtocolVersionMismatch { found: String },
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ProtocolError {
    pub fn method_not_found(method: impl Into<String>) -> Self {
        ProtocolError::MethodNotFound {
            method: method.into(),
        }
    }

    /// Names of the fields involved in a validation failure, in report order.
    pub fn offending_fields(&self) -> Vec<&str> {
        match self {
            ProtocolError::Validation(errors) => errors.iter().map(|e| e.field()).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<ValidationError> for ProtocolError {
    fn from(error: ValidationError) -> Self {
        ProtocolError::Validation(vec![error])
    }
}

impl From<ProtocolError> for ErrorData {
    fn from(error: ProtocolError) -> Self {
        let message = error.to_string();
        match error {
            ProtocolError::Schema(SchemaError {
                location: SchemaLocation::Envelope,
                ..
            }) => ErrorData::invalid_request(message),
            ProtocolError::Schema(_) => ErrorData::invalid_params(message),
            ProtocolError::MethodNotFound { method } => ErrorData::method_not_found(&method),
            ProtocolError::Validation(errors) => ErrorData::with_data(
                ErrorData::INVALID_PARAMS,
                message,
                json!({ "errors": errors }),
            ),
            ProtocolError::ProtocolVersionMismatch { found } => ErrorData::with_data(
                ErrorData::INVALID_REQUEST,
                message,
                json!({ "expected": "2.0", "found": found }),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorData::PARSE_ERROR, -32700);
        assert_eq!(ErrorData::INVALID_REQUEST, -32600);
        assert_eq!(ErrorData::METHOD_NOT_FOUND, -32601);
        assert_eq!(ErrorData::INVALID_PARAMS, -32602);
        assert_eq!(ErrorData::INTERNAL_ERROR, -32603);
    }

    #[test]
    fn test_error_serialization() {
        let error = ErrorData::internal_error("boom");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["code"], -32603);
        assert_eq!(json["message"], "boom");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_error_roundtrip() {
        let original = ErrorData::with_data(
            ErrorData::INVALID_PARAMS,
            "Missing required field",
            json!({ "field": "name" }),
        );
        let json = serde_json::to_string(&original).unwrap();
        let parsed: ErrorData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, original);
    }

    #[test]
    fn test_method_not_found_is_distinct_from_schema() {
        let not_found: ErrorData = ProtocolError::method_not_found("tools/explode").into();
        assert_eq!(not_found.code, ErrorData::METHOD_NOT_FOUND);
        assert_eq!(not_found.data.unwrap()["method"], "tools/explode");

        let schema: ErrorData = ProtocolError::from(SchemaError::params("bad shape")).into();
        assert_eq!(schema.code, ErrorData::INVALID_PARAMS);

        let envelope: ErrorData = ProtocolError::from(SchemaError::envelope("bad shape")).into();
        assert_eq!(envelope.code, ErrorData::INVALID_REQUEST);
    }

    #[test]
    fn test_validation_error_data_names_fields() {
        let error = ProtocolError::Validation(vec![
            ValidationError::MissingArgument {
                field: "name".to_string(),
                expected: "string".to_string(),
            },
            ValidationError::UnexpectedArgument {
                field: "extra".to_string(),
            },
        ]);
        assert_eq!(error.offending_fields(), vec!["name", "extra"]);

        let data: ErrorData = error.into();
        assert_eq!(data.code, ErrorData::INVALID_PARAMS);
        let errors = &data.data.unwrap()["errors"];
        assert_eq!(errors[0]["kind"], "missing_argument");
        assert_eq!(errors[0]["field"], "name");
        assert_eq!(errors[1]["kind"], "unexpected_argument");
        assert_eq!(errors[1]["field"], "extra");
    }

    #[test]
    fn test_version_mismatch_maps_to_invalid_request() {
        let data: ErrorData = ProtocolError::ProtocolVersionMismatch {
            found: "1.0".to_string(),
        }
        .into();
        assert_eq!(data.code, ErrorData::INVALID_REQUEST);
        assert!(data.message.contains("1.0"));
    }
}
