//! Envelope Codec
//!
//! Decodes raw JSON values into typed envelopes and encodes typed values back
//! onto the wire. Field aliasing is carried by the serde attributes of each
//! type; this module adds the envelope checks (version tag, strict shape,
//! method dispatch) and the compact/strict omission policy.
//!
//! Optional fields are declared with
//! `skip_serializing_if = "crate::codec::omit_none"` (or `omit_false` for
//! flags). Those predicates consult the mode of the encode call in progress,
//! so a single set of derives serves both modes.

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::content::Content;
use crate::types::error::{ProtocolError, SchemaError, SchemaLocation};
use crate::types::jsonrpc::{JsonRpcMessage, McpResponse, RequestId, JSONRPC_VERSION};
use crate::types::messages::Envelope;

/// Whether default-valued optional fields are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeMode {
    /// Omit absent optionals and `false` flags.
    #[default]
    Compact,
    /// Always write every field, as `null` or `false` when unset.
    Strict,
}

impl fmt::Display for EncodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeMode::Compact => f.write_str("compact"),
            EncodeMode::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for EncodeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(EncodeMode::Compact),
            "strict" => Ok(EncodeMode::Strict),
            other => Err(format!(
                "unknown encode mode '{}', expected 'compact' or 'strict'",
                other
            )),
        }
    }
}

thread_local! {
    static MODE: Cell<EncodeMode> = const { Cell::new(EncodeMode::Compact) };
}

/// Restores the previous mode when dropped, including on panic.
struct ModeGuard(EncodeMode);

impl Drop for ModeGuard {
    fn drop(&mut self) {
        MODE.with(|mode| mode.set(self.0));
    }
}

/// Run `f` with `mode` as the active omission policy on this thread.
pub(crate) fn with_mode<R>(mode: EncodeMode, f: impl FnOnce() -> R) -> R {
    let previous = MODE.with(|current| current.replace(mode));
    let _guard = ModeGuard(previous);
    f()
}

fn compact() -> bool {
    MODE.with(|mode| mode.get()) == EncodeMode::Compact
}

pub(crate) fn omit_none<T>(value: &Option<T>) -> bool {
    value.is_none() && compact()
}

pub(crate) fn omit_false(value: &bool) -> bool {
    !*value && compact()
}

/// Decode a raw inbound request or notification.
///
/// Phase one checks the version tag and the strict envelope shape; phase two
/// dispatches on `method` to the typed params.
pub fn decode_envelope(raw: Value) -> Result<Envelope, ProtocolError> {
    check_version(&raw)?;

    let message: JsonRpcMessage =
        serde_json::from_value(raw).map_err(|e| SchemaError::envelope(e.to_string()))?;

    Envelope::from_message(message)
}

/// Decode a raw response envelope.
pub fn decode_response(raw: Value) -> Result<McpResponse, ProtocolError> {
    check_version(&raw)?;

    serde_json::from_value(raw).map_err(|e| SchemaError::envelope(e.to_string()).into())
}

/// Decode a response `result` payload into its method-specific shape.
pub fn decode_result<T: DeserializeOwned>(result: &Value) -> Result<T, ProtocolError> {
    T::deserialize(result)
        .map_err(|e| SchemaError::new(SchemaLocation::Result, e.to_string()).into())
}

/// Decode a single content block.
pub fn decode_content(raw: &Value) -> Result<Content, ProtocolError> {
    Ok(Content::decode(raw)?)
}

/// Encode any wire type under the given omission policy.
pub fn encode<T: Serialize + ?Sized>(value: &T, mode: EncodeMode) -> Result<Value, ProtocolError> {
    with_mode(mode, || serde_json::to_value(value))
        .map_err(|e| SchemaError::new(SchemaLocation::Result, e.to_string()).into())
}

/// Encode a typed envelope, params included, under the given policy.
pub fn encode_envelope(envelope: &Envelope, mode: EncodeMode) -> Result<Value, ProtocolError> {
    with_mode(mode, || {
        let message = envelope.to_message()?;
        serde_json::to_value(&message).map_err(|e| SchemaError::envelope(e.to_string()).into())
    })
}

/// Best-effort extraction of the request id from an undecodable message,
/// so that the error response can still be correlated.
pub fn request_id_of(raw: &Value) -> Option<RequestId> {
    raw.get("id")
        .and_then(|id| RequestId::deserialize(id).ok())
}

fn check_version(raw: &Value) -> Result<(), ProtocolError> {
    let object = raw
        .as_object()
        .ok_or_else(|| SchemaError::envelope("message must be a JSON object"))?;

    match object.get("jsonrpc") {
        None => Err(SchemaError::envelope("missing `jsonrpc` version tag").into()),
        Some(Value::String(version)) if version == JSONRPC_VERSION => Ok(()),
        Some(Value::String(version)) => Err(ProtocolError::ProtocolVersionMismatch {
            found: version.clone(),
        }),
        Some(other) => Err(ProtocolError::ProtocolVersionMismatch {
            found: other.to_string(),
        }),
    }
}
