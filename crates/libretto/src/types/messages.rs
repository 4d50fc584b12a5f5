//! Method-keyed Messages
//!
//! Every request and notification is identified by an exact `method` string.
//! Decoding is two-phase: the generic [`JsonRpcMessage`] is parsed first,
//! then `method` selects the params shape. An unknown method is reported as
//! [`ProtocolError::MethodNotFound`], never as a shape failure.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::completion::CompleteParams;
use super::error::{ProtocolError, SchemaError};
use super::jsonrpc::{JsonRpcMessage, RequestId};
use super::logging::{LogMessage, SetLevelParams};
use super::progress::{CancelledParams, ProgressParams};
use super::prompt::GetPromptParams;
use super::protocol::InitializeParams;
use super::resource::ReadResourceParams;
use super::sampling::CreateMessageParams;
use super::subscription::{ResourceUpdatedParams, SubscribeParams, UnsubscribeParams};
use super::tool::CallToolParams;

/// Method name literals.
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const PING: &str = "ping";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";
    pub const PROMPTS_LIST: &str = "prompts/list";
    pub const PROMPTS_GET: &str = "prompts/get";
    pub const RESOURCES_LIST: &str = "resources/list";
    pub const RESOURCES_TEMPLATES_LIST: &str = "resources/templates/list";
    pub const RESOURCES_READ: &str = "resources/read";
    pub const RESOURCES_SUBSCRIBE: &str = "resources/subscribe";
    pub const RESOURCES_UNSUBSCRIBE: &str = "resources/unsubscribe";
    pub const COMPLETION_COMPLETE: &str = "completion/complete";
    pub const LOGGING_SET_LEVEL: &str = "logging/setLevel";
    pub const ROOTS_LIST: &str = "roots/list";
    pub const SAMPLING_CREATE_MESSAGE: &str = "sampling/createMessage";

    pub const NOTIFY_INITIALIZED: &str = "notifications/initialized";
    pub const NOTIFY_CANCELLED: &str = "notifications/cancelled";
    pub const NOTIFY_PROGRESS: &str = "notifications/progress";
    pub const NOTIFY_MESSAGE: &str = "notifications/message";
    pub const NOTIFY_ROOTS_LIST_CHANGED: &str = "notifications/roots/list_changed";
    pub const NOTIFY_RESOURCE_UPDATED: &str = "notifications/resources/updated";
    pub const NOTIFY_RESOURCES_LIST_CHANGED: &str = "notifications/resources/list_changed";
    pub const NOTIFY_TOOLS_LIST_CHANGED: &str = "notifications/tools/list_changed";
    pub const NOTIFY_PROMPTS_LIST_CHANGED: &str = "notifications/prompts/list_changed";
}

use methods::*;

/// Params of every `*/list` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListParams {
    /// Opaque pagination cursor from a previous `nextCursor`.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub cursor: Option<String>,
}

impl ListParams {
    pub fn cursor(cursor: impl Into<String>) -> Self {
        Self {
            cursor: Some(cursor.into()),
        }
    }
}

/// A request sent by the client to the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientRequest {
    Initialize(InitializeParams),
    Ping,
    ListTools(ListParams),
    CallTool(CallToolParams),
    ListPrompts(ListParams),
    GetPrompt(GetPromptParams),
    ListResources(ListParams),
    ListResourceTemplates(ListParams),
    ReadResource(ReadResourceParams),
    Subscribe(SubscribeParams),
    Unsubscribe(UnsubscribeParams),
    Complete(CompleteParams),
    SetLevel(SetLevelParams),
}

impl ClientRequest {
    pub const METHODS: &'static [&'static str] = &[
        INITIALIZE,
        PING,
        TOOLS_LIST,
        TOOLS_CALL,
        PROMPTS_LIST,
        PROMPTS_GET,
        RESOURCES_LIST,
        RESOURCES_TEMPLATES_LIST,
        RESOURCES_READ,
        RESOURCES_SUBSCRIBE,
        RESOURCES_UNSUBSCRIBE,
        COMPLETION_COMPLETE,
        LOGGING_SET_LEVEL,
    ];

    pub fn method(&self) -> &'static str {
        match self {
            ClientRequest::Initialize(_) => INITIALIZE,
            ClientRequest::Ping => PING,
            ClientRequest::ListTools(_) => TOOLS_LIST,
            ClientRequest::CallTool(_) => TOOLS_CALL,
            ClientRequest::ListPrompts(_) => PROMPTS_LIST,
            ClientRequest::GetPrompt(_) => PROMPTS_GET,
            ClientRequest::ListResources(_) => RESOURCES_LIST,
            ClientRequest::ListResourceTemplates(_) => RESOURCES_TEMPLATES_LIST,
            ClientRequest::ReadResource(_) => RESOURCES_READ,
            ClientRequest::Subscribe(_) => RESOURCES_SUBSCRIBE,
            ClientRequest::Unsubscribe(_) => RESOURCES_UNSUBSCRIBE,
            ClientRequest::Complete(_) => COMPLETION_COMPLETE,
            ClientRequest::SetLevel(_) => LOGGING_SET_LEVEL,
        }
    }

    /// Parse method-specific params.
    pub fn parse(method: &str, params: Option<Value>) -> Result<Self, ProtocolError> {
        let request = match method {
            INITIALIZE => ClientRequest::Initialize(required(method, params)?),
            PING => {
                optional::<Map<String, Value>>(method, params)?;
                ClientRequest::Ping
            }
            TOOLS_LIST => ClientRequest::ListTools(optional(method, params)?),
            TOOLS_CALL => ClientRequest::CallTool(required(method, params)?),
            PROMPTS_LIST => ClientRequest::ListPrompts(optional(method, params)?),
            PROMPTS_GET => ClientRequest::GetPrompt(required(method, params)?),
            RESOURCES_LIST => ClientRequest::ListResources(optional(method, params)?),
            RESOURCES_TEMPLATES_LIST => {
                ClientRequest::ListResourceTemplates(optional(method, params)?)
            }
            RESOURCES_READ => ClientRequest::ReadResource(required(method, params)?),
            RESOURCES_SUBSCRIBE => ClientRequest::Subscribe(required(method, params)?),
            RESOURCES_UNSUBSCRIBE => ClientRequest::Unsubscribe(required(method, params)?),
            COMPLETION_COMPLETE => ClientRequest::Complete(required(method, params)?),
            LOGGING_SET_LEVEL => ClientRequest::SetLevel(required(method, params)?),
            other => return Err(ProtocolError::method_not_found(other)),
        };
        Ok(request)
    }

    /// Serialize the params payload, `None` for parameterless methods.
    pub fn to_params(&self) -> Result<Option<Value>, ProtocolError> {
        match self {
            ClientRequest::Initialize(p) => to_params(p),
            ClientRequest::Ping => Ok(None),
            ClientRequest::ListTools(p)
            | ClientRequest::ListPrompts(p)
            | ClientRequest::ListResources(p)
            | ClientRequest::ListResourceTemplates(p) => to_params(p),
            ClientRequest::CallTool(p) => to_params(p),
            ClientRequest::GetPrompt(p) => to_params(p),
            ClientRequest::ReadResource(p) => to_params(p),
            ClientRequest::Subscribe(p) => to_params(p),
            ClientRequest::Unsubscribe(p) => to_params(p),
            ClientRequest::Complete(p) => to_params(p),
            ClientRequest::SetLevel(p) => to_params(p),
        }
    }
}

/// A request sent by the server to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerRequest {
    Ping,
    ListRoots(ListParams),
    CreateMessage(CreateMessageParams),
}

impl ServerRequest {
    pub const METHODS: &'static [&'static str] = &[PING, ROOTS_LIST, SAMPLING_CREATE_MESSAGE];

    pub fn method(&self) -> &'static str {
        match self {
            ServerRequest::Ping => PING,
            ServerRequest::ListRoots(_) => ROOTS_LIST,
            ServerRequest::CreateMessage(_) => SAMPLING_CREATE_MESSAGE,
        }
    }

    pub fn parse(method: &str, params: Option<Value>) -> Result<Self, ProtocolError> {
        match method {
            PING => {
                optional::<Map<String, Value>>(method, params)?;
                Ok(ServerRequest::Ping)
            }
            ROOTS_LIST => Ok(ServerRequest::ListRoots(optional(method, params)?)),
            SAMPLING_CREATE_MESSAGE => Ok(ServerRequest::CreateMessage(required(method, params)?)),
            other => Err(ProtocolError::method_not_found(other)),
        }
    }

    pub fn to_params(&self) -> Result<Option<Value>, ProtocolError> {
        match self {
            ServerRequest::Ping => Ok(None),
            ServerRequest::ListRoots(p) => to_params(p),
            ServerRequest::CreateMessage(p) => to_params(p),
        }
    }

    /// Wrap into a request envelope with the given id.
    pub fn to_message(&self, id: impl Into<RequestId>) -> Result<JsonRpcMessage, ProtocolError> {
        Ok(JsonRpcMessage::request(id, self.method(), self.to_params()?))
    }
}

/// A notification in either direction.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Initialized,
    Cancelled(CancelledParams),
    Progress(ProgressParams),
    Message(LogMessage),
    RootsListChanged,
    ResourceUpdated(ResourceUpdatedParams),
    ResourcesListChanged,
    ToolsListChanged,
    PromptsListChanged,
}

impl Notification {
    pub const METHODS: &'static [&'static str] = &[
        NOTIFY_INITIALIZED,
        NOTIFY_CANCELLED,
        NOTIFY_PROGRESS,
        NOTIFY_MESSAGE,
        NOTIFY_ROOTS_LIST_CHANGED,
        NOTIFY_RESOURCE_UPDATED,
        NOTIFY_RESOURCES_LIST_CHANGED,
        NOTIFY_TOOLS_LIST_CHANGED,
        NOTIFY_PROMPTS_LIST_CHANGED,
    ];

    pub fn method(&self) -> &'static str {
        match self {
            Notification::Initialized => NOTIFY_INITIALIZED,
            Notification::Cancelled(_) => NOTIFY_CANCELLED,
            Notification::Progress(_) => NOTIFY_PROGRESS,
            Notification::Message(_) => NOTIFY_MESSAGE,
            Notification::RootsListChanged => NOTIFY_ROOTS_LIST_CHANGED,
            Notification::ResourceUpdated(_) => NOTIFY_RESOURCE_UPDATED,
            Notification::ResourcesListChanged => NOTIFY_RESOURCES_LIST_CHANGED,
            Notification::ToolsListChanged => NOTIFY_TOOLS_LIST_CHANGED,
            Notification::PromptsListChanged => NOTIFY_PROMPTS_LIST_CHANGED,
        }
    }

    pub fn parse(method: &str, params: Option<Value>) -> Result<Self, ProtocolError> {
        let unit = |notification: Notification| -> Result<Notification, ProtocolError> {
            optional::<Map<String, Value>>(method, params.clone())?;
            Ok(notification)
        };

        match method {
            NOTIFY_INITIALIZED => unit(Notification::Initialized),
            NOTIFY_CANCELLED => Ok(Notification::Cancelled(required(method, params)?)),
            NOTIFY_PROGRESS => Ok(Notification::Progress(required(method, params)?)),
            NOTIFY_MESSAGE => Ok(Notification::Message(required(method, params)?)),
            NOTIFY_ROOTS_LIST_CHANGED => unit(Notification::RootsListChanged),
            NOTIFY_RESOURCE_UPDATED => Ok(Notification::ResourceUpdated(required(method, params)?)),
            NOTIFY_RESOURCES_LIST_CHANGED => unit(Notification::ResourcesListChanged),
            NOTIFY_TOOLS_LIST_CHANGED => unit(Notification::ToolsListChanged),
            NOTIFY_PROMPTS_LIST_CHANGED => unit(Notification::PromptsListChanged),
            other => Err(ProtocolError::method_not_found(other)),
        }
    }

    pub fn to_params(&self) -> Result<Option<Value>, ProtocolError> {
        match self {
            Notification::Cancelled(p) => to_params(p),
            Notification::Progress(p) => to_params(p),
            Notification::Message(p) => to_params(p),
            Notification::ResourceUpdated(p) => to_params(p),
            Notification::Initialized
            | Notification::RootsListChanged
            | Notification::ResourcesListChanged
            | Notification::ToolsListChanged
            | Notification::PromptsListChanged => Ok(None),
        }
    }

    pub fn to_message(&self) -> Result<JsonRpcMessage, ProtocolError> {
        Ok(JsonRpcMessage::notification(self.method(), self.to_params()?))
    }
}

/// A fully decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Request { id: RequestId, request: ClientRequest },
    Notification(Notification),
}

impl Envelope {
    pub fn method(&self) -> &'static str {
        match self {
            Envelope::Request { request, .. } => request.method(),
            Envelope::Notification(notification) => notification.method(),
        }
    }

    pub fn id(&self) -> Option<&RequestId> {
        match self {
            Envelope::Request { id, .. } => Some(id),
            Envelope::Notification(_) => None,
        }
    }

    /// Second decode phase: dispatch on `method` to the typed shape.
    pub fn from_message(message: JsonRpcMessage) -> Result<Self, ProtocolError> {
        let JsonRpcMessage {
            id, method, params, ..
        } = message;

        match id {
            Some(id) => {
                if Notification::METHODS.contains(&method.as_str()) {
                    return Err(SchemaError::envelope(format!(
                        "notification '{}' must not carry an id",
                        method
                    ))
                    .into());
                }
                let request = ClientRequest::parse(&method, params)?;
                Ok(Envelope::Request { id, request })
            }
            None => {
                if ClientRequest::METHODS.contains(&method.as_str()) {
                    return Err(SchemaError::envelope(format!(
                        "request '{}' requires an id",
                        method
                    ))
                    .into());
                }
                Ok(Envelope::Notification(Notification::parse(&method, params)?))
            }
        }
    }

    pub fn to_message(&self) -> Result<JsonRpcMessage, ProtocolError> {
        match self {
            Envelope::Request { id, request } => Ok(JsonRpcMessage::request(
                id.clone(),
                request.method(),
                request.to_params()?,
            )),
            Envelope::Notification(notification) => notification.to_message(),
        }
    }
}

fn required<T: DeserializeOwned>(method: &str, params: Option<Value>) -> Result<T, ProtocolError> {
    match params {
        None | Some(Value::Null) => {
            Err(SchemaError::params(format!("'{}' requires params", method)).into())
        }
        Some(params) => decode(method, params),
    }
}

fn optional<T: DeserializeOwned + Default>(
    method: &str,
    params: Option<Value>,
) -> Result<T, ProtocolError> {
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(params) => decode(method, params),
    }
}

fn decode<T: DeserializeOwned>(method: &str, params: Value) -> Result<T, ProtocolError> {
    if !params.is_object() {
        return Err(SchemaError::params(format!("'{}' params must be an object", method)).into());
    }
    serde_json::from_value(params)
        .map_err(|e| SchemaError::params(format!("'{}': {}", method, e)).into())
}

fn to_params<T: Serialize>(params: &T) -> Result<Option<Value>, ProtocolError> {
    serde_json::to_value(params)
        .map(Some)
        .map_err(|e| SchemaError::params(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_call_tool() {
        let request = ClientRequest::parse(
            TOOLS_CALL,
            Some(json!({ "name": "get_weather", "arguments": { "city": "Tokyo" } })),
        )
        .unwrap();

        match request {
            ClientRequest::CallTool(params) => assert_eq!(params.name, "get_weather"),
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_method_is_method_not_found() {
        let err = ClientRequest::parse("tools/explode", None).unwrap_err();
        assert!(matches!(err, ProtocolError::MethodNotFound { method } if method == "tools/explode"));
    }

    #[test]
    fn test_bad_params_is_schema_error() {
        let err = ClientRequest::parse(TOOLS_CALL, Some(json!({ "arguments": {} }))).unwrap_err();
        assert!(matches!(err, ProtocolError::Schema(_)));

        let err = ClientRequest::parse(TOOLS_CALL, None).unwrap_err();
        assert!(matches!(err, ProtocolError::Schema(_)));

        let err = ClientRequest::parse(TOOLS_LIST, Some(json!([1, 2]))).unwrap_err();
        assert!(matches!(err, ProtocolError::Schema(_)));
    }

    #[test]
    fn test_list_params_optional() {
        let request = ClientRequest::parse(TOOLS_LIST, None).unwrap();
        assert_eq!(request, ClientRequest::ListTools(ListParams::default()));

        let request = ClientRequest::parse(PROMPTS_LIST, Some(json!({ "cursor": "2" }))).unwrap();
        assert_eq!(request, ClientRequest::ListPrompts(ListParams::cursor("2")));
    }

    #[test]
    fn test_every_client_method_has_a_literal() {
        for method in ClientRequest::METHODS {
            let result = ClientRequest::parse(method, Some(json!({})));
            assert!(
                !matches!(result, Err(ProtocolError::MethodNotFound { .. })),
                "{} not dispatched",
                method
            );
        }
    }

    #[test]
    fn test_notification_parse() {
        let notification = Notification::parse(NOTIFY_INITIALIZED, None).unwrap();
        assert_eq!(notification, Notification::Initialized);

        let notification = Notification::parse(
            NOTIFY_CANCELLED,
            Some(json!({ "requestId": 3, "reason": "timeout" })),
        )
        .unwrap();
        assert_eq!(notification.method(), NOTIFY_CANCELLED);
    }

    #[test]
    fn test_envelope_requires_id_for_requests() {
        let message = JsonRpcMessage::notification(TOOLS_LIST, None);
        let err = Envelope::from_message(message).unwrap_err();
        assert!(matches!(err, ProtocolError::Schema(_)));

        let message = JsonRpcMessage::request(1, NOTIFY_INITIALIZED, None);
        assert!(Envelope::from_message(message).is_err());
    }

    #[test]
    fn test_server_request_message() {
        let message = ServerRequest::ListRoots(ListParams::default())
            .to_message(5)
            .unwrap();
        assert_eq!(message.method, ROOTS_LIST);
        assert_eq!(message.id, Some(RequestId::Number(5)));

        let parsed = ServerRequest::parse(&message.method, message.params).unwrap();
        assert_eq!(parsed, ServerRequest::ListRoots(ListParams::default()));
    }
}
