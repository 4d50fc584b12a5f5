//! Handler Registry and Dispatch
//!
//! Maps tool, prompt and resource names to handlers plus their synthesized
//! argument schemas, and routes decoded requests to them.
//!
//! Dispatch follows the OpenTelemetry JSON-RPC semantic conventions.
//! See: https://opentelemetry.io/docs/specs/semconv/rpc/json-rpc/

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use dashmap::DashSet;
use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use crate::codec::{self, EncodeMode};
use crate::config::RegistryConfig;
use crate::schema::{synthesize_schema, ArgumentSchema, Arguments};
use crate::signature::Signature;
use crate::template::{TemplateError, UriTemplate};
use crate::types::completion::{CompleteParams, CompleteResult, CompletionRef, CompletionValues};
use crate::types::content::BlobResourceContents;
use crate::types::error::{ErrorData, ProtocolError, SchemaError, ValidationError};
use crate::types::jsonrpc::{McpResponse, RequestId};
use crate::types::logging::{LogLevel, LogMessage};
use crate::types::messages::{ClientRequest, Envelope, Notification};
use crate::types::prompt::{GetPromptParams, GetPromptResult, ListPromptsResult, PromptInfo};
use crate::types::protocol::{
    EmptyResult, Implementation, InitializeParams, InitializeResult, ServerCapabilities,
    PROTOCOL_VERSION,
};
use crate::types::resource::{
    ListResourceTemplatesResult, ListResourcesResult, ReadResourceResult, ResourceInfo,
    ResourceTemplateInfo,
};
use crate::types::subscription::ResourceUpdatedParams;
use crate::types::tool::{CallToolParams, CallToolResult, ListToolsResult, ToolInfo};

/// Tool handler: validated arguments in, result out. An `Err` becomes the
/// response's `error`; use [`CallToolResult::error`] for in-band failures.
pub type ToolFn = dyn Fn(&Arguments) -> Result<CallToolResult, ErrorData> + Send + Sync;

pub type PromptFn = dyn Fn(&Arguments) -> Result<GetPromptResult, ErrorData> + Send + Sync;

/// Resource handler. Fixed resources receive empty arguments; templates
/// receive the variables captured from the URI.
pub type ResourceFn = dyn Fn(&Arguments) -> Result<BlobResourceContents, ErrorData> + Send + Sync;

/// Completion callback: partial value in, candidate values out.
pub type CompletionFn = dyn Fn(&str) -> Vec<String> + Send + Sync;

/// Registration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("URI template '{template}' uses '{variable}', which is not a parameter")]
    UnknownVariable { template: String, variable: String },

    #[error("URI template '{template}' does not capture required parameter '{field}'")]
    UncapturedParameter { template: String, field: String },
}

struct Registered<H: ?Sized> {
    name: String,
    signature: Signature,
    skip: Vec<String>,
    schema: ArgumentSchema,
    handler: Box<H>,
}

impl<H: ?Sized> Registered<H> {
    fn new(name: String, signature: Signature, skip: &[&str], handler: Box<H>) -> Self {
        let schema = synthesize_schema(&signature, skip);
        Self {
            name,
            signature,
            skip: skip.iter().map(|s| s.to_string()).collect(),
            schema,
            handler,
        }
    }

    fn skip(&self) -> Vec<&str> {
        self.skip.iter().map(String::as_str).collect()
    }
}

struct ResourceEntry {
    uri: String,
    inner: Registered<ResourceFn>,
}

struct TemplateEntry {
    template: UriTemplate,
    inner: Registered<ResourceFn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CompletionKey {
    Prompt { name: String, argument: String },
    Resource { template: String, variable: String },
}

/// Replace an entry with the same key in place, or append.
fn upsert<T>(entries: &mut Vec<T>, entry: T, same: impl Fn(&T, &T) -> bool) {
    match entries.iter().position(|existing| same(existing, &entry)) {
        Some(i) => entries[i] = entry,
        None => entries.push(entry),
    }
}

/// Name-to-handler registry and request router.
pub struct Registry {
    server_info: Implementation,
    instructions: Option<String>,
    protocol_version: String,
    mode: EncodeMode,
    page_size: Option<usize>,

    tools: Vec<Registered<ToolFn>>,
    prompts: Vec<Registered<PromptFn>>,
    resources: Vec<ResourceEntry>,
    templates: Vec<TemplateEntry>,
    completions: HashMap<CompletionKey, Box<CompletionFn>>,

    initialized: AtomicBool,
    log_level: RwLock<LogLevel>,
    subscriptions: DashSet<String>,
}

impl Registry {
    pub fn new(server_info: Implementation) -> Self {
        Self {
            server_info,
            instructions: None,
            protocol_version: PROTOCOL_VERSION.to_string(),
            mode: EncodeMode::default(),
            page_size: None,
            tools: Vec::new(),
            prompts: Vec::new(),
            resources: Vec::new(),
            templates: Vec::new(),
            completions: HashMap::new(),
            initialized: AtomicBool::new(false),
            log_level: RwLock::new(LogLevel::default()),
            subscriptions: DashSet::new(),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        let mut registry = Self::new(config.server.implementation())
            .with_protocol_version(&config.protocol.version)
            .with_encode_mode(config.codec.mode)
            .with_page_size(config.listing.page_size);
        registry.instructions = config.server.instructions.clone();
        registry
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    pub fn with_encode_mode(mut self, mode: EncodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Page `*/list` results. `None` or `Some(0)` lists everything at once.
    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        self.page_size = page_size.filter(|size| *size > 0);
        self
    }

    // === Registration ===

    /// Register a tool. A later registration under the same name replaces
    /// the earlier one.
    pub fn tool<F>(self, name: impl Into<String>, signature: Signature, handler: F) -> Self
    where
        F: Fn(&Arguments) -> Result<CallToolResult, ErrorData> + Send + Sync + 'static,
    {
        self.tool_with_skip(name, signature, &[], handler)
    }

    /// Register a tool, hiding the named parameters from its schema.
    pub fn tool_with_skip<F>(
        mut self,
        name: impl Into<String>,
        signature: Signature,
        skip: &[&str],
        handler: F,
    ) -> Self
    where
        F: Fn(&Arguments) -> Result<CallToolResult, ErrorData> + Send + Sync + 'static,
    {
        let handler: Box<ToolFn> = Box::new(handler);
        let entry = Registered::new(name.into(), signature, skip, handler);
        upsert(&mut self.tools, entry, |a, b| a.name == b.name);
        self
    }

    pub fn prompt<F>(self, name: impl Into<String>, signature: Signature, handler: F) -> Self
    where
        F: Fn(&Arguments) -> Result<GetPromptResult, ErrorData> + Send + Sync + 'static,
    {
        self.prompt_with_skip(name, signature, &[], handler)
    }

    pub fn prompt_with_skip<F>(
        mut self,
        name: impl Into<String>,
        signature: Signature,
        skip: &[&str],
        handler: F,
    ) -> Self
    where
        F: Fn(&Arguments) -> Result<GetPromptResult, ErrorData> + Send + Sync + 'static,
    {
        let handler: Box<PromptFn> = Box::new(handler);
        let entry = Registered::new(name.into(), signature, skip, handler);
        upsert(&mut self.prompts, entry, |a, b| a.name == b.name);
        self
    }

    /// Register completion candidates for one prompt argument.
    pub fn prompt_completion<F>(
        mut self,
        prompt: impl Into<String>,
        argument: impl Into<String>,
        complete: F,
    ) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        let key = CompletionKey::Prompt {
            name: prompt.into(),
            argument: argument.into(),
        };
        self.completions.insert(key, Box::new(complete));
        self
    }

    /// Register a resource at a fixed URI.
    pub fn resource<F>(
        mut self,
        uri: impl Into<String>,
        name: impl Into<String>,
        signature: Signature,
        handler: F,
    ) -> Self
    where
        F: Fn(&Arguments) -> Result<BlobResourceContents, ErrorData> + Send + Sync + 'static,
    {
        let handler: Box<ResourceFn> = Box::new(handler);
        let entry = ResourceEntry {
            uri: uri.into(),
            inner: Registered::new(name.into(), signature, &[], handler),
        };
        upsert(&mut self.resources, entry, |a, b| a.uri == b.uri);
        self
    }

    /// Register a resource template. Every template variable must be a
    /// parameter, and every required parameter must be captured.
    pub fn resource_template<F>(
        mut self,
        uri_template: &str,
        name: impl Into<String>,
        signature: Signature,
        handler: F,
    ) -> Result<Self, RegistryError>
    where
        F: Fn(&Arguments) -> Result<BlobResourceContents, ErrorData> + Send + Sync + 'static,
    {
        let template = UriTemplate::parse(uri_template)?;
        let handler: Box<ResourceFn> = Box::new(handler);
        let inner = Registered::new(name.into(), signature, &[], handler);

        if let Some(variable) = template.variables().find(|v| inner.schema.field(v).is_none()) {
            return Err(RegistryError::UnknownVariable {
                template: uri_template.to_string(),
                variable: variable.to_string(),
            });
        }
        if let Some(field) = inner
            .schema
            .required_names()
            .into_iter()
            .find(|field| !template.variables().any(|v| v == *field))
        {
            return Err(RegistryError::UncapturedParameter {
                template: uri_template.to_string(),
                field: field.to_string(),
            });
        }

        let entry = TemplateEntry { template, inner };
        upsert(&mut self.templates, entry, |a, b| a.template == b.template);
        Ok(self)
    }

    /// Register completion candidates for one resource template variable.
    pub fn resource_completion<F>(
        mut self,
        uri_template: impl Into<String>,
        variable: impl Into<String>,
        complete: F,
    ) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        let key = CompletionKey::Resource {
            template: uri_template.into(),
            variable: variable.into(),
        };
        self.completions.insert(key, Box::new(complete));
        self
    }

    // === Listings ===

    /// Tool descriptors, recomputed from the registered signatures.
    pub fn tool_infos(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo::from_signature(&t.name, &t.signature, &t.skip()))
            .collect()
    }

    pub fn prompt_infos(&self) -> Vec<PromptInfo> {
        self.prompts
            .iter()
            .map(|p| PromptInfo::from_signature(&p.name, &p.signature, &p.skip()))
            .collect()
    }

    pub fn resource_infos(&self) -> Vec<ResourceInfo> {
        self.resources
            .iter()
            .map(|r| ResourceInfo::from_signature(&r.uri, &r.inner.name, &r.inner.signature))
            .collect()
    }

    pub fn resource_template_infos(&self) -> Vec<ResourceTemplateInfo> {
        self.templates
            .iter()
            .map(|t| {
                ResourceTemplateInfo::from_signature(
                    t.template.as_str(),
                    &t.inner.name,
                    &t.inner.signature,
                )
            })
            .collect()
    }

    /// The schema synthesized for a tool at registration.
    pub fn tool_schema(&self, name: &str) -> Option<&ArgumentSchema> {
        self.tools.iter().find(|t| t.name == name).map(|t| &t.schema)
    }

    pub fn prompt_schema(&self, name: &str) -> Option<&ArgumentSchema> {
        self.prompts.iter().find(|p| p.name == name).map(|p| &p.schema)
    }

    /// Capabilities implied by what is registered.
    pub fn capabilities(&self) -> ServerCapabilities {
        let mut caps = ServerCapabilities::default().enable_logging();

        if !self.tools.is_empty() {
            caps = caps.enable_tools();
        }
        if !self.resources.is_empty() || !self.templates.is_empty() {
            caps = caps.enable_resources();
        }
        if !self.prompts.is_empty() {
            caps = caps.enable_prompts();
        }
        if !self.completions.is_empty() {
            caps = caps.enable_completions();
        }

        caps
    }

    // === Client state ===

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Minimum level of `notifications/message` the client asked for.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
            .read()
            .map(|level| *level)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }

    fn set_log_level(&self, level: LogLevel) {
        match self.log_level.write() {
            Ok(mut current) => *current = level,
            Err(poisoned) => *poisoned.into_inner() = level,
        }
    }

    pub fn is_subscribed(&self, uri: &str) -> bool {
        self.subscriptions.contains(uri)
    }

    /// A log notification for the client, if it passes the client's level.
    pub fn log_notification(&self, message: LogMessage) -> Option<Notification> {
        (message.level >= self.log_level()).then_some(Notification::Message(message))
    }

    /// A `notifications/message` for a `tracing` level, if it passes the
    /// client's level.
    pub fn log(
        &self,
        level: impl Into<LogLevel>,
        logger: &str,
        message: impl Into<String>,
    ) -> Option<Notification> {
        self.log_notification(LogMessage::new(level.into(), message).with_logger(logger))
    }

    /// An update notification for `uri`, if the client subscribed to it.
    pub fn resource_updated(&self, uri: &str) -> Option<Notification> {
        self.is_subscribed(uri).then(|| {
            Notification::ResourceUpdated(ResourceUpdatedParams {
                uri: uri.to_string(),
            })
        })
    }

    // === Dispatch ===

    /// Handle raw JSON-RPC text. Returns the encoded response, or `None`
    /// when the message needs no reply.
    pub fn handle_str(&self, text: &str) -> Option<String> {
        let raw: Value = match serde_json::from_str(text) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "unparseable message");
                let response = McpResponse::error(None, ErrorData::parse_error(e.to_string()));
                return Some(self.encode_response(&response).to_string());
            }
        };

        self.handle_message(raw).map(|value| value.to_string())
    }

    /// Handle a decoded JSON value and encode the response.
    pub fn handle_message(&self, raw: Value) -> Option<Value> {
        self.handle(raw).map(|response| self.encode_response(&response))
    }

    /// Handle a decoded JSON value.
    ///
    /// Creates a span following JSON-RPC semantic conventions:
    /// - `rpc.system` = "jsonrpc"
    /// - `rpc.method` = the JSON-RPC method name
    /// - `rpc.jsonrpc.version` = "2.0"
    /// - `rpc.jsonrpc.request_id` = the request ID (if present)
    pub fn handle(&self, raw: Value) -> Option<McpResponse> {
        let request_id = codec::request_id_of(&raw);
        let has_id = raw.get("id").is_some();
        let method = raw
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let request_id_str = request_id
            .as_ref()
            .map(|id| format!("{}", id))
            .unwrap_or_default();

        let span = info_span!(
            "mcp.dispatch",
            rpc.system = "jsonrpc",
            rpc.method = %method,
            rpc.jsonrpc.version = "2.0",
            rpc.jsonrpc.request_id = %request_id_str,
            // Error fields - recorded on failure
            error.type = tracing::field::Empty,
            rpc.jsonrpc.error_code = tracing::field::Empty,
            rpc.jsonrpc.error_message = tracing::field::Empty,
        );
        let _enter = span.enter();

        let envelope = match codec::decode_envelope(raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(error = %err, "rejected message");
                // Notifications never get a reply, even malformed ones
                let unknown = matches!(err, ProtocolError::MethodNotFound { .. });
                if !has_id && (unknown || Notification::METHODS.contains(&method.as_str())) {
                    return None;
                }
                let error = ErrorData::from(err);
                record_error_on_span(&error);
                return Some(McpResponse::error(request_id, error));
            }
        };

        match envelope {
            Envelope::Notification(notification) => {
                self.handle_notification(notification);
                None
            }
            Envelope::Request { id, request } => Some(self.respond(id, request)),
        }
    }

    fn respond(&self, id: RequestId, request: ClientRequest) -> McpResponse {
        match self.dispatch(request) {
            Ok(result) => McpResponse::success(id, result),
            Err(error) => {
                record_error_on_span(&error);
                McpResponse::error(Some(id), error)
            }
        }
    }

    fn dispatch(&self, request: ClientRequest) -> Result<Value, ErrorData> {
        match request {
            // Lifecycle
            ClientRequest::Initialize(params) => self.initialize(params),
            ClientRequest::Ping => self.encode(&EmptyResult::default()),
            ClientRequest::SetLevel(params) => {
                self.set_log_level(params.level);
                self.encode(&EmptyResult::default())
            }

            // Tools
            ClientRequest::ListTools(params) => {
                let (tools, next_cursor) = self.paginate(self.tool_infos(), params.cursor.as_deref())?;
                self.encode(&ListToolsResult { tools, next_cursor })
            }
            ClientRequest::CallTool(params) => self.call_tool(params),

            // Prompts
            ClientRequest::ListPrompts(params) => {
                let (prompts, next_cursor) =
                    self.paginate(self.prompt_infos(), params.cursor.as_deref())?;
                self.encode(&ListPromptsResult {
                    prompts,
                    next_cursor,
                })
            }
            ClientRequest::GetPrompt(params) => self.get_prompt(params),

            // Resources
            ClientRequest::ListResources(params) => {
                let (resources, next_cursor) =
                    self.paginate(self.resource_infos(), params.cursor.as_deref())?;
                self.encode(&ListResourcesResult {
                    resources,
                    next_cursor,
                })
            }
            ClientRequest::ListResourceTemplates(params) => {
                let (resource_templates, next_cursor) =
                    self.paginate(self.resource_template_infos(), params.cursor.as_deref())?;
                self.encode(&ListResourceTemplatesResult {
                    resource_templates,
                    next_cursor,
                })
            }
            ClientRequest::ReadResource(params) => self.read_resource(&params.uri),
            ClientRequest::Subscribe(params) => {
                self.find_resource(&params.uri)?;
                self.subscriptions.insert(params.uri);
                self.encode(&EmptyResult::default())
            }
            ClientRequest::Unsubscribe(params) => {
                self.subscriptions.remove(&params.uri);
                self.encode(&EmptyResult::default())
            }

            // Completion
            ClientRequest::Complete(params) => self.complete(params),
        }
    }

    fn handle_notification(&self, notification: Notification) {
        match notification {
            Notification::Initialized => {
                self.initialized.store(true, Ordering::Release);
                info!("client initialized");
            }
            Notification::Cancelled(params) => {
                debug!(request_id = %params.request_id, reason = ?params.reason, "request cancelled");
            }
            Notification::Progress(params) => {
                debug!(token = %params.progress_token, progress = params.progress, "client progress");
            }
            Notification::RootsListChanged => debug!("client roots changed"),
            other => debug!(method = other.method(), "ignoring server-side notification"),
        }
    }

    fn initialize(&self, params: InitializeParams) -> Result<Value, ErrorData> {
        info!(
            client = %params.client_info.name,
            client_version = %params.client_info.version,
            protocol_version = %params.protocol_version,
            "initialize"
        );

        let mut result = InitializeResult::new(self.server_info.clone(), self.capabilities())
            .with_protocol_version(&self.protocol_version);
        if let Some(instructions) = &self.instructions {
            result = result.with_instructions(instructions);
        }

        self.encode(&result)
    }

    fn call_tool(&self, params: CallToolParams) -> Result<Value, ErrorData> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name == params.name)
            .ok_or_else(|| ErrorData::tool_not_found(&params.name))?;

        let tool_span = info_span!("mcp.tool.call", mcp.tool.name = %params.name);
        let _enter = tool_span.enter();

        let empty = Map::new();
        let arguments = tool.schema.validate(params.arguments.as_ref().unwrap_or(&empty))?;

        let result = (tool.handler)(&arguments).inspect_err(|e| debug!(error = %e, "tool failed"))?;
        self.encode(&result)
    }

    fn get_prompt(&self, params: GetPromptParams) -> Result<Value, ErrorData> {
        let prompt = self
            .prompts
            .iter()
            .find(|p| p.name == params.name)
            .ok_or_else(|| ErrorData::prompt_not_found(&params.name))?;

        let prompt_span = info_span!("mcp.prompt.get", mcp.prompt.name = %params.name);
        let _enter = prompt_span.enter();

        let empty = Map::new();
        let arguments = prompt.schema.validate(params.arguments.as_ref().unwrap_or(&empty))?;

        let mut result =
            (prompt.handler)(&arguments).inspect_err(|e| debug!(error = %e, "prompt failed"))?;
        if result.description.is_none() {
            result.description = Some(prompt.signature.doc_text().unwrap_or_default().to_string());
        }

        self.encode(&result)
    }

    /// Resolve a URI to its handler and arguments.
    fn find_resource(&self, uri: &str) -> Result<(&ResourceFn, Arguments), ErrorData> {
        if let Some(entry) = self.resources.iter().find(|r| r.uri == uri) {
            return Ok((entry.inner.handler.as_ref(), Arguments::default()));
        }

        for entry in &self.templates {
            if let Some(variables) = entry.template.matches(uri) {
                let arguments = entry.inner.schema.validate_text(variables)?;
                return Ok((entry.inner.handler.as_ref(), arguments));
            }
        }

        Err(ErrorData::resource_not_found(uri))
    }

    fn read_resource(&self, uri: &str) -> Result<Value, ErrorData> {
        let resource_span = info_span!("mcp.resource.read", mcp.resource.uri = %uri);
        let _enter = resource_span.enter();

        let (handler, arguments) = self.find_resource(uri)?;
        let contents = handler(&arguments).inspect_err(|e| debug!(error = %e, "resource failed"))?;

        self.encode(&ReadResourceResult::new(contents))
    }

    fn complete(&self, params: CompleteParams) -> Result<Value, ErrorData> {
        let argument = params.argument.name;

        let key = match params.reference {
            CompletionRef::Prompt { name } => {
                let prompt = self
                    .prompts
                    .iter()
                    .find(|p| p.name == name)
                    .ok_or_else(|| ErrorData::prompt_not_found(&name))?;
                if prompt.schema.field(&argument).is_none() {
                    return Err(unexpected_argument(argument));
                }
                CompletionKey::Prompt { name, argument }
            }
            CompletionRef::Resource { uri } => {
                let entry = self
                    .templates
                    .iter()
                    .find(|t| t.template.as_str() == uri)
                    .ok_or_else(|| ErrorData::resource_not_found(&uri))?;
                if !entry.template.variables().any(|v| v == argument) {
                    return Err(unexpected_argument(argument));
                }
                CompletionKey::Resource {
                    template: uri,
                    variable: argument,
                }
            }
        };

        let completion = match self.completions.get(&key) {
            Some(complete) => CompletionValues::new(complete(&params.argument.value)),
            None => CompletionValues::empty(),
        };

        self.encode(&CompleteResult::new(completion))
    }

    /// Cut one page out of a listing. The cursor is the decimal offset of
    /// the first entry.
    fn paginate<T>(
        &self,
        items: Vec<T>,
        cursor: Option<&str>,
    ) -> Result<(Vec<T>, Option<String>), ProtocolError> {
        let offset = match cursor {
            None => 0,
            Some(cursor) => cursor
                .parse::<usize>()
                .ok()
                .filter(|offset| *offset <= items.len())
                .ok_or_else(|| SchemaError::params(format!("invalid cursor '{}'", cursor)))?,
        };

        let end = match self.page_size {
            Some(size) => offset.saturating_add(size).min(items.len()),
            None => items.len(),
        };
        let next_cursor = (end < items.len()).then(|| end.to_string());

        let page = items.into_iter().skip(offset).take(end - offset).collect();
        Ok((page, next_cursor))
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Value, ErrorData> {
        codec::encode(value, self.mode)
            .map_err(|e| ErrorData::internal_error(format!("Failed to serialize result: {}", e)))
    }

    fn encode_response(&self, response: &McpResponse) -> Value {
        match codec::encode(response, self.mode) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "failed to encode response");
                json!({
                    "jsonrpc": "2.0",
                    "id": response.id(),
                    "error": ErrorData::internal_error(e.to_string()),
                })
            }
        }
    }
}

fn unexpected_argument(field: String) -> ErrorData {
    ProtocolError::from(ValidationError::UnexpectedArgument { field }).into()
}

/// Record JSON-RPC error on the current span following OTEL conventions.
fn record_error_on_span(error: &ErrorData) {
    let span = tracing::Span::current();
    span.record("error.type", error_type_for_code(error.code));
    span.record("rpc.jsonrpc.error_code", error.code);
    span.record("rpc.jsonrpc.error_message", error.message.as_str());
}

/// Map JSON-RPC error codes to error.type values.
fn error_type_for_code(code: i32) -> &'static str {
    match code {
        ErrorData::PARSE_ERROR => "parse_error",
        ErrorData::INVALID_REQUEST => "invalid_request",
        ErrorData::METHOD_NOT_FOUND => "method_not_found",
        ErrorData::INVALID_PARAMS => "invalid_params",
        ErrorData::INTERNAL_ERROR => "internal_error",
        _ => "application_error",
    }
}
