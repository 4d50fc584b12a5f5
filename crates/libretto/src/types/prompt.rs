//! Prompt Types
//!
//! Types for MCP prompt descriptors and messages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::Content;
use super::Role;

/// A prompt descriptor as listed by `prompts/list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptInfo {
    /// Identifier of the prompt; the registration key.
    pub id: String,

    /// Programmatic name of the prompt.
    pub name: String,

    /// Description of what this prompt provides.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub description: Option<String>,

    /// Arguments that can be used to template the prompt, in declaration order.
    pub arguments: Vec<PromptArgument>,
}

/// An argument that a prompt can accept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptArgument {
    /// Programmatic name of the argument.
    pub name: String,

    /// Description of the argument.
    #[serde(default)]
    pub description: String,

    /// Whether this argument is required.
    pub required: bool,
}

impl PromptArgument {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            required,
        }
    }
}

/// A message in a prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptMessage {
    /// Role of the message sender.
    pub role: Role,

    /// Content of the message.
    pub content: Content,
}

impl PromptMessage {
    /// Create a user message.
    pub fn user(content: Content) -> Self {
        Self {
            role: Role::User,
            content,
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: Content) -> Self {
        Self {
            role: Role::Assistant,
            content,
        }
    }

    /// Create a user message with text content.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(Content::text(text))
    }

    /// Create an assistant message with text content.
    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self::assistant(Content::text(text))
    }
}

/// Parameters for prompts/get request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GetPromptParams {
    /// Name of the prompt to get.
    pub name: String,

    /// Arguments to use for templating.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub arguments: Option<Map<String, Value>>,
}

/// Result of prompts/get request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GetPromptResult {
    #[serde(
        rename = "_meta",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub meta: Option<Map<String, Value>>,

    /// Optional description of the prompt.
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub description: Option<String>,

    /// Messages that make up the prompt.
    pub messages: Vec<PromptMessage>,
}

impl GetPromptResult {
    /// Create a result with messages.
    pub fn new(messages: Vec<PromptMessage>) -> Self {
        Self {
            meta: None,
            description: None,
            messages,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Result of prompts/list request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ListPromptsResult {
    /// Available prompts.
    pub prompts: Vec<PromptInfo>,

    /// Pagination cursor for next page.
    #[serde(
        rename = "nextCursor",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub next_cursor: Option<String>,
}

impl ListPromptsResult {
    /// Create a result with all prompts (no pagination).
    pub fn all(prompts: Vec<PromptInfo>) -> Self {
        Self {
            prompts,
            next_cursor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_message() {
        let message = PromptMessage::user_text("What is the weather like in Tokyo?");

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"]["type"], "text");
        assert_eq!(json["content"]["text"], "What is the weather like in Tokyo?");
    }

    #[test]
    fn test_get_prompt_result() {
        let result = GetPromptResult::new(vec![PromptMessage::user_text(
            "What is the weather forecast like?",
        )])
        .with_description("Weather forecast prompt");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["description"], "Weather forecast prompt");
        assert!(json.get("_meta").is_none());

        let parsed: GetPromptResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_prompt_info_shape() {
        let info = PromptInfo {
            id: "get_weather_prompt".to_string(),
            name: "get_weather_prompt".to_string(),
            description: Some(String::new()),
            arguments: vec![PromptArgument::new("city", true)],
        };

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json["arguments"],
            json!([{ "name": "city", "description": "", "required": true }])
        );
    }

    #[test]
    fn test_list_prompts_result() {
        let result = ListPromptsResult::all(vec![]);

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["prompts"].as_array().unwrap().is_empty());
        assert!(json.get("nextCursor").is_none());
    }
}
