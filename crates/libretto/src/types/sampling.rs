//! Sampling Types
//!
//! `sampling/createMessage` lets a server ask the connected client's model
//! for a completion.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::Content;
use super::Role;

/// A message in a sampling request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SamplingMessage {
    pub role: Role,
    pub content: Content,
}

impl SamplingMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Content::text(text),
        }
    }
}

/// Sampling request parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CreateMessageParams {
    /// Messages to send
    pub messages: Vec<SamplingMessage>,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub system_prompt: Option<String>,

    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub stop_sequences: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl CreateMessageParams {
    pub fn new(messages: Vec<SamplingMessage>, max_tokens: u32) -> Self {
        Self {
            messages,
            max_tokens,
            system_prompt: None,
            temperature: None,
            stop_sequences: None,
            metadata: None,
        }
    }
}

/// Sampling response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CreateMessageResult {
    /// Role (always assistant)
    pub role: Role,

    /// Response content
    pub content: Content,

    /// Model that generated the response
    pub model: String,

    /// Why the model stopped
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub stop_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_message_params_serialization() {
        let params = CreateMessageParams::new(vec![SamplingMessage::user("Hello")], 100);

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"]["type"], "text");
        assert_eq!(json["maxTokens"], 100);
        assert!(json.get("systemPrompt").is_none());
    }

    #[test]
    fn test_create_message_result_decode() {
        let result: CreateMessageResult = serde_json::from_value(json!({
            "role": "assistant",
            "content": { "type": "text", "text": "Sunny." },
            "model": "some-model",
            "stopReason": "endTurn",
        }))
        .unwrap();

        assert_eq!(result.role, Role::Assistant);
        assert_eq!(result.content.as_text(), Some("Sunny."));
        assert_eq!(result.stop_reason.as_deref(), Some("endTurn"));
    }
}
