//! Completion Types
//!
//! Types for argument autocompletion.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Most values a single completion response carries.
pub const MAX_COMPLETION_VALUES: usize = 100;

/// Reference to what we're completing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum CompletionRef {
    /// Completing a prompt argument
    #[serde(rename = "ref/prompt")]
    Prompt {
        /// Prompt name
        name: String,
    },

    /// Completing a resource URI
    #[serde(rename = "ref/resource")]
    Resource {
        /// Resource URI (may be partial)
        uri: String,
    },
}

/// The argument being completed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionArgument {
    /// Argument name
    pub name: String,
    /// Current partial value
    pub value: String,
}

/// Completion request parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompleteParams {
    /// What we're completing
    #[serde(rename = "ref")]
    pub reference: CompletionRef,
    /// The argument being completed
    pub argument: CompletionArgument,
}

/// Suggested values for one argument
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompletionValues {
    /// Suggested completions
    pub values: Vec<String>,
    /// Total number of matches (may be > values.len())
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub total: Option<u64>,
    /// Whether there are more completions available
    #[serde(
        rename = "hasMore",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub has_more: Option<bool>,
}

impl CompletionValues {
    /// Wrap candidate values, truncating to [`MAX_COMPLETION_VALUES`].
    pub fn new(mut values: Vec<String>) -> Self {
        let total = values.len();
        let has_more = total > MAX_COMPLETION_VALUES;
        values.truncate(MAX_COMPLETION_VALUES);
        Self {
            values,
            total: Some(total as u64),
            has_more: Some(has_more),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

/// Completion result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompleteResult {
    #[serde(
        rename = "_meta",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub meta: Option<Map<String, Value>>,

    pub completion: CompletionValues,
}

impl CompleteResult {
    pub fn new(completion: CompletionValues) -> Self {
        Self {
            meta: None,
            completion,
        }
    }
}
