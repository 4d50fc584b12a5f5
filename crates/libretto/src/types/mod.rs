//! MCP Protocol Types
//!
//! Wire shapes for every message the protocol exchanges, organized by role:
//!
//! - `jsonrpc` - JSON-RPC 2.0 envelope primitives (ids, messages, responses)
//! - `error` - wire error object and the protocol error taxonomy
//! - `messages` - method-keyed request and notification enums
//! - `protocol` - initialize handshake and capability negotiation
//! - `content` - content blocks (text, image, embedded resource)
//! - `tool`, `prompt`, `resource`, `completion` - per-method params and results
//! - `logging`, `progress`, `subscription`, `roots`, `sampling` - the rest

pub mod completion;
pub mod content;
pub mod error;
pub mod jsonrpc;
pub mod logging;
pub mod messages;
pub mod progress;
pub mod prompt;
pub mod protocol;
pub mod resource;
pub mod roots;
pub mod sampling;
pub mod subscription;
pub mod tool;

use serde::{Deserialize, Serialize};

use error::ValidationError;

/// Optional annotations for content.
///
/// `priority` is checked on construction and on decode; out-of-range values
/// are rejected, never clamped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AnnotationsWire")]
pub struct Annotations {
    #[serde(skip_serializing_if = "crate::codec::omit_none")]
    audience: Option<Vec<Role>>,

    #[serde(skip_serializing_if = "crate::codec::omit_none")]
    priority: Option<f64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AnnotationsWire {
    #[serde(default)]
    audience: Option<Vec<Role>>,
    #[serde(default)]
    priority: Option<f64>,
}

impl TryFrom<AnnotationsWire> for Annotations {
    type Error = ValidationError;

    fn try_from(wire: AnnotationsWire) -> Result<Self, Self::Error> {
        Annotations::new(wire.audience, wire.priority)
    }
}

impl Annotations {
    pub const PRIORITY_MIN: f64 = 0.0;
    pub const PRIORITY_MAX: f64 = 1.0;

    /// Build annotations, rejecting a priority outside `[0, 1]`.
    pub fn new(audience: Option<Vec<Role>>, priority: Option<f64>) -> Result<Self, ValidationError> {
        if let Some(value) = priority {
            check_priority(value)?;
        }
        Ok(Self { audience, priority })
    }

    /// Set the intended audience.
    pub fn with_audience(mut self, audience: Vec<Role>) -> Self {
        self.audience = Some(audience);
        self
    }

    /// Set the priority, rejecting values outside `[0, 1]`.
    pub fn with_priority(mut self, priority: f64) -> Result<Self, ValidationError> {
        check_priority(priority)?;
        self.priority = Some(priority);
        Ok(self)
    }

    pub fn audience(&self) -> Option<&[Role]> {
        self.audience.as_deref()
    }

    pub fn priority(&self) -> Option<f64> {
        self.priority
    }
}

fn check_priority(value: f64) -> Result<(), ValidationError> {
    // NaN fails the range check too
    if (Annotations::PRIORITY_MIN..=Annotations::PRIORITY_MAX).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: "priority".to_string(),
            value,
            min: Annotations::PRIORITY_MIN,
            max: Annotations::PRIORITY_MAX,
        })
    }
}

/// Role of a message author or annotation audience.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_bounds() {
        assert!(Annotations::new(None, Some(1.5)).is_err());
        assert!(Annotations::new(None, Some(-0.1)).is_err());
        assert!(Annotations::new(None, Some(f64::NAN)).is_err());
        assert_eq!(Annotations::new(None, Some(1.0)).unwrap().priority(), Some(1.0));
        assert_eq!(Annotations::new(None, Some(0.0)).unwrap().priority(), Some(0.0));
    }

    #[test]
    fn test_out_of_range_names_priority() {
        let err = Annotations::default().with_priority(1.5).unwrap_err();
        assert_eq!(err.field(), "priority");
        assert!(matches!(err, ValidationError::OutOfRange { value, .. } if value == 1.5));
    }

    #[test]
    fn test_decode_rejects_out_of_range_priority() {
        let result: Result<Annotations, _> = serde_json::from_value(json!({ "priority": 1.5 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_annotations_roundtrip() {
        let data = json!({ "audience": ["user", "assistant"], "priority": 0.5 });
        let annotations: Annotations = serde_json::from_value(data.clone()).unwrap();

        assert_eq!(annotations.audience(), Some(&[Role::User, Role::Assistant][..]));
        assert_eq!(annotations.priority(), Some(0.5));
        assert_eq!(serde_json::to_value(&annotations).unwrap(), data);
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
        assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), "assistant");
        assert_eq!(serde_json::to_value(Role::System).unwrap(), "system");
    }
}
