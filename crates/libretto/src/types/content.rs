//! Content Types
//!
//! Content blocks carried by tool results and prompt messages. The `type` tag
//! is always written and decode dispatches on it; the payload must then match
//! the shape the tag names exactly.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::error::SchemaError;
use super::Annotations;

/// Binary contents referenced by image and embedded-resource blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlobResourceContents {
    /// Base64-encoded binary data.
    pub blob: String,

    /// MIME type.
    #[serde(
        rename = "mimeType",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub mime_type: Option<String>,

    /// URI of the resource.
    pub uri: String,
}

impl BlobResourceContents {
    pub fn new(uri: impl Into<String>, blob: impl Into<String>) -> Self {
        Self {
            blob: blob.into(),
            mime_type: None,
            uri: uri.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Content block in a message or tool result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text {
        text: String,
        #[serde(skip_serializing_if = "crate::codec::omit_none")]
        annotations: Option<Annotations>,
    },

    #[serde(rename = "image")]
    Image {
        image: BlobResourceContents,
        #[serde(skip_serializing_if = "crate::codec::omit_none")]
        annotations: Option<Annotations>,
    },

    #[serde(rename = "embedded-resource")]
    EmbeddedResource {
        resource: BlobResourceContents,
        #[serde(skip_serializing_if = "crate::codec::omit_none")]
        annotations: Option<Annotations>,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TextFields {
    text: String,
    #[serde(default)]
    annotations: Option<Annotations>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ImageFields {
    image: BlobResourceContents,
    #[serde(default)]
    annotations: Option<Annotations>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EmbeddedFields {
    resource: BlobResourceContents,
    #[serde(default)]
    annotations: Option<Annotations>,
}

impl Content {
    pub const TEXT: &'static str = "text";
    pub const IMAGE: &'static str = "image";
    pub const EMBEDDED_RESOURCE: &'static str = "embedded-resource";

    /// Create text content.
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text {
            text: text.into(),
            annotations: None,
        }
    }

    /// Create text content with annotations.
    pub fn text_with_annotations(text: impl Into<String>, annotations: Annotations) -> Self {
        Content::Text {
            text: text.into(),
            annotations: Some(annotations),
        }
    }

    /// Create image content.
    pub fn image(image: BlobResourceContents) -> Self {
        Content::Image {
            image,
            annotations: None,
        }
    }

    /// Create embedded resource content.
    pub fn embedded_resource(resource: BlobResourceContents) -> Self {
        Content::EmbeddedResource {
            resource,
            annotations: None,
        }
    }

    /// The discriminator this variant is written with.
    pub fn kind(&self) -> &'static str {
        match self {
            Content::Text { .. } => Self::TEXT,
            Content::Image { .. } => Self::IMAGE,
            Content::EmbeddedResource { .. } => Self::EMBEDDED_RESOURCE,
        }
    }

    /// Check if this is text content.
    pub fn is_text(&self) -> bool {
        matches!(self, Content::Text { .. })
    }

    /// Get the text if this is text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn annotations(&self) -> Option<&Annotations> {
        match self {
            Content::Text { annotations, .. }
            | Content::Image { annotations, .. }
            | Content::EmbeddedResource { annotations, .. } => annotations.as_ref(),
        }
    }

    /// Decode a content block by dispatching on its `type` tag.
    pub fn decode(raw: &Value) -> Result<Self, SchemaError> {
        let object = raw
            .as_object()
            .ok_or_else(|| SchemaError::content("content block must be an object"))?;

        let mut fields = object.clone();
        let tag = match fields.remove("type") {
            Some(Value::String(tag)) => tag,
            Some(_) => return Err(SchemaError::content("content `type` must be a string")),
            None => return Err(SchemaError::content("content block is missing `type`")),
        };

        match tag.as_str() {
            Self::TEXT => {
                let f: TextFields = from_fields(&tag, fields)?;
                Ok(Content::Text {
                    text: f.text,
                    annotations: f.annotations,
                })
            }
            Self::IMAGE => {
                let f: ImageFields = from_fields(&tag, fields)?;
                Ok(Content::Image {
                    image: f.image,
                    annotations: f.annotations,
                })
            }
            Self::EMBEDDED_RESOURCE => {
                let f: EmbeddedFields = from_fields(&tag, fields)?;
                Ok(Content::EmbeddedResource {
                    resource: f.resource,
                    annotations: f.annotations,
                })
            }
            other => Err(SchemaError::content(format!(
                "unknown content type '{}'",
                other
            ))),
        }
    }
}

fn from_fields<T: DeserializeOwned>(tag: &str, fields: Map<String, Value>) -> Result<T, SchemaError> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| SchemaError::content(format!("'{}' content: {}", tag, e)))
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Content::decode(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn blob() -> BlobResourceContents {
        BlobResourceContents::new("https://example.com/resource", "SGVsbG8gd29ybGQ=")
            .with_mime_type("text/plain")
    }

    #[test]
    fn test_text_content() {
        let content = Content::text("Hello, World!");

        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json, json!({ "type": "text", "text": "Hello, World!" }));
    }

    #[test]
    fn test_blob_alias() {
        let json = serde_json::to_value(blob()).unwrap();
        assert_eq!(json["mimeType"], "text/plain");
        assert!(json.get("mime_type").is_none());

        let parsed: BlobResourceContents = serde_json::from_value(json!({
            "blob": "SGVsbG8gd29ybGQ=",
            "mimeType": "text/plain",
            "uri": "https://example.com/resource",
        }))
        .unwrap();
        assert_eq!(parsed.mime_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_blob_rejects_internal_name() {
        let result: Result<BlobResourceContents, _> = serde_json::from_value(json!({
            "blob": "AA==",
            "mime_type": "text/plain",
            "uri": "file:///a",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_image_content() {
        let content = Content::image(blob());

        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["image"]["mimeType"], "text/plain");
        assert_eq!(Content::decode(&json).unwrap(), content);
    }

    #[test]
    fn test_embedded_resource_tag() {
        let content = Content::embedded_resource(blob());

        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "embedded-resource");
        assert_eq!(json["resource"]["uri"], "https://example.com/resource");
        assert_eq!(content.kind(), Content::EMBEDDED_RESOURCE);
    }

    #[test]
    fn test_tag_shape_mismatch() {
        let raw = json!({
            "type": "text",
            "image": { "blob": "AA==", "uri": "file:///a" },
        });
        let err = Content::decode(&raw).unwrap_err();
        assert_eq!(err.location, crate::types::error::SchemaLocation::Content);
    }

    #[test]
    fn test_unknown_and_missing_tag() {
        assert!(Content::decode(&json!({ "type": "audio", "data": "AA==" })).is_err());
        assert!(Content::decode(&json!({ "text": "no tag" })).is_err());
        assert!(Content::decode(&json!("text")).is_err());
    }

    #[test]
    fn test_text_with_annotations() {
        let annotations = Annotations::default().with_priority(0.8).unwrap();
        let content = Content::text_with_annotations("Important!", annotations);

        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["annotations"]["priority"], 0.8);

        let parsed: Content = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.annotations().and_then(Annotations::priority), Some(0.8));
    }

    #[test]
    fn test_annotation_range_enforced_inside_content() {
        let raw = json!({ "type": "text", "text": "x", "annotations": { "priority": 2.0 } });
        assert!(Content::decode(&raw).is_err());
    }
}
