//! Descriptor Builders
//!
//! Listing entries are projections of a registered signature and its
//! synthesized schema. Nothing here invokes a handler.

use crate::schema::{synthesize_schema, ArgumentSchema};
use crate::signature::Signature;
use crate::types::prompt::PromptInfo;
use crate::types::resource::{ResourceInfo, ResourceTemplateInfo, DEFAULT_RESOURCE_MIME_TYPE};
use crate::types::tool::ToolInfo;

fn description(signature: &Signature) -> String {
    signature.doc_text().unwrap_or_default().to_string()
}

impl ToolInfo {
    /// Describe a tool from an already synthesized schema.
    pub fn from_schema(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: &ArgumentSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            input_schema: schema.to_input_schema(),
        }
    }

    /// Describe a tool straight from its signature.
    pub fn from_signature(name: impl Into<String>, signature: &Signature, skip: &[&str]) -> Self {
        let schema = synthesize_schema(signature, skip);
        Self::from_schema(name, description(signature), &schema)
    }
}

impl PromptInfo {
    pub fn from_schema(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: &ArgumentSchema,
    ) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            description: Some(description.into()),
            arguments: schema.prompt_arguments(),
        }
    }

    pub fn from_signature(name: impl Into<String>, signature: &Signature, skip: &[&str]) -> Self {
        let schema = synthesize_schema(signature, skip);
        Self::from_schema(name, description(signature), &schema)
    }
}

impl ResourceInfo {
    /// Describe a fixed-URI resource. Resources are served as JSON.
    pub fn from_signature(
        uri: impl Into<String>,
        name: impl Into<String>,
        signature: &Signature,
    ) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: description(signature),
            mime_type: Some(DEFAULT_RESOURCE_MIME_TYPE.to_string()),
        }
    }
}

impl ResourceTemplateInfo {
    pub fn from_signature(
        uri_template: impl Into<String>,
        name: impl Into<String>,
        signature: &Signature,
    ) -> Self {
        Self {
            uri_template: uri_template.into(),
            name: name.into(),
            description: description(signature),
            mime_type: DEFAULT_RESOURCE_MIME_TYPE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::ParamType;
    use serde_json::json;

    fn weather() -> Signature {
        Signature::new("get_weather")
            .doc("Get the current weather for a city.")
            .param("city", ParamType::String)
            .returns(ParamType::String)
    }

    #[test]
    fn test_tool_info_from_signature() {
        let info = ToolInfo::from_signature("get_weather", &weather(), &[]);

        assert_eq!(info.name, "get_weather");
        assert_eq!(
            info.description.as_deref(),
            Some("Get the current weather for a city.")
        );
        assert_eq!(info.input_schema.required_names(), ["city".to_string()]);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["inputSchema"]["properties"]["city"]["type"], "string");
    }

    #[test]
    fn test_missing_doc_is_empty_description() {
        let sig = Signature::new("undocumented").param("x", ParamType::Integer);

        let tool = ToolInfo::from_signature("undocumented", &sig, &[]);
        assert_eq!(tool.description.as_deref(), Some(""));

        let resource = ResourceInfo::from_signature("data://x", "x", &sig);
        assert_eq!(resource.description, "");
    }

    #[test]
    fn test_prompt_info_from_signature() {
        let sig = Signature::new("review")
            .doc("Review some code.")
            .untyped("ctx")
            .param("code", ParamType::String)
            .param_with_default("style", ParamType::String, json!("terse"));

        let info = PromptInfo::from_signature("review", &sig, &["ctx"]);
        assert_eq!(info.id, "review");
        assert_eq!(info.name, "review");

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json["arguments"],
            json!([
                { "name": "code", "description": "", "required": true },
                { "name": "style", "description": "", "required": false },
            ])
        );
    }

    #[test]
    fn test_resource_descriptors() {
        let sig = Signature::new("config").doc("Server configuration.");

        let info = ResourceInfo::from_signature("config://server", "config", &sig);
        assert_eq!(info.mime_type.as_deref(), Some("application/json"));

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["mime_type"], "application/json");
        assert!(json.get("mimeType").is_none());

        let sig = Signature::new("user").param("id", ParamType::Integer);
        let template = ResourceTemplateInfo::from_signature("users://{id}", "user", &sig);
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["uriTemplate"], "users://{id}");
        assert_eq!(json["mimeType"], "application/json");
    }
}
