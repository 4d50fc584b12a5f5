//! Argument-Model Synthesizer
//!
//! [`synthesize_schema`] turns a declared [`Signature`] into an
//! [`ArgumentSchema`]: the ordered fields a caller must or may supply, with
//! their declared types and defaults. The same schema drives the listing
//! descriptors and the validation of incoming call arguments.
//!
//! Synthesis is a pure function of its inputs. Every call allocates a fresh
//! schema, so callers may cache the result or call again freely.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::signature::{json_type_name, ParamType, Signature};
use crate::types::error::{ProtocolError, SchemaError, ValidationError};
use crate::types::prompt::PromptArgument;
use crate::types::tool::ToolSchema;

/// One synthesized field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub ty: ParamType,
    /// True iff no default was declared. Independent of whether `ty` is
    /// nullable.
    pub required: bool,
    pub default: Option<Value>,
}

/// The synthesized argument model of one callable.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSchema {
    name: String,
    fields: Vec<FieldSpec>,
    returns: ParamType,
}

/// Derive the argument schema of `signature`, leaving out every parameter
/// named in `skip`.
pub fn synthesize_schema(signature: &Signature, skip: &[&str]) -> ArgumentSchema {
    let fields: Vec<FieldSpec> = signature
        .params()
        .iter()
        .filter(|param| !skip.contains(&param.name.as_str()))
        .map(|param| FieldSpec {
            name: param.name.clone(),
            ty: param.ty.clone(),
            required: param.default.is_none(),
            default: param.default.clone(),
        })
        .collect();

    debug!(
        callable = signature.name(),
        fields = fields.len(),
        skipped = signature.params().len() - fields.len(),
        "synthesized argument schema"
    );

    ArgumentSchema {
        name: signature.name().to_string(),
        fields,
        returns: signature.return_type().clone(),
    }
}

impl ArgumentSchema {
    /// Name of the callable this schema was derived from.
    pub fn callable(&self) -> &str {
        &self.name
    }

    /// Name of the synthesized argument model, e.g. `get_weatherArgs`.
    pub fn model_name(&self) -> String {
        format!("{}Args", self.name)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Declared return type; documentation only, never validated.
    pub fn returns(&self) -> &ParamType {
        &self.returns
    }

    /// Names of the required fields, in declaration order.
    pub fn required_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Validate raw call arguments.
    ///
    /// Every problem is collected before failing. On success the returned
    /// arguments hold every field of the schema, defaults filled in.
    pub fn validate(&self, args: &Map<String, Value>) -> Result<Arguments, ProtocolError> {
        let mut errors = Vec::new();
        let mut values = Map::new();

        for field in &self.fields {
            match args.get(&field.name) {
                Some(value) => match field.ty.coerce(value.clone()) {
                    Some(value) => {
                        values.insert(field.name.clone(), value);
                    }
                    None => errors.push(ValidationError::TypeMismatch {
                        field: field.name.clone(),
                        expected: field.ty.to_string(),
                        actual: json_type_name(value).to_string(),
                    }),
                },
                None => match &field.default {
                    Some(default) => {
                        values.insert(field.name.clone(), default.clone());
                    }
                    None => errors.push(ValidationError::MissingArgument {
                        field: field.name.clone(),
                        expected: field.ty.to_string(),
                    }),
                },
            }
        }

        for key in args.keys() {
            if self.field(key).is_none() {
                errors.push(ValidationError::UnexpectedArgument { field: key.clone() });
            }
        }

        if errors.is_empty() {
            Ok(Arguments(values))
        } else {
            Err(ProtocolError::Validation(errors))
        }
    }

    /// Validate an optional `arguments` payload; absent or `null` means no
    /// arguments were given.
    pub fn validate_value(&self, args: Option<&Value>) -> Result<Arguments, ProtocolError> {
        match args {
            None | Some(Value::Null) => self.validate(&Map::new()),
            Some(Value::Object(map)) => self.validate(map),
            Some(other) => Err(SchemaError::params(format!(
                "arguments must be an object, got {}",
                json_type_name(other)
            ))
            .into()),
        }
    }

    /// Validate textual arguments, such as variables captured from a URI,
    /// parsing each into its declared type first.
    pub fn validate_text<'a, I>(&self, vars: I) -> Result<Arguments, ProtocolError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let args: Map<String, Value> = vars
            .into_iter()
            .map(|(name, raw)| {
                let value = self
                    .field(name)
                    .and_then(|field| field.ty.parse_str(raw))
                    .unwrap_or_else(|| Value::String(raw.to_string()));
                (name.to_string(), value)
            })
            .collect();

        self.validate(&args)
    }

    /// JSON Schema object for a tool's `inputSchema`.
    pub fn to_input_schema(&self) -> ToolSchema {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| {
                let mut schema = field.ty.json_schema();
                if let (Some(default), Some(object)) = (&field.default, schema.as_object_mut()) {
                    object.insert("default".to_string(), default.clone());
                }
                (field.name.clone(), schema)
            })
            .collect();

        let required: Vec<String> = self
            .required_names()
            .into_iter()
            .map(String::from)
            .collect();

        ToolSchema {
            schema_type: "object".to_string(),
            properties: Some(properties),
            required: if required.is_empty() {
                None
            } else {
                Some(required)
            },
            additional_properties: Some(false),
        }
    }

    /// Ordered `{name, description, required}` entries for a prompt listing.
    pub fn prompt_arguments(&self) -> Vec<PromptArgument> {
        self.fields
            .iter()
            .map(|field| PromptArgument::new(field.name.clone(), field.required))
            .collect()
    }
}

/// Validated arguments, ready to hand to a handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Decode a single argument into a Rust type.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, ProtocolError> {
        let value = self.0.get(name).ok_or_else(|| ValidationError::MissingArgument {
            field: name.to_string(),
            expected: std::any::type_name::<T>().to_string(),
        })?;

        T::deserialize(value).map_err(|_| {
            ValidationError::TypeMismatch {
                field: name.to_string(),
                expected: std::any::type_name::<T>().to_string(),
                actual: json_type_name(value).to_string(),
            }
            .into()
        })
    }

    /// Decode all arguments into a static struct.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ProtocolError> {
        T::deserialize(&Value::Object(self.0.clone()))
            .map_err(|e| SchemaError::params(e.to_string()).into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Arguments> for Value {
    fn from(args: Arguments) -> Self {
        Value::Object(args.0)
    }
}
