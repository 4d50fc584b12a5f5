//! Declared Callable Signatures
//!
//! Rust has no runtime parameter reflection, so a handler's parameter list is
//! declared once at registration as a [`Signature`]. The synthesizer in
//! [`crate::schema`] reads it the way a reflective runtime would read a
//! function's signature.
//!
//! ```
//! use libretto::{ParamType, Signature};
//! use serde_json::json;
//!
//! let sig = Signature::new("get_weather")
//!     .doc("Current weather for a city.")
//!     .param("city", ParamType::String)
//!     .param_with_default("units", ParamType::String, json!("metric"))
//!     .returns(ParamType::String);
//!
//! assert_eq!(sig.params().len(), 2);
//! ```

use std::fmt;

use schemars::JsonSchema;
use serde_json::{json, Map, Value};

/// Declared semantic type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParamType {
    /// No declaration; anything is accepted.
    #[default]
    Any,
    String,
    Integer,
    Number,
    Boolean,
    /// Homogeneous array of the inner type.
    Array(Box<ParamType>),
    /// Object whose values are all of the inner type.
    Object(Box<ParamType>),
    /// The inner type or `null`. Nullability says nothing about whether the
    /// argument may be omitted.
    Nullable(Box<ParamType>),
}

impl ParamType {
    pub fn array(items: ParamType) -> Self {
        ParamType::Array(Box::new(items))
    }

    pub fn object(values: ParamType) -> Self {
        ParamType::Object(Box::new(values))
    }

    pub fn nullable(inner: ParamType) -> Self {
        match inner {
            ParamType::Nullable(_) | ParamType::Any => inner,
            other => ParamType::Nullable(Box::new(other)),
        }
    }

    /// Derive the declared type of a Rust type from its JSON Schema.
    ///
    /// `Option<T>` becomes `Nullable`; structs become `Object(Any)`.
    pub fn of<T: JsonSchema>() -> Self {
        Self::from_json_schema(&schema_for::<T>())
    }

    /// Read a declared type back out of a JSON Schema fragment.
    pub fn from_json_schema(schema: &Value) -> Self {
        let object = match schema {
            Value::Object(object) => object,
            _ => return ParamType::Any,
        };

        match object.get("type") {
            Some(Value::String(name)) => Self::from_type_name(name, object),
            Some(Value::Array(names)) => {
                let names: Vec<&str> = names.iter().filter_map(Value::as_str).collect();
                let nullable = names.contains(&"null");
                let concrete: Vec<&str> = names.into_iter().filter(|n| *n != "null").collect();
                let inner = match concrete.as_slice() {
                    [single] => Self::from_type_name(single, object),
                    _ => ParamType::Any,
                };
                if nullable {
                    ParamType::nullable(inner)
                } else {
                    inner
                }
            }
            _ => {
                let variants = object
                    .get("anyOf")
                    .or_else(|| object.get("oneOf"))
                    .and_then(Value::as_array);
                match variants {
                    Some(variants) => Self::from_alternatives(variants),
                    None => ParamType::Any,
                }
            }
        }
    }

    fn from_type_name(name: &str, object: &Map<String, Value>) -> Self {
        match name {
            "string" => ParamType::String,
            "integer" => ParamType::Integer,
            "number" => ParamType::Number,
            "boolean" => ParamType::Boolean,
            "array" => ParamType::array(
                object
                    .get("items")
                    .map(Self::from_json_schema)
                    .unwrap_or_default(),
            ),
            "object" => ParamType::object(
                object
                    .get("additionalProperties")
                    .filter(|v| v.is_object())
                    .map(Self::from_json_schema)
                    .unwrap_or_default(),
            ),
            _ => ParamType::Any,
        }
    }

    fn from_alternatives(variants: &[Value]) -> Self {
        let is_null = |v: &Value| v.get("type").and_then(Value::as_str) == Some("null");
        let nullable = variants.iter().any(is_null);
        let concrete: Vec<&Value> = variants.iter().filter(|v| !is_null(v)).collect();

        let inner = match concrete.as_slice() {
            [single] => Self::from_json_schema(single),
            _ => ParamType::Any,
        };
        if nullable {
            ParamType::nullable(inner)
        } else {
            inner
        }
    }

    /// JSON Schema fragment for this type, as used in a tool's `inputSchema`.
    pub fn json_schema(&self) -> Value {
        match self {
            ParamType::Any => json!({}),
            ParamType::String => json!({ "type": "string" }),
            ParamType::Integer => json!({ "type": "integer" }),
            ParamType::Number => json!({ "type": "number" }),
            ParamType::Boolean => json!({ "type": "boolean" }),
            ParamType::Array(items) => match items.as_ref() {
                ParamType::Any => json!({ "type": "array" }),
                items => json!({ "type": "array", "items": items.json_schema() }),
            },
            ParamType::Object(values) => match values.as_ref() {
                ParamType::Any => json!({ "type": "object" }),
                values => json!({ "type": "object", "additionalProperties": values.json_schema() }),
            },
            ParamType::Nullable(inner) => {
                let mut schema = inner.json_schema();
                if let Some(Value::String(name)) = schema.get("type").cloned() {
                    schema["type"] = json!([name, "null"]);
                }
                schema
            }
        }
    }

    /// Check `value` against this type, returning the value as it should be
    /// passed on.
    ///
    /// Integral floats such as `3.0` are accepted for `Integer` and
    /// normalized to `3`.
    pub fn coerce(&self, value: Value) -> Option<Value> {
        match (self, value) {
            (ParamType::Any, value) => Some(value),
            (ParamType::Nullable(_), Value::Null) => Some(Value::Null),
            (ParamType::Nullable(inner), value) => inner.coerce(value),
            (ParamType::String, value @ Value::String(_)) => Some(value),
            (ParamType::Boolean, value @ Value::Bool(_)) => Some(value),
            (ParamType::Number, value @ Value::Number(_)) => Some(value),
            (ParamType::Integer, Value::Number(n)) => {
                if n.is_i64() || n.is_u64() {
                    Some(Value::Number(n))
                } else {
                    n.as_f64().and_then(integral).map(Value::from)
                }
            }
            (ParamType::Array(items), Value::Array(values)) => values
                .into_iter()
                .map(|v| items.coerce(v))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            (ParamType::Object(inner), Value::Object(map)) => map
                .into_iter()
                .map(|(k, v)| inner.coerce(v).map(|v| (k, v)))
                .collect::<Option<Map<_, _>>>()
                .map(Value::Object),
            _ => None,
        }
    }

    /// True when `value` type-checks against this type.
    pub fn accepts(&self, value: &Value) -> bool {
        self.coerce(value.clone()).is_some()
    }

    /// Parse a textual value (a URI template variable, say) into this type.
    pub fn parse_str(&self, raw: &str) -> Option<Value> {
        match self {
            ParamType::Any | ParamType::String => Some(Value::String(raw.to_string())),
            ParamType::Integer => raw.parse::<i64>().ok().map(Value::from),
            ParamType::Number => raw
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            ParamType::Boolean => raw.parse::<bool>().ok().map(Value::Bool),
            ParamType::Nullable(inner) => inner.parse_str(raw),
            ParamType::Array(_) | ParamType::Object(_) => serde_json::from_str::<Value>(raw)
                .ok()
                .and_then(|value| self.coerce(value)),
        }
    }
}

fn integral(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Any => f.write_str("any"),
            ParamType::String => f.write_str("string"),
            ParamType::Integer => f.write_str("integer"),
            ParamType::Number => f.write_str("number"),
            ParamType::Boolean => f.write_str("boolean"),
            ParamType::Array(items) => write!(f, "array<{}>", items),
            ParamType::Object(values) => write!(f, "object<{}>", values),
            ParamType::Nullable(inner) => write!(f, "{} | null", inner),
        }
    }
}

/// JSON type name of a value, for mismatch reports.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn schema_for<T: JsonSchema>() -> Value {
    let settings = schemars::generate::SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
    });
    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    serde_json::to_value(schema).unwrap_or_default()
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: ParamType,
    /// Present iff the parameter was declared with a default.
    pub default: Option<Value>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// The declared shape of a handler: ordered parameters, documentation and
/// return type.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    name: String,
    doc: Option<String>,
    params: Vec<Parameter>,
    returns: ParamType,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: Vec::new(),
            returns: ParamType::Any,
        }
    }

    /// Documentation text; becomes the descriptor's description.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Append a parameter without a default.
    pub fn param(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.params.push(Parameter::new(name, ty));
        self
    }

    /// Append a parameter whose type is undeclared.
    pub fn untyped(self, name: impl Into<String>) -> Self {
        self.param(name, ParamType::Any)
    }

    /// Append a parameter with a default value.
    pub fn param_with_default(
        mut self,
        name: impl Into<String>,
        ty: ParamType,
        default: Value,
    ) -> Self {
        self.params
            .push(Parameter::new(name, ty).with_default(default));
        self
    }

    /// Append a parameter whose type is derived from a Rust type.
    pub fn typed<T: JsonSchema>(self, name: impl Into<String>) -> Self {
        self.param(name, ParamType::of::<T>())
    }

    pub fn returns(mut self, ty: ParamType) -> Self {
        self.returns = ty;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc_text(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn return_type(&self) -> &ParamType {
        &self.returns
    }
}
