use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `@type` stamped on every entity schema file.
pub const SCHEMA_TYPE: &str = "Schema";
/// `@context` stamped on every entity schema file.
pub const SCHEMA_CONTEXT: &str = "https://rocketschema.org/context";

fn default_schema_type() -> String {
    SCHEMA_TYPE.to_string()
}

fn default_schema_context() -> String {
    SCHEMA_CONTEXT.to_string()
}

/// Contents of `<root>/<domain>/schemas/<name>.json`.
///
/// The owning domain is implied by the file location and is not stored.
/// Missing `@type`/`@context` deserialize to the defaults; present values are
/// kept as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    #[serde(rename = "@type", default = "default_schema_type")]
    pub schema_type: String,
    #[serde(rename = "@context", default = "default_schema_context")]
    pub context: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub examples: Vec<Example>,
    /// Keys such as `extends` or `inheritedProperties`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntitySchema {
    pub fn new(
        name: String,
        description: String,
        properties: Vec<Property>,
        examples: Vec<Example>,
    ) -> Self {
        Self {
            schema_type: default_schema_type(),
            context: default_schema_context(),
            name,
            description: Some(description),
            properties,
            examples,
            extra: Map::new(),
        }
    }
}

/// One property of an entity schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<PropertyMode>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Schema a property was inherited from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A property type: a single type name or a union of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyType {
    Single(String),
    Union(Vec<String>),
}

/// How a property's value comes to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyMode {
    Stored,
    Enum,
    Computed,
}

impl PropertyMode {
    pub const ALL: [PropertyMode; 3] = [PropertyMode::Stored, PropertyMode::Enum, PropertyMode::Computed];

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyMode::Stored => "stored",
            PropertyMode::Enum => "enum",
            PropertyMode::Computed => "computed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == raw)
    }
}

impl fmt::Display for PropertyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An example instance. Open schema: only `@type` is guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Example(pub Map<String, Value>);

impl Example {
    pub fn type_name(&self) -> Option<&str> {
        self.0.get("@type").and_then(Value::as_str)
    }
}

/// Row returned by entity listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub domain: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub path: String,
}
