//! Entity schema create/update inputs.

use serde_json::{Map, Value};

use super::fields::{
    check_allowed_keys, normalize_string, optional_identifier, optional_string, present,
    required_identifier, required_string, type_name, Args,
};
use crate::domain::entities::{EntitySchema, Example, Property, PropertyMode, PropertyType};
use crate::domain::value_objects::Identifier;
use crate::error::{CatalogError, CatalogResult};

const REQUEST_FIELDS: &[&str] = &["domain", "name", "description", "properties", "examples"];
/// Fields `update-entity` may change.
pub const MUTABLE_FIELDS: &[&str] = &["description", "properties", "examples"];
const PROPERTY_FIELDS: &[&str] = &[
    "name",
    "type",
    "mode",
    "description",
    "required",
    "format",
    "example",
    "source",
];

/// A validated `create-entity` request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntity {
    pub domain: Identifier,
    pub name: Identifier,
    pub schema: EntitySchema,
}

/// A validated `update-entity` request.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityPatch {
    /// `None` searches every known domain.
    pub domain: Option<Identifier>,
    pub name: Identifier,
    pub description: Option<String>,
    pub properties: Option<Vec<Property>>,
    pub examples: Option<Vec<Example>>,
}

impl EntityPatch {
    /// Replace supplied fields and fill metadata that is missing.
    pub fn apply(self, schema: &mut EntitySchema) {
        if let Some(description) = self.description {
            schema.description = Some(description);
        }
        if let Some(properties) = self.properties {
            schema.properties = properties;
        }
        if let Some(examples) = self.examples {
            schema.examples = examples;
        }
        if schema.name.is_empty() {
            schema.name = self.name.into_string();
        }
    }
}

pub fn parse_new(args: &Args) -> CatalogResult<NewEntity> {
    check_allowed_keys(args, REQUEST_FIELDS)?;
    let domain = required_identifier(args, "domain")?;
    let name = required_identifier(args, "name")?;
    let description = required_string(args, "description")?;
    let properties = present(args, "properties")
        .ok_or_else(|| CatalogError::invalid("properties", "is required"))
        .and_then(normalize_properties)?;
    let examples = present(args, "examples")
        .ok_or_else(|| CatalogError::invalid("examples", "is required"))
        .and_then(normalize_examples)?;

    let schema = EntitySchema::new(name.to_string(), description, properties, examples);
    Ok(NewEntity {
        domain,
        name,
        schema,
    })
}

pub fn parse_patch(args: &Args) -> CatalogResult<EntityPatch> {
    check_allowed_keys(args, REQUEST_FIELDS)?;
    let patch = EntityPatch {
        domain: optional_identifier(args, "domain")?,
        name: required_identifier(args, "name")?,
        description: optional_string(args, "description")?,
        properties: present(args, "properties")
            .map(normalize_properties)
            .transpose()?,
        examples: present(args, "examples").map(normalize_examples).transpose()?,
    };
    if patch.description.is_none() && patch.properties.is_none() && patch.examples.is_none() {
        return Err(CatalogError::invalid(
            "arguments",
            format!("supply at least one of: {}", MUTABLE_FIELDS.join(", ")),
        ));
    }
    Ok(patch)
}

fn normalize_properties(value: &Value) -> CatalogResult<Vec<Property>> {
    let Value::Array(items) = value else {
        return Err(CatalogError::invalid(
            "properties",
            format!("must be a list of objects, got {}", type_name(value)),
        ));
    };
    if items.is_empty() {
        return Err(CatalogError::invalid("properties", "must contain at least 1 item(s)"));
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| normalize_property(&format!("properties[{i}]"), item))
        .collect()
}

fn normalize_property(path: &str, value: &Value) -> CatalogResult<Property> {
    let Value::Object(fields) = value else {
        return Err(CatalogError::invalid(
            path,
            format!("must be an object, got {}", type_name(value)),
        ));
    };
    check_allowed_keys(fields, PROPERTY_FIELDS)?;
    let field = |name: &str| format!("{path}.{name}");

    let mode_raw = fields
        .get("mode")
        .ok_or_else(|| CatalogError::invalid(field("mode"), "is required"))?;
    let mode = mode_raw
        .as_str()
        .and_then(|raw| PropertyMode::parse(raw.trim()))
        .ok_or_else(|| {
            let allowed: Vec<&str> = PropertyMode::ALL.iter().map(|m| m.as_str()).collect();
            CatalogError::invalid(
                field("mode"),
                format!("must be one of: {}", allowed.join(", ")),
            )
        })?;

    let required = match fields.get("required") {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(other) => {
            return Err(CatalogError::invalid(
                field("required"),
                format!("must be a boolean, got {}", type_name(other)),
            ))
        }
    };

    Ok(Property {
        name: normalize_string(&field("name"), fields.get("name").unwrap_or(&Value::Null))?,
        kind: normalize_property_type(&field("type"), fields.get("type").unwrap_or(&Value::Null))?,
        mode: Some(mode),
        description: normalize_string(
            &field("description"),
            fields.get("description").unwrap_or(&Value::Null),
        )?,
        required,
        format: optional_string(fields, "format").map_err(|_| {
            CatalogError::invalid(field("format"), "must be a non-empty string")
        })?,
        example: fields.get("example").filter(|v| !v.is_null()).cloned(),
        source: optional_string(fields, "source").map_err(|_| {
            CatalogError::invalid(field("source"), "must be a non-empty string")
        })?,
    })
}

fn normalize_property_type(field: &str, value: &Value) -> CatalogResult<PropertyType> {
    match value {
        Value::Array(items) if !items.is_empty() => items
            .iter()
            .enumerate()
            .map(|(i, item)| normalize_string(&format!("{field}[{i}]"), item))
            .collect::<CatalogResult<Vec<_>>>()
            .map(PropertyType::Union),
        Value::Array(_) => Err(CatalogError::invalid(field, "must not be an empty list")),
        other => normalize_string(field, other).map(PropertyType::Single),
    }
}

fn normalize_examples(value: &Value) -> CatalogResult<Vec<Example>> {
    let Value::Array(items) = value else {
        return Err(CatalogError::invalid(
            "examples",
            format!("must be a list of objects, got {}", type_name(value)),
        ));
    };
    if items.is_empty() {
        return Err(CatalogError::invalid("examples", "must contain at least 1 item(s)"));
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| normalize_example(&format!("examples[{i}]"), item))
        .collect()
}

/// Only `@type` is checked; the rest of the example passes through untouched.
fn normalize_example(path: &str, value: &Value) -> CatalogResult<Example> {
    let Value::Object(fields) = value else {
        return Err(CatalogError::invalid(
            path,
            format!("must be an object, got {}", type_name(value)),
        ));
    };
    normalize_string(
        &format!("{path}.@type"),
        fields.get("@type").unwrap_or(&Value::Null),
    )?;
    Ok(Example(Map::clone(fields)))
}
