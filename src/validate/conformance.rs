//! Shape checks for entity schema files already on disk.
//!
//! Unlike the request validators, these collect every problem in a file
//! instead of stopping at the first one, and hand-edited files are allowed
//! to omit optional property fields such as `mode`.

use serde::Serialize;
use serde_json::{Map, Value};

use super::fields::type_name;
use crate::domain::entities::{PropertyMode, SCHEMA_CONTEXT, SCHEMA_TYPE};

/// Problems found in one schema file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conformance {
    /// Violations; the file does not conform while any are present.
    pub errors: Vec<String>,
    /// Reported but tolerated, e.g. a stub schema with no properties yet.
    pub warnings: Vec<String>,
}

impl Conformance {
    pub fn is_conforming(&self) -> bool {
        self.errors.is_empty()
    }
}

fn non_empty_str(object: &Map<String, Value>, key: &str) -> bool {
    object
        .get(key)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

fn valid_type(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => {
            !items.is_empty()
                && items
                    .iter()
                    .all(|item| item.as_str().is_some_and(|s| !s.trim().is_empty()))
        }
        _ => false,
    }
}

pub fn check_schema(object: &Map<String, Value>) -> Conformance {
    let mut report = Conformance::default();

    if object.get("@type").and_then(Value::as_str) != Some(SCHEMA_TYPE) {
        report.errors.push(format!("@type must be \"{SCHEMA_TYPE}\""));
    }
    if object.get("@context").and_then(Value::as_str) != Some(SCHEMA_CONTEXT) {
        report
            .errors
            .push(format!("@context must be \"{SCHEMA_CONTEXT}\""));
    }
    if !non_empty_str(object, "name") {
        report.errors.push("name is required and must be a string".to_string());
    }
    if !non_empty_str(object, "description") {
        report
            .errors
            .push("description is required and must be a string".to_string());
    }

    let properties = match object.get("properties") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            report.errors.push(format!(
                "properties must be a list, got {}",
                type_name(other)
            ));
            return report;
        }
        None => {
            report.errors.push("properties is required".to_string());
            return report;
        }
    };
    if properties.is_empty() {
        report
            .warnings
            .push("properties is empty (stub schema)".to_string());
    }

    for (i, property) in properties.iter().enumerate() {
        let Value::Object(fields) = property else {
            report.errors.push(format!(
                "properties[{i}] must be an object, got {}",
                type_name(property)
            ));
            continue;
        };
        let label = match fields.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => format!("properties[{i}] ({name})"),
            _ => {
                report.errors.push(format!("properties[{i}]: name is required"));
                format!("properties[{i}]")
            }
        };
        if !valid_type(fields.get("type")) {
            report.errors.push(format!("{label}: type is required"));
        }
        if !non_empty_str(fields, "description") {
            report.errors.push(format!("{label}: description is required"));
        }
        if let Some(mode) = fields.get("mode") {
            if mode.as_str().and_then(PropertyMode::parse).is_none() {
                let allowed: Vec<&str> = PropertyMode::ALL.iter().map(|m| m.as_str()).collect();
                report
                    .errors
                    .push(format!("{label}: mode must be one of: {}", allowed.join(", ")));
            }
        }
    }

    report
}
