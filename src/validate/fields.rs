//! Field-level normalizers shared by every record validator.

use serde_json::{Map, Value};

use crate::domain::value_objects::Identifier;
use crate::error::{CatalogError, CatalogResult};

/// Argument bag handed to an operation.
pub type Args = Map<String, Value>;

/// Accept a missing or `null` bag as empty; anything but an object is rejected.
pub fn arguments(raw: Option<&Value>) -> CatalogResult<Args> {
    match raw {
        None | Some(Value::Null) => Ok(Args::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(other) => Err(CatalogError::invalid(
            "arguments",
            format!("must be an object, got {}", type_name(other)),
        )),
    }
}

/// Reject any key outside `allowed`.
pub fn check_allowed_keys(args: &Args, allowed: &[&str]) -> CatalogResult<()> {
    match args.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(CatalogError::UnsupportedField {
            key: key.clone(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }),
        None => Ok(()),
    }
}

/// Look up a field, treating `null` the same as absent.
pub fn present<'a>(args: &'a Args, field: &str) -> Option<&'a Value> {
    args.get(field).filter(|v| !v.is_null())
}

fn require<'a>(args: &'a Args, field: &str) -> CatalogResult<&'a Value> {
    present(args, field).ok_or_else(|| CatalogError::invalid(field, "is required"))
}

pub fn normalize_string(field: &str, value: &Value) -> CatalogResult<String> {
    let Value::String(raw) = value else {
        return Err(CatalogError::invalid(
            field,
            format!("must be a string, got {}", type_name(value)),
        ));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::invalid(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

pub fn required_string(args: &Args, field: &str) -> CatalogResult<String> {
    normalize_string(field, require(args, field)?)
}

pub fn optional_string(args: &Args, field: &str) -> CatalogResult<Option<String>> {
    present(args, field)
        .map(|value| normalize_string(field, value))
        .transpose()
}

pub fn normalize_string_list(field: &str, value: &Value, min: usize) -> CatalogResult<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(CatalogError::invalid(
            field,
            format!("must be a list of strings, got {}", type_name(value)),
        ));
    };
    if items.len() < min {
        return Err(CatalogError::invalid(
            field,
            format!("must contain at least {min} item(s)"),
        ));
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| normalize_string(&format!("{field}[{i}]"), item))
        .collect()
}

pub fn required_string_list(args: &Args, field: &str, min: usize) -> CatalogResult<Vec<String>> {
    normalize_string_list(field, require(args, field)?, min)
}

pub fn optional_string_list(
    args: &Args,
    field: &str,
    min: usize,
) -> CatalogResult<Option<Vec<String>>> {
    present(args, field)
        .map(|value| normalize_string_list(field, value, min))
        .transpose()
}

/// Integers only. JSON booleans are a distinct type and never coerce.
pub fn normalize_integer(field: &str, value: &Value) -> CatalogResult<i64> {
    match value {
        Value::Bool(_) => Err(CatalogError::invalid(
            field,
            "must be an integer, not a boolean",
        )),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| CatalogError::invalid(field, format!("must be an integer, got {n}"))),
        other => Err(CatalogError::invalid(
            field,
            format!("must be an integer, got {}", type_name(other)),
        )),
    }
}

pub fn required_integer(args: &Args, field: &str) -> CatalogResult<i64> {
    normalize_integer(field, require(args, field)?)
}

pub fn optional_integer(args: &Args, field: &str) -> CatalogResult<Option<i64>> {
    present(args, field)
        .map(|value| normalize_integer(field, value))
        .transpose()
}

pub fn optional_bool(args: &Args, field: &str) -> CatalogResult<Option<bool>> {
    match present(args, field) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(CatalogError::invalid(
            field,
            format!("must be a boolean, got {}", type_name(other)),
        )),
    }
}

pub fn flag(args: &Args, field: &str) -> CatalogResult<bool> {
    Ok(optional_bool(args, field)?.unwrap_or(false))
}

pub fn normalize_identifier(field: &str, value: &Value) -> CatalogResult<Identifier> {
    match value {
        Value::String(raw) => Identifier::parse(field, raw),
        other => Err(CatalogError::invalid(
            field,
            format!("must be a string, got {}", type_name(other)),
        )),
    }
}

pub fn required_identifier(args: &Args, field: &str) -> CatalogResult<Identifier> {
    normalize_identifier(field, require(args, field)?)
}

pub fn optional_identifier(args: &Args, field: &str) -> CatalogResult<Option<Identifier>> {
    present(args, field)
        .map(|value| normalize_identifier(field, value))
        .transpose()
}

pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn args(value: Value) -> Args {
        arguments(Some(&value)).unwrap()
    }

    #[test]
    fn strings_are_trimmed() {
        let a = args(json!({ "label": "  Retail \n" }));
        assert_eq!(required_string(&a, "label").unwrap(), "Retail");
    }

    #[test]
    fn blank_string_names_the_field() {
        let a = args(json!({ "label": "   " }));
        let err = required_string(&a, "label").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert!(err.to_string().contains("'label'"));
    }

    #[test]
    fn missing_and_null_are_both_absent() {
        let a = args(json!({ "icon": null }));
        assert_eq!(optional_string(&a, "icon").unwrap(), None);
        assert!(required_string(&a, "icon").is_err());
        assert!(required_string(&a, "label").is_err());
    }

    #[test]
    fn list_items_are_normalized_and_counted() {
        let a = args(json!({ "tags": [" a ", "b"] }));
        assert_eq!(required_string_list(&a, "tags", 1).unwrap(), vec!["a", "b"]);

        let empty = args(json!({ "tags": [] }));
        assert!(required_string_list(&empty, "tags", 1).is_err());

        let bad_item = args(json!({ "tags": ["ok", 3] }));
        let err = required_string_list(&bad_item, "tags", 1).unwrap_err();
        assert!(err.to_string().contains("tags[1]"));
    }

    #[test]
    fn integers_reject_booleans_and_floats() {
        assert_eq!(normalize_integer("order", &json!(4)).unwrap(), 4);
        assert_eq!(normalize_integer("order", &json!(-1)).unwrap(), -1);

        let err = normalize_integer("order", &json!(true)).unwrap_err();
        assert!(err.to_string().contains("not a boolean"));
        assert!(normalize_integer("order", &json!(1.5)).is_err());
        assert!(normalize_integer("order", &json!("1")).is_err());
    }

    #[test]
    fn disallowed_key_names_key_and_allowed_set() {
        let a = args(json!({ "label": "x", "name": "y" }));
        let err = check_allowed_keys(&a, &["label", "icon"]).unwrap_err();
        match err {
            CatalogError::UnsupportedField { key, allowed } => {
                assert_eq!(key, "name");
                assert_eq!(allowed, vec!["label", "icon"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_object_arguments_rejected() {
        assert!(arguments(Some(&json!([1, 2]))).is_err());
        assert!(arguments(None).unwrap().is_empty());
    }

    #[test]
    fn flag_defaults_false_and_rejects_strings() {
        assert!(!flag(&args(json!({})), "force").unwrap());
        assert!(flag(&args(json!({ "force": true })), "force").unwrap());
        assert!(flag(&args(json!({ "force": "yes" })), "force").is_err());
    }
}
