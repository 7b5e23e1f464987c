//! Domain create/update inputs.

use serde_json::Map;

use super::fields::{
    check_allowed_keys, optional_integer, optional_string, optional_string_list,
    required_identifier, required_integer, required_string, required_string_list, Args,
};
use crate::domain::entities::Domain;
use crate::domain::value_objects::Identifier;
use crate::error::{CatalogError, CatalogResult};

const CREATE_FIELDS: &[&str] = &["name", "label", "description", "icon", "order", "tags"];
/// Fields `update-domain` may change. `name` selects the record.
pub const MUTABLE_FIELDS: &[&str] = &["label", "description", "icon", "order", "tags"];

pub fn parse_new(args: &Args) -> CatalogResult<Domain> {
    check_allowed_keys(args, CREATE_FIELDS)?;
    Ok(Domain {
        name: required_identifier(args, "name")?.into_string(),
        label: required_string(args, "label")?,
        description: required_string(args, "description")?,
        icon: required_string(args, "icon")?,
        order: required_integer(args, "order")?,
        tags: required_string_list(args, "tags", 1)?,
        extra: Map::new(),
    })
}

/// Supplied fields of an `update-domain` request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainPatch {
    pub label: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i64>,
    pub tags: Option<Vec<String>>,
}

impl DomainPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, domain: &mut Domain) {
        if let Some(label) = self.label {
            domain.label = label;
        }
        if let Some(description) = self.description {
            domain.description = description;
        }
        if let Some(icon) = self.icon {
            domain.icon = icon;
        }
        if let Some(order) = self.order {
            domain.order = order;
        }
        if let Some(tags) = self.tags {
            domain.tags = tags;
        }
    }
}

pub fn parse_patch(args: &Args) -> CatalogResult<(Identifier, DomainPatch)> {
    let name = required_identifier(args, "name")?;
    let mut fields = args.clone();
    fields.remove("name");
    check_allowed_keys(&fields, MUTABLE_FIELDS)?;

    let patch = DomainPatch {
        label: optional_string(&fields, "label")?,
        description: optional_string(&fields, "description")?,
        icon: optional_string(&fields, "icon")?,
        order: optional_integer(&fields, "order")?,
        tags: optional_string_list(&fields, "tags", 1)?,
    };
    if patch.is_empty() {
        return Err(CatalogError::invalid(
            "arguments",
            format!("supply at least one of: {}", MUTABLE_FIELDS.join(", ")),
        ));
    }
    Ok((name, patch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::validate::arguments;
    use serde_json::{json, Value};

    fn args(value: Value) -> Args {
        arguments(Some(&value)).unwrap()
    }

    fn retail() -> Value {
        json!({
            "name": "retail",
            "label": "Retail",
            "description": "d",
            "icon": "i",
            "order": 1,
            "tags": ["x"]
        })
    }

    #[test]
    fn parse_new_accepts_complete_domain() {
        let domain = parse_new(&args(retail())).unwrap();
        assert_eq!(domain.name, "retail");
        assert_eq!(domain.order, 1);
        assert_eq!(domain.tags, vec!["x"]);
    }

    #[test]
    fn parse_new_rejects_boolean_order() {
        let mut raw = retail();
        raw["order"] = json!(true);
        let err = parse_new(&args(raw)).unwrap_err();
        assert!(err.to_string().contains("'order'"));
    }

    #[test]
    fn parse_new_requires_a_tag() {
        let mut raw = retail();
        raw["tags"] = json!([]);
        assert_eq!(parse_new(&args(raw)).unwrap_err().kind(), ErrorKind::Input);
    }

    #[test]
    fn parse_new_rejects_path_like_name() {
        let mut raw = retail();
        raw["name"] = json!("../retail");
        assert!(parse_new(&args(raw)).is_err());
    }

    #[test]
    fn patch_rejects_unknown_field() {
        let err = parse_patch(&args(json!({ "name": "retail", "colour": "red" }))).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedField { ref key, .. } if key == "colour"));
    }

    #[test]
    fn patch_requires_some_field() {
        let err = parse_patch(&args(json!({ "name": "retail" }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn patch_applies_only_supplied_fields() {
        let mut domain = parse_new(&args(retail())).unwrap();
        let (_, patch) = parse_patch(&args(json!({ "name": "retail", "order": 7 }))).unwrap();
        patch.apply(&mut domain);
        assert_eq!(domain.order, 7);
        assert_eq!(domain.label, "Retail");
    }
}
