//! Solution create/update inputs.

use serde_json::{Map, Value};

use super::fields::{
    check_allowed_keys, normalize_identifier, optional_string, optional_string_list, present,
    required_identifier, required_string, required_string_list, type_name, Args,
};
use crate::domain::entities::Solution;
use crate::domain::value_objects::Identifier;
use crate::error::{CatalogError, CatalogResult};

const CREATE_FIELDS: &[&str] = &[
    "name",
    "label",
    "description",
    "icon",
    "color",
    "domains",
    "features",
    "useCases",
];
/// Fields `update-solution` may change. `name` selects the record.
pub const MUTABLE_FIELDS: &[&str] = &[
    "label",
    "description",
    "icon",
    "color",
    "domains",
    "features",
    "useCases",
];

/// Domain references are identifiers, at least one. Repeats are dropped,
/// keeping first-seen order.
fn normalize_domain_refs(value: &Value) -> CatalogResult<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(CatalogError::invalid(
            "domains",
            format!("must be a list of domain names, got {}", type_name(value)),
        ));
    };
    if items.is_empty() {
        return Err(CatalogError::invalid("domains", "must contain at least 1 item(s)"));
    }
    let mut domains: Vec<String> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let name = normalize_identifier(&format!("domains[{i}]"), item)?.into_string();
        if !domains.contains(&name) {
            domains.push(name);
        }
    }
    Ok(domains)
}

pub fn parse_new(args: &Args) -> CatalogResult<Solution> {
    check_allowed_keys(args, CREATE_FIELDS)?;
    let domains = present(args, "domains")
        .ok_or_else(|| CatalogError::invalid("domains", "is required"))
        .and_then(normalize_domain_refs)?;
    Ok(Solution {
        name: required_identifier(args, "name")?.into_string(),
        label: required_string(args, "label")?,
        description: required_string(args, "description")?,
        icon: required_string(args, "icon")?,
        color: required_string(args, "color")?,
        domains,
        features: required_string_list(args, "features", 1)?,
        use_cases: required_string_list(args, "useCases", 1)?,
        extra: Map::new(),
    })
}

/// Supplied fields of an `update-solution` request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionPatch {
    pub label: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub domains: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub use_cases: Option<Vec<String>>,
}

impl SolutionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, solution: &mut Solution) {
        if let Some(label) = self.label {
            solution.label = label;
        }
        if let Some(description) = self.description {
            solution.description = description;
        }
        if let Some(icon) = self.icon {
            solution.icon = icon;
        }
        if let Some(color) = self.color {
            solution.color = color;
        }
        if let Some(domains) = self.domains {
            solution.domains = domains;
        }
        if let Some(features) = self.features {
            solution.features = features;
        }
        if let Some(use_cases) = self.use_cases {
            solution.use_cases = use_cases;
        }
    }
}

pub fn parse_patch(args: &Args) -> CatalogResult<(Identifier, SolutionPatch)> {
    let name = required_identifier(args, "name")?;
    let mut fields = args.clone();
    fields.remove("name");
    check_allowed_keys(&fields, MUTABLE_FIELDS)?;

    let patch = SolutionPatch {
        label: optional_string(&fields, "label")?,
        description: optional_string(&fields, "description")?,
        icon: optional_string(&fields, "icon")?,
        color: optional_string(&fields, "color")?,
        domains: present(&fields, "domains").map(normalize_domain_refs).transpose()?,
        features: optional_string_list(&fields, "features", 1)?,
        use_cases: optional_string_list(&fields, "useCases", 1)?,
    };
    if patch.is_empty() {
        return Err(CatalogError::invalid(
            "arguments",
            format!("supply at least one of: {}", MUTABLE_FIELDS.join(", ")),
        ));
    }
    Ok((name, patch))
}
