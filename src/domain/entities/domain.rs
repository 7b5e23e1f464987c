use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CatalogRecord;

/// Entry of `domains.json`.
///
/// Keys the store does not model are kept in `extra` so rewriting the catalog
/// never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogRecord for Domain {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_keys_survive_round_trip() {
        let raw = json!({
            "name": "retail",
            "label": "Retail",
            "description": "Shops",
            "icon": "cart",
            "order": 2,
            "tags": ["commerce"],
            "color": "#ff0000"
        });
        let domain: Domain = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(domain.extra.get("color"), Some(&json!("#ff0000")));
        assert_eq!(serde_json::to_value(&domain).unwrap(), raw);
    }

    #[test]
    fn missing_optional_fields_default() {
        let domain: Domain = serde_json::from_value(json!({ "name": "bare" })).unwrap();
        assert_eq!(domain.order, 0);
        assert!(domain.tags.is_empty());
    }
}
