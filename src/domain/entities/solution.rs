use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CatalogRecord;

/// Entry of `solutions.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Solution {
    pub fn references(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }
}

impl CatalogRecord for Solution {
    fn name(&self) -> &str {
        &self.name
    }
}
