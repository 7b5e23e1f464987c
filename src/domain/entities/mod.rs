//! Domain Entities
//!
//! Records held in the catalog files.
//! - `Domain` - a category grouping solutions and entity schemas
//! - `Solution` - an offering that references one or more domains
//! - `EntitySchema` - one structural description stored under a domain

mod domain;
mod entity_schema;
mod solution;

pub use domain::Domain;
pub use entity_schema::{
    EntitySchema, EntitySummary, Example, Property, PropertyMode, PropertyType, SCHEMA_CONTEXT,
    SCHEMA_TYPE,
};
pub use solution::Solution;

/// A record stored in a JSON array catalog, unique by `name`.
pub trait CatalogRecord {
    fn name(&self) -> &str;
}
