//! Rocket Catalog - JSON-backed store for domains, solutions and entity schemas
//!
//! The catalog lives in two array files (`domains.json`, `solutions.json`)
//! plus one file per entity schema under `<root>/<domain>/schemas/`. Every
//! operation validates its input first, keeps derived paths inside the data
//! root, enforces solution → domain references and persists atomically.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod store;
pub mod tools;
pub mod validate;

// Re-exports for convenience
pub use config::Config;
pub use domain::entities::{Domain, EntitySchema, EntitySummary, Property, Solution};
pub use domain::value_objects::{CatalogKind, Identifier};
pub use error::{CatalogError, CatalogResult, ErrorKind};
pub use infrastructure::PathResolver;
pub use store::{CatalogStore, DomainDeletion, EntityRecord, SchemaAudit};
pub use tools::{call_tool, list_tools, Tool};
