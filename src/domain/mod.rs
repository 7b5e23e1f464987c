//! Domain Layer
//!
//! Catalog records and the value types that guard them. Nothing in here
//! touches the file system except the sandbox check in `value_objects::path`,
//! which has to resolve paths to compare them.
//!
//! ## Structure
//!
//! - `entities/` - Catalog records (Domain, Solution, EntitySchema)
//! - `value_objects/` - Identifiers, content fingerprints, sandboxed paths

pub mod entities;
pub mod value_objects;
