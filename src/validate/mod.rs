//! Input validators
//!
//! Turn caller-supplied argument bags into typed records before any file is
//! touched. A request that fails here never reaches the store's I/O.
//!
//! `conformance` audits schema files that are already on disk.

pub mod conformance;
pub mod domain;
pub mod entity;
pub mod fields;
pub mod solution;

pub use conformance::{check_schema, Conformance};
pub use domain::DomainPatch;
pub use entity::{EntityPatch, NewEntity};
pub use fields::{arguments, Args};
pub use solution::SolutionPatch;
