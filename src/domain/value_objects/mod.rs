//! Domain Value Objects
//!
//! Immutable value types shared by the validators and the store.

mod catalog_kind;
mod hash;
mod identifier;
mod path;

pub use catalog_kind::CatalogKind;
pub use hash::ContentHash;
pub use identifier::Identifier;
pub use path::{absolutize, ensure_within_root};
