//! File system access
//!
//! Atomic writes, path resolution and tilde expansion.

mod atomic;
mod home;
mod resolver;

pub use atomic::{atomic_write, write_json};
pub use home::expand_home;
pub use resolver::PathResolver;
