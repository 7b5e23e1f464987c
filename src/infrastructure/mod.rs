//! Infrastructure Layer
//!
//! Everything that touches the disk.
//!
//! ## Structure
//!
//! - `fs/` - Atomic writer, path resolver, tilde expansion
//! - `lock` - Per-file write locks

pub mod fs;
pub mod lock;

pub use fs::{atomic_write, write_json, PathResolver};
pub use lock::PathLocks;
