//! Sandboxed paths
//!
//! Every file path the store derives from caller input is checked against the
//! data root before it is read, written or removed:
//! - `.` and `..` components are folded away
//! - the longest existing prefix is canonicalized, so symlinks are followed
//! - the result must be the root itself or a strict descendant of it

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{CatalogError, CatalogResult};

/// Resolve `path` to an absolute form without requiring it to exist.
///
/// Relative paths are joined onto the current directory. Parent components are
/// folded lexically, then the deepest existing ancestor is canonicalized and
/// the non-existent remainder re-appended.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    let mut existing = normalized.as_path();
    let mut missing: Vec<OsString> = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            let mut resolved = canonical;
            for part in missing.iter().rev() {
                resolved.push(part);
            }
            return Ok(resolved);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(normalized),
        }
    }
}

/// Check that `candidate` stays inside `root` and return its resolved form.
pub fn ensure_within_root(candidate: &Path, root: &Path) -> CatalogResult<PathBuf> {
    let resolved_root = absolutize(root).map_err(|e| CatalogError::io(root, e))?;
    let resolved = absolutize(candidate).map_err(|e| CatalogError::io(candidate, e))?;

    if resolved.starts_with(&resolved_root) {
        Ok(resolved)
    } else {
        Err(CatalogError::PathEscape {
            path: candidate.to_path_buf(),
            root: root.to_path_buf(),
        })
    }
}
