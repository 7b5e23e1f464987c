//! Atomic file writer
//!
//! Writes go to a sibling temp file in the destination directory, are synced,
//! then renamed over the destination. Readers see either the old bytes or the
//! new bytes. A crash before the rename leaves the old file in place and, at
//! worst, a `.<name>.*.tmp` file next to it.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::value_objects::ContentHash;
use crate::error::{CatalogError, CatalogResult};

/// Write `content` to `path` atomically, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> CatalogResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| CatalogError::io(dir, e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalog".to_string());

    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| CatalogError::io(dir, e))?;
    temp.write_all(content)
        .map_err(|e| CatalogError::io(temp.path(), e))?;
    temp.flush().map_err(|e| CatalogError::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| CatalogError::io(temp.path(), e))?;
    temp.persist(path)
        .map_err(|err| CatalogError::io(path, err.error))?;

    #[cfg(unix)]
    {
        if let Ok(dir) = fs::File::open(dir) {
            let _ = dir.sync_all();
        }
    }
    Ok(())
}

/// Encode `value` as pretty JSON and write it atomically.
///
/// Returns the fingerprint of the bytes written.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> CatalogResult<ContentHash> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    atomic_write(path, &bytes)?;
    Ok(ContentHash::from_bytes(&bytes))
}
