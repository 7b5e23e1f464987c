//! Per-file write locks
//!
//! A mutation holds the lock for every file it reads-then-writes, for the
//! whole read-validate-write sequence. Two layers:
//! - an in-process mutex per resolved path, so threads sharing a store queue up
//! - an advisory exclusive lock (`fs2`) on a sibling `<file>.lock`, so separate
//!   processes pointed at the same data directory do too
//!
//! Locks passed together are taken in sorted path order. When locks nest,
//! catalog files come before entity schema files.
//!
//! The in-process map keeps one entry per path ever locked for the life of
//! the store. A `.lock` file may be removed by its holder (see
//! [`remove_lock_file`]); a waiter that then wins the stale handle notices
//! and retries on the current file.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fs2::FileExt;
use tracing::{debug, trace};

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Default)]
pub struct PathLocks {
    slots: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the write lock of every path in `paths`.
    pub fn with_locks<T, F>(&self, paths: &[&Path], f: F) -> CatalogResult<T>
    where
        F: FnOnce() -> CatalogResult<T>,
    {
        let mut ordered: Vec<PathBuf> = paths.iter().map(|p| p.to_path_buf()).collect();
        ordered.sort();
        ordered.dedup();

        let slots: Vec<Arc<Mutex<()>>> = ordered.iter().map(|p| self.slot(p)).collect();
        let _guards: Vec<MutexGuard<'_, ()>> = slots
            .iter()
            .map(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner))
            .collect();

        let mut files = Vec::with_capacity(ordered.len());
        for path in &ordered {
            files.push(lock_file(path)?);
        }
        trace!(files = ordered.len(), "acquired write locks");

        let result = f();

        for file in files.iter().rev() {
            let _ = file.unlock();
        }
        result
    }

    /// Run `f` while holding the write lock of `path`.
    pub fn with_lock<T, F>(&self, path: &Path, f: F) -> CatalogResult<T>
    where
        F: FnOnce() -> CatalogResult<T>,
    {
        self.with_locks(&[path], f)
    }

    fn slot(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Path of the advisory lock file guarding `path`.
pub fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

fn lock_file(path: &Path) -> CatalogResult<File> {
    let lock_path = lock_path(path);
    if let Some(parent) = lock_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
        }
    }
    loop {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| CatalogError::io(&lock_path, e))?;
        file.lock_exclusive()
            .map_err(|e| CatalogError::io(&lock_path, e))?;
        if still_linked(&file, &lock_path) {
            return Ok(file);
        }
        let _ = file.unlock();
        trace!(path = %lock_path.display(), "lock file replaced while waiting, retrying");
    }
}

/// Remove the `.lock` sibling of `path`. Call only while holding its lock,
/// after the guarded file itself is gone.
pub fn remove_lock_file(path: &Path) {
    let lock_path = lock_path(path);
    match fs::remove_file(&lock_path) {
        Ok(()) => {}
        Err(e) if e.kind() == IoErrorKind::NotFound => {}
        Err(e) => debug!(path = %lock_path.display(), error = %e, "could not remove lock file"),
    }
}

/// Whether the locked handle is still the file at `lock_path`.
#[cfg(unix)]
fn still_linked(file: &File, lock_path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (file.metadata(), fs::metadata(lock_path)) {
        (Ok(held), Ok(current)) => held.dev() == current.dev() && held.ino() == current.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn still_linked(_file: &File, lock_path: &Path) -> bool {
    lock_path.exists()
}
