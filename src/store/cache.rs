//! In-memory copies of the array catalogs.
//!
//! A cache entry remembers the path it was read from and the fingerprint of
//! the bytes it corresponds to. It is a disposable view: the files on disk are
//! the source of truth.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::value_objects::{CatalogKind, ContentHash};
use crate::error::{CatalogError, CatalogResult};
use crate::validate::fields::type_name;

#[derive(Debug, Clone)]
struct CachedCatalog<T> {
    source: PathBuf,
    /// `None` when the file did not exist at load time.
    fingerprint: Option<ContentHash>,
    entries: Vec<T>,
}

#[derive(Debug)]
pub struct CatalogCache<T> {
    kind: CatalogKind,
    slot: Mutex<Option<CachedCatalog<T>>>,
}

impl<T: DeserializeOwned + Clone> CatalogCache<T> {
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            slot: Mutex::new(None),
        }
    }

    /// Cached entries for `path`, reading the file on a miss or when
    /// `refresh` is set.
    pub fn load(&self, path: &Path, refresh: bool) -> CatalogResult<Vec<T>> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = slot.as_ref() {
            if !refresh && cached.source == path {
                debug!(catalog = %self.kind, "catalog cache hit");
                return Ok(cached.entries.clone());
            }
        }

        debug!(catalog = %self.kind, path = %path.display(), refresh, "reading catalog");
        let fresh = self.read(path)?;
        let entries = fresh.entries.clone();
        *slot = Some(fresh);
        Ok(entries)
    }

    /// Current on-disk state for a mutation. Must be called with the file's
    /// write lock held.
    ///
    /// The file is re-read and fingerprinted; the parsed cache is reused only
    /// when nothing outside this store has changed the file.
    pub fn load_for_update(&self, path: &Path) -> CatalogResult<Vec<T>> {
        let bytes = read_bytes(path)?;
        let fingerprint = bytes.as_deref().map(ContentHash::from_bytes);

        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = slot.as_ref() {
            if cached.source == path && cached.fingerprint == fingerprint {
                return Ok(cached.entries.clone());
            }
        }

        debug!(catalog = %self.kind, path = %path.display(), "catalog changed on disk, reparsing");
        let entries = match bytes.as_deref() {
            Some(bytes) => parse_catalog(path, bytes)?,
            None => Vec::new(),
        };
        *slot = Some(CachedCatalog {
            source: path.to_path_buf(),
            fingerprint,
            entries: entries.clone(),
        });
        Ok(entries)
    }

    /// Replace the cache with what was just written, without re-reading.
    pub fn store(&self, path: &Path, entries: Vec<T>, fingerprint: ContentHash) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CachedCatalog {
            source: path.to_path_buf(),
            fingerprint: Some(fingerprint),
            entries,
        });
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    /// Path the cached copy came from, if any.
    pub fn source(&self) -> Option<PathBuf> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().map(|cached| cached.source.clone())
    }

    fn read(&self, path: &Path) -> CatalogResult<CachedCatalog<T>> {
        let bytes = read_bytes(path)?;
        let entries = match bytes.as_deref() {
            Some(bytes) => parse_catalog(path, bytes)?,
            None => Vec::new(),
        };
        Ok(CachedCatalog {
            source: path.to_path_buf(),
            fingerprint: bytes.as_deref().map(ContentHash::from_bytes),
            entries,
        })
    }
}

/// File contents, or `None` when the file does not exist yet.
fn read_bytes(path: &Path) -> CatalogResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
        Err(e) => Err(CatalogError::io(path, e)),
    }
}

fn parse_catalog<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> CatalogResult<Vec<T>> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| CatalogError::Format {
        path: path.to_path_buf(),
        message: format!("invalid JSON: {e}"),
    })?;
    if !value.is_array() {
        return Err(CatalogError::Format {
            path: path.to_path_buf(),
            message: format!("expected a JSON array, found {}", type_name(&value)),
        });
    }
    serde_json::from_value(value).map_err(|e| CatalogError::Format {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
