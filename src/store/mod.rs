//! The catalog store
//!
//! [`CatalogStore`] owns the path resolver, the catalog caches and the
//! per-file write locks. Build one per process (or per data directory) and
//! share it by reference; there is no global state.
//!
//! Every mutation follows the same sequence:
//! validated input → resolve path(s) → take write lock(s) → read current
//! state → integrity checks → atomic write → replace cache.

mod cache;
mod domains;
mod entities;
pub mod integrity;
mod solutions;

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tracing::info;

use crate::config::Config;
use crate::domain::entities::{CatalogRecord, Domain, Solution};
use crate::domain::value_objects::CatalogKind;
use crate::error::{CatalogError, CatalogResult, RecordKind};
use crate::infrastructure::{write_json, PathLocks, PathResolver};

pub use cache::CatalogCache;
pub use domains::DomainDeletion;
pub use entities::{EntityRecord, SchemaAudit};

#[derive(Debug)]
pub struct CatalogStore {
    resolver: RwLock<PathResolver>,
    domains: CatalogCache<Domain>,
    solutions: CatalogCache<Solution>,
    locks: PathLocks,
}

impl CatalogStore {
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            resolver: RwLock::new(resolver),
            domains: CatalogCache::new(CatalogKind::Domains),
            solutions: CatalogCache::new(CatalogKind::Solutions),
            locks: PathLocks::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(PathResolver::new(config.data.clone()))
    }

    /// Store over a single directory holding both catalogs and the schemas.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::new(PathResolver::with_root(root))
    }

    /// Swap the path resolver. Caches keyed by the old paths are reloaded on
    /// next use.
    pub fn reconfigure(&self, resolver: PathResolver) {
        let mut current = self.resolver.write().unwrap_or_else(PoisonError::into_inner);
        *current = resolver;
    }

    pub fn resolver(&self) -> PathResolver {
        self.resolver
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn resolve_data_file(&self, kind: CatalogKind) -> PathBuf {
        self.resolver().resolve_data_file(kind)
    }

    pub fn data_root(&self) -> PathBuf {
        self.resolver().data_root()
    }

    /// Drop both catalog caches.
    pub fn invalidate(&self) {
        self.domains.invalidate();
        self.solutions.invalidate();
    }

    pub(crate) fn load_domains(&self, refresh: bool) -> CatalogResult<Vec<Domain>> {
        let path = self.resolve_data_file(CatalogKind::Domains);
        self.domains.load(&path, refresh)
    }

    pub(crate) fn load_solutions(&self, refresh: bool) -> CatalogResult<Vec<Solution>> {
        let path = self.resolve_data_file(CatalogKind::Solutions);
        self.solutions.load(&path, refresh)
    }

    /// Sorted names of every domain in the catalog.
    pub fn domain_names(&self) -> CatalogResult<Vec<String>> {
        let mut names: Vec<String> = self
            .load_domains(false)?
            .into_iter()
            .map(|d| d.name)
            .collect();
        names.sort();
        Ok(names)
    }

    fn write_domains(&self, path: &Path, entries: Vec<Domain>) -> CatalogResult<()> {
        let fingerprint = write_json(path, &entries)?;
        info!(path = %path.display(), count = entries.len(), "wrote domain catalog");
        self.domains.store(path, entries, fingerprint);
        Ok(())
    }

    fn write_solutions(&self, path: &Path, entries: Vec<Solution>) -> CatalogResult<()> {
        let fingerprint = write_json(path, &entries)?;
        info!(path = %path.display(), count = entries.len(), "wrote solution catalog");
        self.solutions.store(path, entries, fingerprint);
        Ok(())
    }
}

fn find<'a, T: CatalogRecord>(
    entries: &'a [T],
    kind: RecordKind,
    name: &str,
) -> CatalogResult<&'a T> {
    entries
        .iter()
        .find(|entry| entry.name() == name)
        .ok_or_else(|| CatalogError::NotFound {
            kind,
            name: name.to_string(),
        })
}

fn position<T: CatalogRecord>(entries: &[T], kind: RecordKind, name: &str) -> CatalogResult<usize> {
    entries
        .iter()
        .position(|entry| entry.name() == name)
        .ok_or_else(|| CatalogError::NotFound {
            kind,
            name: name.to_string(),
        })
}

fn ensure_absent<T: CatalogRecord>(entries: &[T], kind: RecordKind, name: &str) -> CatalogResult<()> {
    if entries.iter().any(|entry| entry.name() == name) {
        Err(CatalogError::AlreadyExists {
            kind,
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}
