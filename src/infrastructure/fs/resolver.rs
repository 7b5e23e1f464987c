//! Catalog path resolution
//!
//! Catalog files come from, in order:
//! 1. the per-catalog override in [`DataConfig`] (file or environment)
//! 2. the first `data/<file>` found walking up from the install location
//! 3. `<cwd>/data/<file>`
//!
//! Entity schema paths are derived from the data root and always pass the
//! sandbox check before they are returned.

use std::path::{Path, PathBuf};

use crate::config::DataConfig;
use crate::domain::value_objects::{ensure_within_root, CatalogKind, Identifier};
use crate::error::CatalogResult;

const DATA_DIR: &str = "data";
const SCHEMAS_DIR: &str = "schemas";
const SCHEMA_EXTENSION: &str = "json";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathResolver {
    data: DataConfig,
    /// Directory the upward search starts from; the executable's directory
    /// when unset.
    search_start: Option<PathBuf>,
}

impl PathResolver {
    pub fn new(data: DataConfig) -> Self {
        Self {
            data,
            search_start: None,
        }
    }

    /// Resolver rooted at a single directory holding both catalogs.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self::new(DataConfig {
            domains: Some(root.join(CatalogKind::Domains.file_name())),
            solutions: Some(root.join(CatalogKind::Solutions.file_name())),
            root: Some(root),
        })
    }

    pub fn with_search_start(mut self, start: impl Into<PathBuf>) -> Self {
        self.search_start = Some(start.into());
        self
    }

    pub fn data_config(&self) -> &DataConfig {
        &self.data
    }

    /// Location of a catalog file. Does not require the file to exist.
    pub fn resolve_data_file(&self, kind: CatalogKind) -> PathBuf {
        if let Some(path) = self.data.catalog_override(kind) {
            return path.to_path_buf();
        }

        let relative = Path::new(DATA_DIR).join(kind.file_name());
        if let Some(found) = self.search_upward(&relative) {
            return found;
        }

        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(relative)
    }

    /// Directory holding `<domain>/schemas/` folders.
    ///
    /// Configured explicitly, otherwise the directory of the domain catalog.
    pub fn data_root(&self) -> PathBuf {
        if let Some(root) = &self.data.root {
            return root.clone();
        }
        let domains = self.resolve_data_file(CatalogKind::Domains);
        match domains.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// `<root>/<domain>/schemas`, sandbox-checked.
    pub fn schema_dir(&self, domain: &Identifier) -> CatalogResult<PathBuf> {
        let root = self.data_root();
        ensure_within_root(&root.join(domain.as_str()).join(SCHEMAS_DIR), &root)
    }

    /// `<root>/<domain>/schemas/<name>.json`, sandbox-checked.
    ///
    /// Both parts are validated as identifiers first, so raw caller strings
    /// can be passed straight through.
    pub fn entity_schema_path(&self, domain: &str, name: &str) -> CatalogResult<PathBuf> {
        let domain = Identifier::parse("domain", domain)?;
        let name = Identifier::parse("name", name)?;
        self.schema_file(&domain, &name)
    }

    pub fn schema_file(&self, domain: &Identifier, name: &Identifier) -> CatalogResult<PathBuf> {
        let root = self.data_root();
        let candidate = root
            .join(domain.as_str())
            .join(SCHEMAS_DIR)
            .join(format!("{}.{SCHEMA_EXTENSION}", name.as_str()));
        ensure_within_root(&candidate, &root)
    }

    /// Whether `path` looks like an entity schema file (not a temp or lock file).
    pub fn is_schema_file(path: &Path) -> bool {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext == SCHEMA_EXTENSION);
        let visible = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| !n.starts_with('.'));
        is_json && visible && path.is_file()
    }

    fn search_upward(&self, relative: &Path) -> Option<PathBuf> {
        let start = match &self.search_start {
            Some(start) => start.clone(),
            None => std::env::current_exe().ok()?.parent()?.to_path_buf(),
        };
        start
            .ancestors()
            .map(|dir| dir.join(relative))
            .find(|candidate| candidate.is_file())
    }
}
