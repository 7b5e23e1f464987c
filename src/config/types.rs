//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CatalogKind;
use crate::error::CatalogResult;

use super::loader::{self, ConfigWarning};

/// Where the catalog lives on disk.
///
/// ```toml
/// [data]
/// root = "data"
/// domains = "data/domains.json"
/// solutions = "data/solutions.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the per-domain schema folders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solutions: Option<PathBuf>,
}

impl DataConfig {
    /// Configured location of a catalog file, if any.
    pub fn catalog_override(&self, kind: CatalogKind) -> Option<&Path> {
        match kind {
            CatalogKind::Domains => self.domains.as_deref(),
            CatalogKind::Solutions => self.solutions.as_deref(),
        }
    }
}

/// Logging defaults; `RUST_LOG` still wins when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> CatalogResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load the explicit file, the default file, or defaults; then apply the
    /// environment.
    pub fn load_or_default(explicit: Option<&Path>) -> CatalogResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(explicit)
    }

    /// Apply environment variable overrides (`MCP_*`)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides_from(self, |key| std::env::var(key).ok())
    }
}
