pub mod call;
pub mod doctor;
pub mod serve;
pub mod tools;

use std::path::Path;

use rocket_catalog::config::ConfigWarning;
use rocket_catalog::{CatalogStore, Config, PathResolver};
use tracing::warn;

/// Configuration and store for one CLI invocation.
pub struct Session {
    pub config: Config,
    pub store: CatalogStore,
}

impl Session {
    /// Apply `--data-root` on top of the loaded configuration and open the store.
    pub fn open(config: Config, data_root: Option<&Path>) -> Self {
        let resolver = match data_root {
            Some(root) => PathResolver::with_root(root),
            None => PathResolver::new(config.data.clone()),
        };
        let store = CatalogStore::new(resolver);
        Self { config, store }
    }
}

pub fn report_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        let location = match w.line {
            Some(line) => format!("{}:{line}", w.file.display()),
            None => w.file.display().to_string(),
        };
        match &w.suggestion {
            Some(suggestion) => warn!(
                key = %w.key,
                location = %location,
                "unknown config key (did you mean '{suggestion}'?)"
            ),
            None => warn!(key = %w.key, location = %location, "unknown config key"),
        }
    }
}

/// Display helper for optional paths in human output.
pub fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(unset)".to_string())
}
