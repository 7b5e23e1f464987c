//! Configuration module
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (`MCP_DOMAINS_PATH`, `MCP_SOLUTIONS_PATH`, `MCP_DATA_ROOT`)
//! 3. Config file (`--config`, `MCP_CATALOG_CONFIG`, or `./catalog.toml`)
//! 4. Built-in defaults: discovery of a `data/` directory (lowest priority)

mod loader;
mod types;

pub use loader::{
    default_config_path, with_env_overrides_from, ConfigWarning, CONFIG_ENV_VAR, DATA_ROOT_ENV_VAR,
    DEFAULT_CONFIG_FILE,
};
pub use types::{Config, DataConfig, LogConfig};
