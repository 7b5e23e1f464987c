//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::value_objects::CatalogKind;
use crate::error::{CatalogError, CatalogResult};
use crate::infrastructure::fs::expand_home;

use super::types::Config;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "MCP_CATALOG_CONFIG";
/// Environment variable overriding the entity schema root.
pub const DATA_ROOT_ENV_VAR: &str = "MCP_DATA_ROOT";
/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> CatalogResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let mut config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| CatalogError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    config.data.root = config.data.root.map(|p| expand_home(&p));
    config.data.domains = config.data.domains.map(|p| expand_home(&p));
    config.data.solutions = config.data.solutions.map(|p| expand_home(&p));

    Ok((config, warnings))
}

/// The config file used when no `--config` flag is given.
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(expand_home(Path::new(&path)));
        }
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}

/// Load from an explicit file, the default file, or defaults; then apply env.
///
/// An explicit path that cannot be read is an error. A default path that does
/// not exist silently falls back to built-in defaults.
pub fn load_or_default(explicit: Option<&Path>) -> CatalogResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) if explicit.is_some() || path.is_file() => {
            debug!(path = %path.display(), "loading catalog config");
            load_with_warnings(&path)?
        }
        _ => (Config::default(), Vec::new()),
    };
    Ok((config.with_env_overrides(), warnings))
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Empty values are ignored.
pub fn with_env_overrides_from<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| {
        lookup(key)
            .filter(|v| !v.trim().is_empty())
            .map(|v| expand_home(Path::new(v.trim())))
    };

    if let Some(path) = read(CatalogKind::Domains.env_var()) {
        config.data.domains = Some(path);
    }
    if let Some(path) = read(CatalogKind::Solutions.env_var()) {
        config.data.solutions = Some(path);
    }
    if let Some(path) = read(DATA_ROOT_ENV_VAR) {
        config.data.root = Some(path);
    }
    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &["data", "root", "domains", "solutions", "log", "level"];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
