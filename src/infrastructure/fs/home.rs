//! Tilde expansion for configured paths.

use std::path::{Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
///
/// Paths that do not start with `~`, or a home directory that cannot be
/// determined, leave the path unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
