//! Record identifiers
//!
//! Domain, solution and entity names double as path segments, so they are
//! restricted to `[A-Za-z0-9_-]+`. Anything else (separators, dots,
//! whitespace, the empty string) is rejected before a path is ever built.

use std::fmt;

use crate::error::{CatalogError, CatalogResult};

/// A validated record name, safe to use as a single path component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validate `raw` as an identifier. `field` names the argument in errors.
    pub fn parse(field: &str, raw: &str) -> CatalogResult<Self> {
        if raw.is_empty() {
            return Err(CatalogError::invalid(field, "must not be empty"));
        }
        if let Some(bad) = raw.chars().find(|c| !Self::is_allowed(*c)) {
            return Err(CatalogError::invalid(
                field,
                format!("'{raw}' contains '{bad}'; only letters, digits, '_' and '-' are allowed"),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// Whether `raw` would be accepted by [`Identifier::parse`].
    pub fn is_valid(raw: &str) -> bool {
        !raw.is_empty() && raw.chars().all(Self::is_allowed)
    }

    fn is_allowed(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
