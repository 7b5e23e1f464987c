use std::fmt;

/// The two array-shaped catalog files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogKind {
    Domains,
    Solutions,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 2] = [CatalogKind::Domains, CatalogKind::Solutions];

    /// File name under the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            CatalogKind::Domains => "domains.json",
            CatalogKind::Solutions => "solutions.json",
        }
    }

    /// Environment variable that overrides this catalog's location.
    pub fn env_var(self) -> &'static str {
        match self {
            CatalogKind::Domains => "MCP_DOMAINS_PATH",
            CatalogKind::Solutions => "MCP_SOLUTIONS_PATH",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CatalogKind::Domains => "domains",
            CatalogKind::Solutions => "solutions",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
