//! Error types for the catalog store
//!
//! Uses `thiserror` for library errors. Every variant maps onto one
//! [`ErrorKind`] so the dispatch layer can report failures without matching
//! on message text.

use std::fmt;
use std::path::PathBuf;

use serde_json::{json, Value};
use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Coarse failure taxonomy surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Input,
    Format,
    NotFound,
    Conflict,
    ReferentialConflict,
    PathEscape,
    Config,
    Io,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Input => "InputError",
            ErrorKind::Format => "FormatError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Conflict => "ConflictError",
            ErrorKind::ReferentialConflict => "ReferentialConflict",
            ErrorKind::PathEscape => "PathEscape",
            ErrorKind::Config => "ConfigError",
            ErrorKind::Io => "IoError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Missing or malformed argument field
    #[error("invalid '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// Argument key outside the allow-list for this operation
    #[error("unsupported field '{key}' (allowed: {})", .allowed.join(", "))]
    UnsupportedField { key: String, allowed: Vec<String> },

    /// A file's JSON shape does not match what the store expects
    #[error("malformed file {path}: {message}")]
    Format { path: PathBuf, message: String },

    /// Referenced record does not exist
    #[error("{kind} '{name}' not found")]
    NotFound { kind: RecordKind, name: String },

    /// Create targets a name that already exists
    #[error("{kind} '{name}' already exists")]
    AlreadyExists { kind: RecordKind, name: String },

    /// Solution references domains missing from the domain catalog
    #[error("unknown domain(s): {}", .missing.join(", "))]
    UnknownReference { missing: Vec<String> },

    /// Domain deletion blocked by solutions that still reference it
    #[error(
        "domain '{domain}' is referenced by solution(s): {}; pass force=true to delete anyway",
        .solutions.join(", ")
    )]
    ReferencedBy {
        domain: String,
        solutions: Vec<String>,
    },

    /// Derived path falls outside the data root (security issue)
    #[error("path '{path}' escapes data root '{root}'")]
    PathEscape { path: PathBuf, root: PathBuf },

    /// Configuration file could not be read or parsed
    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// IO error
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error while encoding a record
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::InvalidField { .. } | CatalogError::UnsupportedField { .. } => {
                ErrorKind::Input
            }
            CatalogError::Format { .. } => ErrorKind::Format,
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
            CatalogError::AlreadyExists { .. } => ErrorKind::Conflict,
            CatalogError::UnknownReference { .. } | CatalogError::ReferencedBy { .. } => {
                ErrorKind::ReferentialConflict
            }
            CatalogError::PathEscape { .. } => ErrorKind::PathEscape,
            CatalogError::Config { .. } => ErrorKind::Config,
            CatalogError::Io { .. } | CatalogError::Json(_) => ErrorKind::Io,
        }
    }

    /// Structured detail for the failure, keyed by what a caller acts on.
    pub fn details(&self) -> Value {
        match self {
            CatalogError::InvalidField { field, .. } => json!({ "field": field }),
            CatalogError::UnsupportedField { key, allowed } => {
                json!({ "field": key, "allowed": allowed })
            }
            CatalogError::Format { path, .. } | CatalogError::Config { path, .. } => {
                json!({ "path": path.display().to_string() })
            }
            CatalogError::NotFound { kind, name } | CatalogError::AlreadyExists { kind, name } => {
                json!({ "kind": kind.as_str(), "name": name })
            }
            CatalogError::UnknownReference { missing } => json!({ "missing": missing }),
            CatalogError::ReferencedBy { domain, solutions } => {
                json!({ "domain": domain, "solutions": solutions })
            }
            CatalogError::PathEscape { path, root } => json!({
                "path": path.display().to_string(),
                "root": root.display().to_string(),
            }),
            CatalogError::Io { path, .. } => json!({ "path": path.display().to_string() }),
            CatalogError::Json(_) => json!({}),
        }
    }

    /// Payload handed to the dispatch layer for a failed operation.
    pub fn to_payload(&self) -> Value {
        json!({
            "error": self.kind().as_str(),
            "message": self.to_string(),
            "details": self.details(),
        })
    }
}

/// The record families the store manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Domain,
    Solution,
    Entity,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Domain => "domain",
            RecordKind::Solution => "solution",
            RecordKind::Entity => "entity",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
