//! Shared helpers for catalog integration tests.
//!
//! - `TestCatalog`: a store over an isolated temp data directory
//! - `run_cli`: run the binary against that directory

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use rocket_catalog::{call_tool, CatalogError, CatalogStore};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Isolated data directory plus a store rooted at it.
pub struct TestCatalog {
    pub dir: TempDir,
    pub store: CatalogStore,
}

impl TestCatalog {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let store = CatalogStore::open(dir.path());
        Self { dir, store }
    }

    /// Catalog seeded with the given domains (and nothing else).
    pub fn with_domains(names: &[&str]) -> Self {
        let catalog = Self::new();
        for name in names {
            catalog.ok("create-domain", domain_args(name));
        }
        catalog
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn call(&self, tool: &str, args: Value) -> Result<Value, CatalogError> {
        call_tool(&self.store, tool, Some(&args))
    }

    pub fn ok(&self, tool: &str, args: Value) -> Value {
        self.call(tool, args)
            .unwrap_or_else(|e| panic!("{tool} failed: {e}"))
    }

    pub fn err(&self, tool: &str, args: Value) -> CatalogError {
        match self.call(tool, args) {
            Ok(value) => panic!("{tool} unexpectedly succeeded: {value}"),
            Err(e) => e,
        }
    }

    pub fn read_json(&self, relative: &str) -> Value {
        let text = fs::read_to_string(self.path(relative)).expect("read file");
        serde_json::from_str(&text).expect("valid JSON")
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, content).expect("write file");
    }
}

pub fn domain_args(name: &str) -> Value {
    json!({
        "name": name,
        "label": name.to_uppercase(),
        "description": format!("The {name} domain"),
        "icon": "folder",
        "order": 1,
        "tags": ["core"]
    })
}

pub fn solution_args(name: &str, domains: &[&str]) -> Value {
    json!({
        "name": name,
        "label": name.to_uppercase(),
        "description": format!("The {name} solution"),
        "icon": "rocket",
        "color": "indigo",
        "domains": domains,
        "features": ["fast"],
        "useCases": ["demo"]
    })
}

pub fn entity_args(domain: &str, name: &str) -> Value {
    json!({
        "domain": domain,
        "name": name,
        "description": format!("A {name}"),
        "properties": [
            { "name": "id", "type": "string", "mode": "stored", "description": "Identifier", "required": true },
            { "name": "status", "type": "string", "mode": "enum", "description": "Lifecycle state" }
        ],
        "examples": [
            { "@type": name, "id": "abc", "status": "active" }
        ]
    })
}

/// Output of one CLI run.
#[derive(Debug)]
pub struct CliOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CliOutput {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

/// Run the binary with `--data-root root` and a clean catalog environment.
pub fn run_cli(root: &Path, args: &[&str]) -> CliOutput {
    let output = Command::new(env!("CARGO_BIN_EXE_rocket-catalog"))
        .arg("--data-root")
        .arg(root)
        .args(args)
        .current_dir(root)
        .env_remove("MCP_DOMAINS_PATH")
        .env_remove("MCP_SOLUTIONS_PATH")
        .env_remove("MCP_DATA_ROOT")
        .env_remove("MCP_CATALOG_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("run rocket-catalog");
    CliOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
