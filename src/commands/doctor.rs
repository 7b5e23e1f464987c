use anyhow::Result;
use rocket_catalog::{CatalogKind, CatalogResult, CatalogStore, SchemaAudit};
use serde_json::{json, Value};

use super::{display_path, Session};
use crate::ui::json;

struct Check {
    name: &'static str,
    outcome: CatalogResult<usize>,
    /// Schema files with errors or warnings.
    findings: Vec<SchemaAudit>,
}

impl Check {
    fn counted(name: &'static str, outcome: CatalogResult<usize>) -> Self {
        Self {
            name,
            outcome,
            findings: Vec::new(),
        }
    }

    fn ok(&self) -> bool {
        self.outcome.is_ok() && self.findings.iter().all(|f| f.report.is_conforming())
    }

    fn to_json(&self) -> Value {
        let mut entry = json!({ "check": self.name, "ok": self.ok() });
        match &self.outcome {
            Ok(count) => entry["count"] = json!(count),
            Err(err) => entry["error"] = err.to_payload(),
        }
        if !self.findings.is_empty() {
            entry["files"] = json!(self.findings);
        }
        entry
    }
}

/// Audit every schema file's shape; `count` is the number of files checked.
fn schema_check(store: &CatalogStore) -> Check {
    match store.audit_entities() {
        Ok(audits) => {
            let count = audits.len();
            let findings = audits
                .into_iter()
                .filter(|a| !a.report.errors.is_empty() || !a.report.warnings.is_empty())
                .collect();
            Check {
                name: "schemas",
                outcome: Ok(count),
                findings,
            }
        }
        Err(err) => Check::counted("schemas", Err(err)),
    }
}

/// Print where the catalog lives and whether every part of it loads and
/// every schema file has the expected shape.
///
/// Exits with status 1 when any check fails. Warnings alone do not fail.
pub fn cmd_doctor(session: &Session, compact: bool) -> Result<()> {
    let store = &session.store;
    let domains_path = store.resolve_data_file(CatalogKind::Domains);
    let solutions_path = store.resolve_data_file(CatalogKind::Solutions);
    let data_root = store.data_root();

    let checks = [
        Check::counted("domains", store.list_domains(true).map(|d| d.len())),
        Check::counted("solutions", store.list_solutions(true, None).map(|s| s.len())),
        Check::counted("entities", store.list_entities(None).map(|e| e.len())),
        schema_check(store),
    ];
    let failed = checks.iter().any(|c| !c.ok());

    if compact {
        let report: Vec<Value> = checks.iter().map(Check::to_json).collect();
        json::emit(
            &json!({
                "domains": domains_path.display().to_string(),
                "solutions": solutions_path.display().to_string(),
                "dataRoot": data_root.display().to_string(),
                "checks": report,
            }),
            true,
        )?;
    } else {
        let data = &session.config.data;
        println!("Configuration");
        println!("  data.root       {}", display_path(data.root.as_deref()));
        println!("  data.domains    {}", display_path(data.domains.as_deref()));
        println!("  data.solutions  {}", display_path(data.solutions.as_deref()));
        println!("Resolved");
        println!("  domains    {}", domains_path.display());
        println!("  solutions  {}", solutions_path.display());
        println!("  data root  {}", data_root.display());
        println!("Checks");
        for check in &checks {
            let mark = if check.ok() { '✓' } else { '✗' };
            match &check.outcome {
                Ok(count) => println!("  {mark} {:<10} {count} record(s)", check.name),
                Err(err) => println!("  {mark} {:<10} {err}", check.name),
            }
            for finding in &check.findings {
                println!("      {}", finding.path);
                for error in &finding.report.errors {
                    println!("        ✗ {error}");
                }
                for warning in &finding.report.warnings {
                    println!("        ! {warning}");
                }
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
