//! Cross-catalog reference checks
//!
//! Solutions point at domains by name. These checks run inside the write
//! critical section, right before the mutation is persisted.

use std::collections::BTreeSet;

use crate::domain::entities::{Domain, Solution};
use crate::error::{CatalogError, CatalogResult};

/// Requested domain names absent from `domains`, sorted and deduplicated.
pub fn missing_domains(requested: &[String], domains: &[Domain]) -> Vec<String> {
    let known: BTreeSet<&str> = domains.iter().map(|d| d.name.as_str()).collect();
    requested
        .iter()
        .map(String::as_str)
        .filter(|name| !known.contains(name))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn ensure_domains_exist(requested: &[String], domains: &[Domain]) -> CatalogResult<()> {
    let missing = missing_domains(requested, domains);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::UnknownReference { missing })
    }
}

/// Names of solutions whose `domains` contain `domain`, sorted.
pub fn referencing_solutions(domain: &str, solutions: &[Solution]) -> Vec<String> {
    let mut names: Vec<String> = solutions
        .iter()
        .filter(|s| s.references(domain))
        .map(|s| s.name.clone())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Gate a domain deletion.
///
/// Returns the solutions that will be left with a dangling reference; with
/// `force` unset any such solution blocks the delete. References are never
/// rewritten.
pub fn ensure_deletable(
    domain: &str,
    solutions: &[Solution],
    force: bool,
) -> CatalogResult<Vec<String>> {
    let referencing = referencing_solutions(domain, solutions);
    if referencing.is_empty() || force {
        Ok(referencing)
    } else {
        Err(CatalogError::ReferencedBy {
            domain: domain.to_string(),
            solutions: referencing,
        })
    }
}
