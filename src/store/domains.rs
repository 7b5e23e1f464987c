//! Domain catalog operations.

use serde::Serialize;
use tracing::warn;

use super::{ensure_absent, find, integrity, position, CatalogStore};
use crate::domain::entities::Domain;
use crate::domain::value_objects::{CatalogKind, Identifier};
use crate::error::{CatalogResult, RecordKind};
use crate::validate::DomainPatch;

/// Outcome of a domain deletion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDeletion {
    pub deleted: Domain,
    /// Solutions still listing the deleted domain (only with `force`).
    pub dangling_references: Vec<String>,
}

impl CatalogStore {
    pub fn list_domains(&self, refresh: bool) -> CatalogResult<Vec<Domain>> {
        self.load_domains(refresh)
    }

    pub fn get_domain(&self, name: &Identifier) -> CatalogResult<Domain> {
        let domains = self.load_domains(false)?;
        find(&domains, RecordKind::Domain, name.as_str()).cloned()
    }

    pub fn create_domain(&self, domain: Domain) -> CatalogResult<Domain> {
        let path = self.resolve_data_file(CatalogKind::Domains);
        self.locks.with_lock(&path, || {
            let mut domains = self.domains.load_for_update(&path)?;
            ensure_absent(&domains, RecordKind::Domain, &domain.name)?;
            domains.push(domain.clone());
            self.write_domains(&path, domains)?;
            Ok(domain)
        })
    }

    pub fn update_domain(&self, name: &Identifier, patch: DomainPatch) -> CatalogResult<Domain> {
        let path = self.resolve_data_file(CatalogKind::Domains);
        self.locks.with_lock(&path, || {
            let mut domains = self.domains.load_for_update(&path)?;
            let index = position(&domains, RecordKind::Domain, name.as_str())?;
            patch.apply(&mut domains[index]);
            let updated = domains[index].clone();
            self.write_domains(&path, domains)?;
            Ok(updated)
        })
    }

    /// Remove a domain.
    ///
    /// Solutions referencing it block the delete unless `force` is set; with
    /// `force` the references are left dangling.
    pub fn delete_domain(&self, name: &Identifier, force: bool) -> CatalogResult<DomainDeletion> {
        let domains_path = self.resolve_data_file(CatalogKind::Domains);
        let solutions_path = self.resolve_data_file(CatalogKind::Solutions);
        self.locks.with_locks(&[domains_path.as_path(), solutions_path.as_path()], || {
            let mut domains = self.domains.load_for_update(&domains_path)?;
            let index = position(&domains, RecordKind::Domain, name.as_str())?;

            let solutions = self.solutions.load_for_update(&solutions_path)?;
            let dangling = integrity::ensure_deletable(name.as_str(), &solutions, force)?;
            if !dangling.is_empty() {
                warn!(
                    domain = %name,
                    solutions = ?dangling,
                    "forced domain delete leaves dangling solution references"
                );
            }

            let deleted = domains.remove(index);
            self.write_domains(&domains_path, domains)?;
            Ok(DomainDeletion {
                deleted,
                dangling_references: dangling,
            })
        })
    }
}
