//! Solution catalog operations.

use super::{ensure_absent, find, integrity, position, CatalogStore};
use crate::domain::entities::Solution;
use crate::domain::value_objects::{CatalogKind, Identifier};
use crate::error::{CatalogResult, RecordKind};
use crate::validate::SolutionPatch;

impl CatalogStore {
    /// Solutions in catalog order, optionally only those referencing `domain`.
    pub fn list_solutions(
        &self,
        refresh: bool,
        domain: Option<&Identifier>,
    ) -> CatalogResult<Vec<Solution>> {
        let solutions = self.load_solutions(refresh)?;
        Ok(match domain {
            Some(domain) => solutions
                .into_iter()
                .filter(|s| s.references(domain.as_str()))
                .collect(),
            None => solutions,
        })
    }

    pub fn get_solution(&self, name: &Identifier) -> CatalogResult<Solution> {
        let solutions = self.load_solutions(false)?;
        find(&solutions, RecordKind::Solution, name.as_str()).cloned()
    }

    /// Add a solution. Every domain it lists must exist at write time.
    pub fn create_solution(&self, solution: Solution) -> CatalogResult<Solution> {
        let domains_path = self.resolve_data_file(CatalogKind::Domains);
        let solutions_path = self.resolve_data_file(CatalogKind::Solutions);
        self.locks.with_locks(&[domains_path.as_path(), solutions_path.as_path()], || {
            let domains = self.domains.load_for_update(&domains_path)?;
            integrity::ensure_domains_exist(&solution.domains, &domains)?;

            let mut solutions = self.solutions.load_for_update(&solutions_path)?;
            ensure_absent(&solutions, RecordKind::Solution, &solution.name)?;
            solutions.push(solution.clone());
            self.write_solutions(&solutions_path, solutions)?;
            Ok(solution)
        })
    }

    pub fn update_solution(
        &self,
        name: &Identifier,
        patch: SolutionPatch,
    ) -> CatalogResult<Solution> {
        let domains_path = self.resolve_data_file(CatalogKind::Domains);
        let solutions_path = self.resolve_data_file(CatalogKind::Solutions);
        self.locks.with_locks(&[domains_path.as_path(), solutions_path.as_path()], || {
            if let Some(requested) = &patch.domains {
                let domains = self.domains.load_for_update(&domains_path)?;
                integrity::ensure_domains_exist(requested, &domains)?;
            }

            let mut solutions = self.solutions.load_for_update(&solutions_path)?;
            let index = position(&solutions, RecordKind::Solution, name.as_str())?;
            patch.apply(&mut solutions[index]);
            let updated = solutions[index].clone();
            self.write_solutions(&solutions_path, solutions)?;
            Ok(updated)
        })
    }

    pub fn delete_solution(&self, name: &Identifier) -> CatalogResult<Solution> {
        let path = self.resolve_data_file(CatalogKind::Solutions);
        self.locks.with_lock(&path, || {
            let mut solutions = self.solutions.load_for_update(&path)?;
            let index = position(&solutions, RecordKind::Solution, name.as_str())?;
            let deleted = solutions.remove(index);
            self.write_solutions(&path, solutions)?;
            Ok(deleted)
        })
    }
}
