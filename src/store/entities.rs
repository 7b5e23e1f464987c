//! Entity schema files under `<root>/<domain>/schemas/`.
//!
//! Each schema lives in its own file and has its own write lock; entity
//! mutations never touch the catalog files. Creation additionally holds the
//! domain catalog lock so the owning domain cannot vanish mid-write. That
//! lock is always taken before the schema file lock, never after.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::CatalogStore;
use crate::domain::entities::{EntitySchema, EntitySummary};
use crate::domain::value_objects::{ensure_within_root, CatalogKind, Identifier};
use crate::error::{CatalogError, CatalogResult, RecordKind};
use crate::infrastructure::lock::remove_lock_file;
use crate::infrastructure::{write_json, PathResolver};
use crate::validate::fields::type_name;
use crate::validate::{check_schema, Conformance, EntityPatch, NewEntity};

/// An entity schema together with where it was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRecord {
    pub domain: String,
    pub path: String,
    #[serde(flatten)]
    pub schema: EntitySchema,
}

impl EntityRecord {
    fn new(domain: &Identifier, path: &Path, mut schema: EntitySchema) -> Self {
        // `domain` and `path` describe the location, not the file contents.
        schema.extra.remove("domain");
        schema.extra.remove("path");
        Self {
            domain: domain.to_string(),
            path: path.display().to_string(),
            schema,
        }
    }
}

/// Conformance report for one schema file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaAudit {
    pub domain: String,
    pub path: String,
    #[serde(flatten)]
    pub report: Conformance,
}

impl CatalogStore {
    /// Write a new schema file. The domain must be in the catalog and the
    /// file must not exist yet.
    pub fn create_entity(&self, entity: NewEntity) -> CatalogResult<EntityRecord> {
        let NewEntity {
            domain,
            name,
            schema,
        } = entity;
        let resolver = self.resolver();
        let path = resolver.schema_file(&domain, &name)?;
        let domains_path = resolver.resolve_data_file(CatalogKind::Domains);

        self.locks.with_lock(&domains_path, || {
            let domains = self.domains.load_for_update(&domains_path)?;
            if !domains.iter().any(|d| d.name == domain.as_str()) {
                return Err(CatalogError::NotFound {
                    kind: RecordKind::Domain,
                    name: domain.to_string(),
                });
            }

            self.locks.with_lock(&path, || {
                if path.exists() {
                    return Err(CatalogError::AlreadyExists {
                        kind: RecordKind::Entity,
                        name: qualified(&domain, &name),
                    });
                }
                write_json(&path, &schema)?;
                info!(domain = %domain, entity = %name, path = %path.display(), "created entity schema");
                Ok(EntityRecord::new(&domain, &path, schema))
            })
        })
    }

    /// Load a schema. Without `domain`, every catalog domain is searched in
    /// sorted order and the first match wins.
    pub fn get_entity(
        &self,
        domain: Option<&Identifier>,
        name: &Identifier,
    ) -> CatalogResult<EntityRecord> {
        let (domain, path) = self.locate(domain, name)?;
        let schema = read_schema(&path)?;
        Ok(EntityRecord::new(&domain, &path, schema))
    }

    /// Replace the supplied fields of an existing schema. Lookup follows
    /// [`CatalogStore::get_entity`].
    pub fn update_entity(&self, patch: EntityPatch) -> CatalogResult<EntityRecord> {
        let (domain, path) = self.locate(patch.domain.as_ref(), &patch.name)?;
        self.locks.with_lock(&path, || {
            if !path.is_file() {
                return Err(entity_not_found(Some(&domain), &patch.name));
            }
            let mut schema = read_schema(&path)?;
            patch.clone().apply(&mut schema);
            write_json(&path, &schema)?;
            info!(domain = %domain, entity = %patch.name, path = %path.display(), "updated entity schema");
            Ok(EntityRecord::new(&domain, &path, schema))
        })
    }

    pub fn delete_entity(
        &self,
        domain: &Identifier,
        name: &Identifier,
    ) -> CatalogResult<EntitySummary> {
        let path = self.resolver().schema_file(domain, name)?;
        if !path.is_file() {
            return Err(entity_not_found(Some(domain), name));
        }
        self.locks.with_lock(&path, || {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == IoErrorKind::NotFound => {
                    return Err(entity_not_found(Some(domain), name));
                }
                Err(e) => return Err(CatalogError::io(&path, e)),
            }
            remove_lock_file(&path);
            info!(domain = %domain, entity = %name, path = %path.display(), "deleted entity schema");
            Ok(EntitySummary {
                domain: domain.to_string(),
                name: name.to_string(),
                description: None,
                path: path.display().to_string(),
            })
        })
    }

    /// Summaries of every schema file, sorted by domain then file name.
    ///
    /// A domain without a schema directory contributes nothing. Any file
    /// that is not a JSON object, or that resolves outside the data root,
    /// aborts the listing.
    pub fn list_entities(&self, domain: Option<&Identifier>) -> CatalogResult<Vec<EntitySummary>> {
        let domains = match domain {
            Some(domain) => vec![domain.clone()],
            None => self.known_domains()?,
        };
        let resolver = self.resolver();
        let root = resolver.data_root();

        let mut summaries = Vec::new();
        for domain in &domains {
            let dir = resolver.schema_dir(domain)?;
            for path in schema_files(&dir)? {
                ensure_within_root(&path, &root)?;
                let object = read_object(&path)?;
                let name = object
                    .get("name")
                    .and_then(Value::as_str)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .or_else(|| {
                        path.file_stem()
                            .map(|stem| stem.to_string_lossy().into_owned())
                    })
                    .unwrap_or_default();
                summaries.push(EntitySummary {
                    domain: domain.to_string(),
                    name,
                    description: object
                        .get("description")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    path: path.display().to_string(),
                });
            }
        }
        Ok(summaries)
    }

    /// Check every schema file's shape, in the same order as
    /// [`CatalogStore::list_entities`].
    ///
    /// Per-file failures (escaping the data root, unreadable or invalid JSON)
    /// land in that file's report instead of aborting the walk.
    pub fn audit_entities(&self) -> CatalogResult<Vec<SchemaAudit>> {
        let resolver = self.resolver();
        let root = resolver.data_root();

        let mut audits = Vec::new();
        for domain in self.known_domains()? {
            let dir = resolver.schema_dir(&domain)?;
            for path in schema_files(&dir)? {
                let report = ensure_within_root(&path, &root)
                    .and_then(|_| read_object(&path))
                    .map(|object| check_schema(&object))
                    .unwrap_or_else(|err| Conformance {
                        errors: vec![err.to_string()],
                        warnings: Vec::new(),
                    });
                if !report.is_conforming() {
                    debug!(path = %path.display(), errors = report.errors.len(), "schema does not conform");
                }
                audits.push(SchemaAudit {
                    domain: domain.to_string(),
                    path: path.display().to_string(),
                    report,
                });
            }
        }
        Ok(audits)
    }

    /// Catalog domain names usable as path components, sorted.
    fn known_domains(&self) -> CatalogResult<Vec<Identifier>> {
        Ok(self
            .domain_names()?
            .into_iter()
            .filter_map(|name| match Identifier::parse("domain", &name) {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!(domain = %name, "skipping catalog domain with an invalid name");
                    None
                }
            })
            .collect())
    }

    fn locate(
        &self,
        domain: Option<&Identifier>,
        name: &Identifier,
    ) -> CatalogResult<(Identifier, PathBuf)> {
        let resolver = self.resolver();
        match domain {
            Some(domain) => {
                let path = resolver.schema_file(domain, name)?;
                if path.is_file() {
                    Ok((domain.clone(), path))
                } else {
                    Err(entity_not_found(Some(domain), name))
                }
            }
            None => {
                for domain in self.known_domains()? {
                    let path = resolver.schema_file(&domain, name)?;
                    if path.is_file() {
                        return Ok((domain, path));
                    }
                }
                Err(entity_not_found(None, name))
            }
        }
    }
}

fn qualified(domain: &Identifier, name: &Identifier) -> String {
    format!("{domain}/{name}")
}

fn entity_not_found(domain: Option<&Identifier>, name: &Identifier) -> CatalogError {
    CatalogError::NotFound {
        kind: RecordKind::Entity,
        name: match domain {
            Some(domain) => qualified(domain, name),
            None => name.to_string(),
        },
    }
}

/// Schema files in `dir` sorted by file name; empty when `dir` is missing.
fn schema_files(dir: &Path) -> CatalogResult<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(CatalogError::io(dir, e)),
    };
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CatalogError::io(dir, e))?.path();
        if PathResolver::is_schema_file(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn read_object(path: &Path) -> CatalogResult<Map<String, Value>> {
    let bytes = fs::read(path).map_err(|e| CatalogError::io(path, e))?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|e| CatalogError::Format {
        path: path.to_path_buf(),
        message: format!("invalid JSON: {e}"),
    })?;
    match value {
        Value::Object(object) => Ok(object),
        other => Err(CatalogError::Format {
            path: path.to_path_buf(),
            message: format!("expected a JSON object, found {}", type_name(&other)),
        }),
    }
}

fn read_schema(path: &Path) -> CatalogResult<EntitySchema> {
    let object = read_object(path)?;
    serde_json::from_value(Value::Object(object)).map_err(|e| CatalogError::Format {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Domain, SCHEMA_CONTEXT, SCHEMA_TYPE};
    use crate::error::ErrorKind;
    use crate::validate::{arguments, entity};
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    fn id(raw: &str) -> Identifier {
        Identifier::parse("name", raw).unwrap()
    }

    fn store_with(domains: &[&str]) -> (TempDir, CatalogStore) {
        let dir = tempdir().unwrap();
        let store = CatalogStore::open(dir.path());
        for name in domains {
            let domain: Domain = serde_json::from_value(json!({ "name": name })).unwrap();
            store.create_domain(domain).unwrap();
        }
        (dir, store)
    }

    fn new_entity(domain: &str, name: &str, description: &str) -> NewEntity {
        let raw = json!({
            "domain": domain,
            "name": name,
            "description": description,
            "properties": [
                { "name": "id", "type": "string", "mode": "stored", "description": "Key" }
            ],
            "examples": [{ "@type": name, "id": "1" }]
        });
        entity::parse_new(&arguments(Some(&raw)).unwrap()).unwrap()
    }

    #[test]
    fn create_writes_metadata_and_get_stamps_location() {
        let (dir, store) = store_with(&["crm"]);
        store.create_entity(new_entity("crm", "Person", "A person")).unwrap();

        let path = dir.path().join("crm/schemas/Person.json");
        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["@type"], SCHEMA_TYPE);
        assert_eq!(on_disk["@context"], SCHEMA_CONTEXT);
        assert!(on_disk.get("domain").is_none());

        let record = store.get_entity(Some(&id("crm")), &id("Person")).unwrap();
        assert_eq!(record.domain, "crm");
        assert!(record.path.ends_with("Person.json"));
        assert_eq!(record.schema.description.as_deref(), Some("A person"));
    }

    #[test]
    fn create_requires_catalog_domain() {
        let (dir, store) = store_with(&[]);
        let err = store
            .create_entity(new_entity("crm", "Person", "A person"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!dir.path().join("crm").exists());
    }

    #[test]
    fn create_twice_conflicts() {
        let (_dir, store) = store_with(&["crm"]);
        store.create_entity(new_entity("crm", "Person", "A")).unwrap();
        let err = store
            .create_entity(new_entity("crm", "Person", "B"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("crm/Person"));
    }

    #[test]
    fn get_fills_missing_metadata() {
        let (dir, store) = store_with(&["crm"]);
        let schemas = dir.path().join("crm/schemas");
        fs::create_dir_all(&schemas).unwrap();
        fs::write(
            schemas.join("Legacy.json"),
            r#"{"name": "Legacy", "properties": [], "examples": []}"#,
        )
        .unwrap();

        let record = store.get_entity(None, &id("Legacy")).unwrap();
        assert_eq!(record.schema.schema_type, SCHEMA_TYPE);
        assert_eq!(record.schema.context, SCHEMA_CONTEXT);
    }

    #[test]
    fn domainless_lookup_takes_first_sorted_domain() {
        let (_dir, store) = store_with(&["sales", "billing"]);
        store.create_entity(new_entity("sales", "Invoice", "from sales")).unwrap();
        store.create_entity(new_entity("billing", "Invoice", "from billing")).unwrap();

        let record = store.get_entity(None, &id("Invoice")).unwrap();
        assert_eq!(record.domain, "billing");
        assert_eq!(record.schema.description.as_deref(), Some("from billing"));
    }

    #[test]
    fn update_replaces_only_supplied_fields() {
        let (_dir, store) = store_with(&["crm"]);
        let created = store.create_entity(new_entity("crm", "Person", "old")).unwrap();

        let patch = entity::parse_patch(
            &arguments(Some(&json!({ "name": "Person", "description": "new" }))).unwrap(),
        )
        .unwrap();
        let updated = store.update_entity(patch).unwrap();

        assert_eq!(updated.schema.description.as_deref(), Some("new"));
        assert_eq!(updated.schema.properties, created.schema.properties);
        assert_eq!(updated.schema.examples, created.schema.examples);
    }

    #[test]
    fn update_keeps_existing_metadata_and_extra_keys() {
        let (dir, store) = store_with(&["crm"]);
        let schemas = dir.path().join("crm/schemas");
        fs::create_dir_all(&schemas).unwrap();
        fs::write(
            schemas.join("Employee.json"),
            r#"{"@type": "Custom", "name": "Employee", "extends": "Person"}"#,
        )
        .unwrap();

        let patch = entity::parse_patch(
            &arguments(Some(&json!({ "domain": "crm", "name": "Employee", "description": "x" })))
                .unwrap(),
        )
        .unwrap();
        store.update_entity(patch).unwrap();

        let on_disk: Value =
            serde_json::from_str(&fs::read_to_string(schemas.join("Employee.json")).unwrap())
                .unwrap();
        assert_eq!(on_disk["@type"], "Custom");
        assert_eq!(on_disk["@context"], SCHEMA_CONTEXT);
        assert_eq!(on_disk["extends"], "Person");
    }

    #[test]
    fn delete_then_delete_again_is_not_found() {
        let (dir, store) = store_with(&["crm"]);
        store.create_entity(new_entity("crm", "Person", "A")).unwrap();

        store.delete_entity(&id("crm"), &id("Person")).unwrap();
        assert!(!dir.path().join("crm/schemas/Person.json").exists());

        let err = store.delete_entity(&id("crm"), &id("Person")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn list_sorted_by_domain_then_file() {
        let (_dir, store) = store_with(&["sales", "crm"]);
        store.create_entity(new_entity("sales", "Order", "o")).unwrap();
        store.create_entity(new_entity("crm", "Person", "p")).unwrap();
        store.create_entity(new_entity("crm", "Account", "a")).unwrap();

        let listed: Vec<(String, String)> = store
            .list_entities(None)
            .unwrap()
            .into_iter()
            .map(|s| (s.domain, s.name))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("crm".to_string(), "Account".to_string()),
                ("crm".to_string(), "Person".to_string()),
                ("sales".to_string(), "Order".to_string()),
            ]
        );
        assert!(store.list_entities(Some(&id("nowhere"))).unwrap().is_empty());
    }

    #[test]
    fn list_tolerates_missing_description_but_not_bad_json() {
        let (dir, store) = store_with(&["crm"]);
        let schemas = dir.path().join("crm/schemas");
        fs::create_dir_all(&schemas).unwrap();
        fs::write(schemas.join("Bare.json"), r#"{"name": "Bare"}"#).unwrap();

        let listed = store.list_entities(Some(&id("crm"))).unwrap();
        assert_eq!(listed[0].description, None);

        fs::write(schemas.join("Broken.json"), "{not json").unwrap();
        let err = store.list_entities(Some(&id("crm"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn audit_reports_each_file_without_stopping() {
        let (dir, store) = store_with(&["crm"]);
        store.create_entity(new_entity("crm", "Person", "A person")).unwrap();
        let schemas = dir.path().join("crm/schemas");
        fs::write(schemas.join("Broken.json"), "{not json").unwrap();
        fs::write(
            schemas.join("Stub.json"),
            r#"{"name": "Stub", "description": "later", "properties": []}"#,
        )
        .unwrap();

        let audits = store.audit_entities().unwrap();
        let by_file: Vec<(&str, bool)> = audits
            .iter()
            .map(|a| {
                let file = a.path.rsplit('/').next().unwrap_or_default();
                (file, a.report.is_conforming())
            })
            .collect();

        assert_eq!(
            by_file,
            vec![("Broken.json", false), ("Person.json", true), ("Stub.json", false)]
        );
        assert!(audits[0].report.errors[0].contains("invalid JSON"));
        assert!(audits[2]
            .report
            .errors
            .iter()
            .any(|e| e.starts_with("@type")));
        assert_eq!(audits[2].report.warnings.len(), 1);
    }
}
