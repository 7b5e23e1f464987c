//! Named operations over a [`CatalogStore`].
//!
//! Each tool takes a JSON argument bag and returns a JSON payload. This is
//! the surface the CLI `call` and `serve` commands dispatch into.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::store::CatalogStore;
use crate::validate::fields::{check_allowed_keys, flag, optional_identifier, required_identifier};
use crate::validate::{arguments, domain, entity, solution, Args};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    ListDomains,
    GetDomain,
    CreateDomain,
    UpdateDomain,
    DeleteDomain,
    ListSolutions,
    GetSolution,
    CreateSolution,
    UpdateSolution,
    DeleteSolution,
    ListEntities,
    GetEntity,
    CreateEntity,
    UpdateEntity,
    DeleteEntity,
}

/// Listing row for `tools`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: &'static str,
}

impl Tool {
    pub const ALL: [Tool; 15] = [
        Tool::ListDomains,
        Tool::GetDomain,
        Tool::CreateDomain,
        Tool::UpdateDomain,
        Tool::DeleteDomain,
        Tool::ListSolutions,
        Tool::GetSolution,
        Tool::CreateSolution,
        Tool::UpdateSolution,
        Tool::DeleteSolution,
        Tool::ListEntities,
        Tool::GetEntity,
        Tool::CreateEntity,
        Tool::UpdateEntity,
        Tool::DeleteEntity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::ListDomains => "list-domains",
            Tool::GetDomain => "get-domain",
            Tool::CreateDomain => "create-domain",
            Tool::UpdateDomain => "update-domain",
            Tool::DeleteDomain => "delete-domain",
            Tool::ListSolutions => "list-solutions",
            Tool::GetSolution => "get-solution",
            Tool::CreateSolution => "create-solution",
            Tool::UpdateSolution => "update-solution",
            Tool::DeleteSolution => "delete-solution",
            Tool::ListEntities => "list-entities",
            Tool::GetEntity => "get-entity",
            Tool::CreateEntity => "create-entity",
            Tool::UpdateEntity => "update-entity",
            Tool::DeleteEntity => "delete-entity",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::ListDomains => "List every domain. Optional: refresh (bool).",
            Tool::GetDomain => "Fetch one domain by name.",
            Tool::CreateDomain => "Create a domain: name, label, description, icon, order, tags.",
            Tool::UpdateDomain => "Update a domain by name; any of label, description, icon, order, tags.",
            Tool::DeleteDomain => {
                "Delete a domain. Fails while solutions reference it unless force is true."
            }
            Tool::ListSolutions => "List solutions. Optional: domain filter, refresh (bool).",
            Tool::GetSolution => "Fetch one solution by name.",
            Tool::CreateSolution => {
                "Create a solution: name, label, description, icon, color, domains, features, useCases."
            }
            Tool::UpdateSolution => "Update a solution by name; domains must already exist.",
            Tool::DeleteSolution => "Delete a solution by name.",
            Tool::ListEntities => "List entity schemas, optionally for one domain.",
            Tool::GetEntity => {
                "Fetch an entity schema by name. Without domain, the first sorted domain holding it wins."
            }
            Tool::CreateEntity => {
                "Create an entity schema: domain, name, description, properties, examples."
            }
            Tool::UpdateEntity => {
                "Update an entity schema's description, properties or examples."
            }
            Tool::DeleteEntity => "Delete an entity schema: domain, name.",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn info(self) -> ToolInfo {
        ToolInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn list_tools() -> Vec<ToolInfo> {
    Tool::ALL.into_iter().map(Tool::info).collect()
}

/// Run the tool called `name` with raw arguments.
pub fn call_tool(store: &CatalogStore, name: &str, raw: Option<&Value>) -> CatalogResult<Value> {
    let tool = Tool::parse(name).ok_or_else(|| {
        CatalogError::invalid("tool", format!("unknown tool '{name}'"))
    })?;
    let args = arguments(raw)?;
    debug!(tool = %tool, "dispatching tool call");
    dispatch(store, tool, &args)
}

fn dispatch(store: &CatalogStore, tool: Tool, args: &Args) -> CatalogResult<Value> {
    match tool {
        Tool::ListDomains => {
            check_allowed_keys(args, &["refresh"])?;
            to_value(store.list_domains(flag(args, "refresh")?)?)
        }
        Tool::GetDomain => {
            check_allowed_keys(args, &["name"])?;
            to_value(store.get_domain(&required_identifier(args, "name")?)?)
        }
        Tool::CreateDomain => to_value(store.create_domain(domain::parse_new(args)?)?),
        Tool::UpdateDomain => {
            let (name, patch) = domain::parse_patch(args)?;
            to_value(store.update_domain(&name, patch)?)
        }
        Tool::DeleteDomain => {
            check_allowed_keys(args, &["name", "force"])?;
            let name = required_identifier(args, "name")?;
            to_value(store.delete_domain(&name, flag(args, "force")?)?)
        }
        Tool::ListSolutions => {
            check_allowed_keys(args, &["refresh", "domain"])?;
            let domain = optional_identifier(args, "domain")?;
            to_value(store.list_solutions(flag(args, "refresh")?, domain.as_ref())?)
        }
        Tool::GetSolution => {
            check_allowed_keys(args, &["name"])?;
            to_value(store.get_solution(&required_identifier(args, "name")?)?)
        }
        Tool::CreateSolution => to_value(store.create_solution(solution::parse_new(args)?)?),
        Tool::UpdateSolution => {
            let (name, patch) = solution::parse_patch(args)?;
            to_value(store.update_solution(&name, patch)?)
        }
        Tool::DeleteSolution => {
            check_allowed_keys(args, &["name"])?;
            let deleted = store.delete_solution(&required_identifier(args, "name")?)?;
            Ok(json!({ "deleted": deleted }))
        }
        Tool::ListEntities => {
            check_allowed_keys(args, &["domain"])?;
            let domain = optional_identifier(args, "domain")?;
            to_value(store.list_entities(domain.as_ref())?)
        }
        Tool::GetEntity => {
            check_allowed_keys(args, &["domain", "name"])?;
            let domain = optional_identifier(args, "domain")?;
            let name = required_identifier(args, "name")?;
            to_value(store.get_entity(domain.as_ref(), &name)?)
        }
        Tool::CreateEntity => to_value(store.create_entity(entity::parse_new(args)?)?),
        Tool::UpdateEntity => to_value(store.update_entity(entity::parse_patch(args)?)?),
        Tool::DeleteEntity => {
            check_allowed_keys(args, &["domain", "name"])?;
            let domain = required_identifier(args, "domain")?;
            let name = required_identifier(args, "name")?;
            let deleted = store.delete_entity(&domain, &name)?;
            Ok(json!({ "deleted": deleted }))
        }
    }
}

fn to_value<T: Serialize>(value: T) -> CatalogResult<Value> {
    Ok(serde_json::to_value(value)?)
}
