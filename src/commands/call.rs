use anyhow::Result;
use rocket_catalog::{call_tool, CatalogError, CatalogStore};
use serde_json::Value;

use crate::ui::json;

/// Run one tool. Failures print the error payload and exit with status 1.
pub fn cmd_call(store: &CatalogStore, tool: &str, raw_args: Option<&str>, compact: bool) -> Result<()> {
    let outcome = parse_args(raw_args).and_then(|args| call_tool(store, tool, args.as_ref()));
    match outcome {
        Ok(value) => {
            json::emit(&value, compact)?;
            Ok(())
        }
        Err(err) => {
            json::emit(&err.to_payload(), compact)?;
            std::process::exit(1);
        }
    }
}

fn parse_args(raw: Option<&str>) -> Result<Option<Value>, CatalogError> {
    raw.map(|text| {
        serde_json::from_str(text)
            .map_err(|e| CatalogError::invalid("args", format!("is not valid JSON: {e}")))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_args_is_none() {
        assert_eq!(parse_args(None).unwrap(), None);
    }

    #[test]
    fn malformed_args_is_input_error() {
        let err = parse_args(Some("{name:")).unwrap_err();
        assert_eq!(err.kind(), rocket_catalog::ErrorKind::Input);
    }
}
