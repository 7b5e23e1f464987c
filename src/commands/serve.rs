//! Line-delimited JSON request loop.
//!
//! Each stdin line is `{"id"?: any, "tool": string, "arguments"?: object}`.
//! Each answer is one stdout line carrying the same `id` and either `result`
//! or `error`. Logs go to stderr.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use rocket_catalog::{call_tool, CatalogError, CatalogStore};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::ui::json;

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<Value>,
    tool: String,
    #[serde(default)]
    arguments: Option<Value>,
}

pub fn cmd_serve(store: &CatalogStore) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    info!("serving requests on stdin");
    serve(store, stdin.lock(), &mut stdout)?;
    info!("stdin closed, shutting down");
    Ok(())
}

fn serve(store: &CatalogStore, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = handle_line(store, line);
        json::write_line(out, &response)?;
    }
    Ok(())
}

fn handle_line(store: &CatalogStore, line: &str) -> Value {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            let err = CatalogError::invalid("request", format!("is not a valid request: {e}"));
            return respond(None, Err(err));
        }
    };
    debug!(tool = %request.tool, "request");
    let outcome = call_tool(store, &request.tool, request.arguments.as_ref());
    respond(request.id, outcome)
}

fn respond(id: Option<Value>, outcome: Result<Value, CatalogError>) -> Value {
    let mut response = Map::new();
    response.insert("id".to_string(), id.unwrap_or(Value::Null));
    match outcome {
        Ok(result) => response.insert("result".to_string(), result),
        Err(err) => response.insert("error".to_string(), err.to_payload()),
    };
    Value::Object(response)
}
