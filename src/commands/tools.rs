use anyhow::Result;
use rocket_catalog::list_tools;

use crate::ui::json;

pub fn cmd_tools(compact: bool) -> Result<()> {
    let tools = list_tools();
    if compact {
        json::emit(&serde_json::to_value(&tools)?, true)?;
        return Ok(());
    }

    let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for tool in &tools {
        println!("  {:<width$}  {}", tool.name, tool.description);
    }
    Ok(())
}
