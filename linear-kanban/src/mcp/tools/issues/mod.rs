//! Issue management tools for MCP operations
//!
//! Each tool is in its own submodule.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod move_state;
pub mod search;
pub mod update;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all issue-related tools with the registry
pub fn register_issue_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListIssuesTool::new());
    registry.register(get::GetIssueTool::new());
    registry.register(create::CreateIssueTool::new());
    registry.register(update::UpdateIssueTool::new());
    registry.register(move_state::MoveIssueTool::new());
    registry.register(delete::DeleteIssueTool::new());
    registry.register(search::SearchIssuesTool::new());
}
