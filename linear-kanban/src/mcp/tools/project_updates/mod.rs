//! Project update tools

pub mod create;
pub mod list;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all project-update tools with the registry
pub fn register_project_update_tools(registry: &mut ToolRegistry) {
    registry.register(create::CreateProjectUpdateTool::new());
    registry.register(list::ListProjectUpdatesTool::new());
}
