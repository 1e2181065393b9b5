//! Project tools

pub mod create;
pub mod get;
pub mod list;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all project-related tools with the registry
pub fn register_project_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListProjectsTool::new());
    registry.register(get::GetProjectTool::new());
    registry.register(create::CreateProjectTool::new());
}
