//! User tools

pub mod list;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all user-related tools with the registry
pub fn register_user_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListUsersTool::new());
}
