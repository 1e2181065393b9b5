//! Comment tools

pub mod add;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all comment-related tools with the registry
pub fn register_comment_tools(registry: &mut ToolRegistry) {
    registry.register(add::AddCommentTool::new());
}
