//! Workflow state tools

pub mod list;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all workflow-state tools with the registry
pub fn register_workflow_state_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListWorkflowStatesTool::new());
}
