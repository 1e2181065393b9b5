//! Project milestone tools

pub mod assign_issue;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod list_issues;
pub mod update;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all milestone-related tools with the registry
pub fn register_milestone_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListMilestonesTool::new());
    registry.register(get::GetMilestoneTool::new());
    registry.register(create::CreateMilestoneTool::new());
    registry.register(update::UpdateMilestoneTool::new());
    registry.register(delete::DeleteMilestoneTool::new());
    registry.register(assign_issue::AssignIssueToMilestoneTool::new());
    registry.register(list_issues::ListMilestoneIssuesTool::new());
}
