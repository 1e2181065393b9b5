//! Milestone listing tool for MCP operations

use crate::error::Result;
use crate::linear::relations::milestones_with_project;
use crate::mcp::constants::DEFAULT_MILESTONE_LIMIT;
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::milestone_entry;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::{non_empty, ListMilestonesRequest};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for listing milestones, optionally restricted to a project
#[derive(Default)]
pub struct ListMilestonesTool;

impl ListMilestonesTool {
    /// Creates a new instance of the ListMilestonesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListMilestonesTool {
    fn name(&self) -> &'static str {
        "list_milestones"
    }

    fn description(&self) -> &'static str {
        "List all milestones (project milestones) in the workspace, optionally filtered by project"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "projectId": {
                    "type": "string",
                    "description": "Optional project ID to filter milestones by"
                },
                "limit": {
                    "type": "number",
                    "description": "Maximum number of milestones to return (default: 50)"
                }
            },
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: ListMilestonesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let limit = request.limit.unwrap_or(DEFAULT_MILESTONE_LIMIT);
        let project_id = non_empty(request.project_id);
        let api = context.api();

        let milestones = api.project_milestones(project_id.as_deref(), limit).await?;
        let milestones: Vec<Value> = milestones_with_project(api, milestones)
            .await?
            .iter()
            .map(|(milestone, project)| milestone_entry(milestone, project.as_ref()))
            .collect();

        Ok(create_success_response("milestones", Value::Array(milestones)))
    }
}
