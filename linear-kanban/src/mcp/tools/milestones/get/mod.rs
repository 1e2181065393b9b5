//! Milestone detail tool for MCP operations

use crate::error::Result;
use crate::linear::relations::{issues_with_state_and_assignee, milestone_project};
use crate::mcp::constants::MILESTONE_DETAIL_ISSUES;
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::milestone_detail;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetMilestoneRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for fetching a milestone with its project and issues
#[derive(Default)]
pub struct GetMilestoneTool;

impl GetMilestoneTool {
    /// Creates a new instance of the GetMilestoneTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetMilestoneTool {
    fn name(&self) -> &'static str {
        "get_milestone"
    }

    fn description(&self) -> &'static str {
        "Get detailed information about a specific milestone by its ID"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "milestoneId": {
                    "type": "string",
                    "description": "The ID of the milestone to retrieve"
                }
            },
            "required": ["milestoneId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: GetMilestoneRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::debug!("Getting milestone {}", request.milestone_id);

        let api = context.api();
        let (milestone, issues) = tokio::try_join!(
            api.project_milestone(&request.milestone_id),
            api.milestone_issues(&request.milestone_id, MILESTONE_DETAIL_ISSUES)
        )?;
        let (project, issues) = tokio::try_join!(
            milestone_project(api, &milestone),
            issues_with_state_and_assignee(api, issues)
        )?;

        Ok(create_success_response(
            "milestone",
            milestone_detail(&milestone, project.as_ref(), &issues),
        ))
    }
}
