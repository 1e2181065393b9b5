//! Issue detail tool for MCP operations

use crate::error::Result;
use crate::linear::relations::{
    issue_assignee, issue_milestone, issue_project, issue_state, issue_team,
};
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::{issue_detail, IssueRelations};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetIssueRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for fetching one issue with every relation and its comments
#[derive(Default)]
pub struct GetIssueTool;

impl GetIssueTool {
    /// Creates a new instance of the GetIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueTool {
    fn name(&self) -> &'static str {
        "get_issue"
    }

    fn description(&self) -> &'static str {
        "Get detailed information about a specific issue by its ID"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "The ID of the issue to retrieve"
                }
            },
            "required": ["issueId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: GetIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::debug!("Getting issue {}", request.issue_id);

        let api = context.api();
        let issue = api.issue(&request.issue_id).await?;
        let (state, assignee, project, team, milestone, comments) = tokio::try_join!(
            issue_state(api, &issue),
            issue_assignee(api, &issue),
            issue_project(api, &issue),
            issue_team(api, &issue),
            issue_milestone(api, &issue),
            api.issue_comments(&issue.id),
        )?;

        let relations = IssueRelations {
            state,
            assignee,
            project,
            team,
            milestone,
            comments,
        };
        Ok(create_success_response(
            "issue",
            issue_detail(&issue, &relations),
        ))
    }
}
