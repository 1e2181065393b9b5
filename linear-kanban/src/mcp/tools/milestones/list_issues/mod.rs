//! Milestone issue listing tool for MCP operations

use crate::error::Result;
use crate::linear::relations::issues_with_state_and_assignee;
use crate::mcp::constants::{DEFAULT_MILESTONE_ISSUE_LIMIT, LISTING_TEXT_BUDGET};
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::issue_listing;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::ListMilestoneIssuesRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for listing the issues attached to a milestone
#[derive(Default)]
pub struct ListMilestoneIssuesTool;

impl ListMilestoneIssuesTool {
    /// Creates a new instance of the ListMilestoneIssuesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListMilestoneIssuesTool {
    fn name(&self) -> &'static str {
        "list_milestone_issues"
    }

    fn description(&self) -> &'static str {
        "List all issues assigned to a specific milestone"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "milestoneId": {
                    "type": "string",
                    "description": "The ID of the milestone to list issues for"
                },
                "limit": {
                    "type": "number",
                    "description": "Maximum number of issues to return (default: 50)"
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
        let request: ListMilestoneIssuesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let limit = request.limit.unwrap_or(DEFAULT_MILESTONE_ISSUE_LIMIT);
        let api = context.api();

        let issues = api.milestone_issues(&request.milestone_id, limit).await?;
        let issues: Vec<Value> = issues_with_state_and_assignee(api, issues)
            .await?
            .iter()
            .map(|(issue, state, assignee)| {
                issue_listing(issue, state.as_ref(), assignee.as_ref(), LISTING_TEXT_BUDGET)
            })
            .collect();

        Ok(create_success_response("issues", Value::Array(issues)))
    }
}
