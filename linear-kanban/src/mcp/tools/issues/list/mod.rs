//! Issue listing tool for MCP operations

use crate::error::Result;
use crate::linear::relations::issues_with_state_and_assignee;
use crate::mcp::constants::{DEFAULT_ISSUE_LIMIT, LISTING_TEXT_BUDGET};
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::issue_listing;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::{non_empty, ListIssuesRequest};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for listing issues, optionally restricted to a project
#[derive(Default)]
pub struct ListIssuesTool;

impl ListIssuesTool {
    /// Creates a new instance of the ListIssuesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListIssuesTool {
    fn name(&self) -> &'static str {
        "list_issues"
    }

    fn description(&self) -> &'static str {
        "List issues, optionally filtered by project. Returns issue details including state, priority, and URL."
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "projectId": {
                    "type": "string",
                    "description": "Optional project ID to filter issues by"
                },
                "limit": {
                    "type": "number",
                    "description": "Maximum number of issues to return (default: 50)"
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
        let request: ListIssuesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let limit = request.limit.unwrap_or(DEFAULT_ISSUE_LIMIT);
        let api = context.api();

        let issues = match non_empty(request.project_id) {
            Some(project_id) => {
                tracing::debug!("Listing up to {} issues of project {}", limit, project_id);
                api.project_issues(&project_id, limit).await?
            }
            None => {
                tracing::debug!("Listing up to {} issues", limit);
                api.issues(limit).await?
            }
        };

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
