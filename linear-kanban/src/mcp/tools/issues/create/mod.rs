//! Issue creation tool for MCP operations

use crate::error::Result;
use crate::linear::model::IssueCreateInput;
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::created_issue;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::CreateIssueRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for creating new issues
#[derive(Default)]
pub struct CreateIssueTool;

impl CreateIssueTool {
    /// Creates a new instance of the CreateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateIssueTool {
    fn name(&self) -> &'static str {
        "create_issue"
    }

    fn description(&self) -> &'static str {
        "Create a new issue in Linear"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "The title of the issue"
                },
                "description": {
                    "type": "string",
                    "description": "The description of the issue (supports markdown)"
                },
                "teamId": {
                    "type": "string",
                    "description": "The ID of the team to create the issue in"
                },
                "projectId": {
                    "type": "string",
                    "description": "Optional project ID to associate the issue with"
                },
                "stateId": {
                    "type": "string",
                    "description": "Optional workflow state ID for the issue"
                },
                "priority": {
                    "type": "number",
                    "description": "Priority level: 0 (no priority), 1 (urgent), 2 (high), 3 (medium), 4 (low)"
                },
                "assigneeId": {
                    "type": "string",
                    "description": "Optional user ID to assign the issue to"
                },
                "milestoneId": {
                    "type": "string",
                    "description": "Optional milestone ID to assign the issue to"
                }
            },
            "required": ["title", "teamId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: CreateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        let input = IssueCreateInput::from(request);
        tracing::debug!("Creating issue '{}' in team {}", input.title, input.team_id);

        let issue = context.api().create_issue(input).await?;
        if let Some(issue) = &issue {
            tracing::info!("Created issue {}", issue.identifier);
        }

        Ok(create_success_response("issue", created_issue(issue.as_ref())))
    }
}
