//! Issue update tool for MCP operations

use crate::error::Result;
use crate::mcp::responses::create_message_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::UpdateIssueRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for updating the fields of an existing issue
///
/// Only supplied fields reach the payload. `description` and `milestoneId`
/// accept an explicit `null` to clear the value.
#[derive(Default)]
pub struct UpdateIssueTool;

impl UpdateIssueTool {
    /// Creates a new instance of the UpdateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for UpdateIssueTool {
    fn name(&self) -> &'static str {
        "update_issue"
    }

    fn description(&self) -> &'static str {
        "Update an existing issue's properties"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "The ID of the issue to update"
                },
                "title": {
                    "type": "string",
                    "description": "New title for the issue"
                },
                "description": {
                    "type": "string",
                    "description": "New description for the issue"
                },
                "stateId": {
                    "type": "string",
                    "description": "New workflow state ID"
                },
                "priority": {
                    "type": "number",
                    "description": "New priority level (0-4)"
                },
                "assigneeId": {
                    "type": "string",
                    "description": "User ID to assign the issue to"
                },
                "milestoneId": {
                    "type": ["string", "null"],
                    "description": "Milestone ID to assign the issue to (use null to remove)"
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
        let request: UpdateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        let (issue_id, input) = request.into_parts();
        tracing::debug!("Updating issue {}: {:?}", issue_id, input);

        context.api().update_issue(&issue_id, input).await?;
        tracing::info!("Updated issue {}", issue_id);

        Ok(create_message_response("Issue updated successfully"))
    }
}
