//! Issue deletion tool for MCP operations

use crate::error::Result;
use crate::mcp::responses::create_message_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::DeleteIssueRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for deleting an issue
#[derive(Default)]
pub struct DeleteIssueTool;

impl DeleteIssueTool {
    /// Creates a new instance of the DeleteIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for DeleteIssueTool {
    fn name(&self) -> &'static str {
        "delete_issue"
    }

    fn description(&self) -> &'static str {
        "Permanently delete an issue from Linear"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "The ID of the issue to delete"
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
        let request: DeleteIssueRequest = BaseToolImpl::parse_arguments(arguments)?;

        context.api().delete_issue(&request.issue_id).await?;
        tracing::info!("Deleted issue {}", request.issue_id);

        Ok(create_message_response("Issue deleted successfully"))
    }
}
