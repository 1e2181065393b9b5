//! Milestone deletion tool for MCP operations

use crate::error::Result;
use crate::mcp::responses::create_message_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::DeleteMilestoneRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for deleting a milestone
#[derive(Default)]
pub struct DeleteMilestoneTool;

impl DeleteMilestoneTool {
    /// Creates a new instance of the DeleteMilestoneTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for DeleteMilestoneTool {
    fn name(&self) -> &'static str {
        "delete_milestone"
    }

    fn description(&self) -> &'static str {
        "Delete a milestone"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "milestoneId": {
                    "type": "string",
                    "description": "The ID of the milestone to delete"
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
        let request: DeleteMilestoneRequest = BaseToolImpl::parse_arguments(arguments)?;

        context
            .api()
            .delete_project_milestone(&request.milestone_id)
            .await?;
        tracing::info!("Deleted milestone {}", request.milestone_id);

        Ok(create_message_response("Milestone deleted successfully"))
    }
}
