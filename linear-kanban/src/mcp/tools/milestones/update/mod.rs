//! Milestone update tool for MCP operations

use crate::error::Result;
use crate::mcp::responses::create_message_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::UpdateMilestoneRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for updating a milestone
///
/// `description` and `targetDate` accept an explicit `null` to clear them.
#[derive(Default)]
pub struct UpdateMilestoneTool;

impl UpdateMilestoneTool {
    /// Creates a new instance of the UpdateMilestoneTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for UpdateMilestoneTool {
    fn name(&self) -> &'static str {
        "update_milestone"
    }

    fn description(&self) -> &'static str {
        "Update an existing milestone's properties"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "milestoneId": {
                    "type": "string",
                    "description": "The ID of the milestone to update"
                },
                "name": {
                    "type": "string",
                    "description": "New name for the milestone"
                },
                "description": {
                    "type": "string",
                    "description": "New description for the milestone"
                },
                "targetDate": {
                    "type": "string",
                    "description": "New target date for the milestone (ISO 8601 format)"
                },
                "sortOrder": {
                    "type": "number",
                    "description": "New sort order for the milestone"
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
        let request: UpdateMilestoneRequest = BaseToolImpl::parse_arguments(arguments)?;
        let (milestone_id, input) = request.into_parts()?;

        context
            .api()
            .update_project_milestone(&milestone_id, input)
            .await?;
        tracing::info!("Updated milestone {}", milestone_id);

        Ok(create_message_response("Milestone updated successfully"))
    }
}
