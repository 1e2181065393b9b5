//! Milestone creation tool for MCP operations

use crate::error::Result;
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::created_milestone;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::CreateMilestoneRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for creating a milestone in a project
#[derive(Default)]
pub struct CreateMilestoneTool;

impl CreateMilestoneTool {
    /// Creates a new instance of the CreateMilestoneTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateMilestoneTool {
    fn name(&self) -> &'static str {
        "create_milestone"
    }

    fn description(&self) -> &'static str {
        "Create a new milestone for a project"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "The name of the milestone"
                },
                "projectId": {
                    "type": "string",
                    "description": "The ID of the project this milestone belongs to"
                },
                "description": {
                    "type": "string",
                    "description": "Optional description of the milestone"
                },
                "targetDate": {
                    "type": "string",
                    "description": "Optional target date for the milestone (ISO 8601 format, e.g., '2024-12-31')"
                },
                "sortOrder": {
                    "type": "number",
                    "description": "Optional sort order for the milestone"
                }
            },
            "required": ["name", "projectId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: CreateMilestoneRequest = BaseToolImpl::parse_arguments(arguments)?;
        let input = request.into_input()?;
        tracing::debug!("Creating milestone '{}' in project {}", input.name, input.project_id);

        let milestone = context.api().create_project_milestone(input).await?;
        if let Some(milestone) = &milestone {
            tracing::info!("Created milestone {} ({})", milestone.name, milestone.id);
        }

        Ok(create_success_response(
            "milestone",
            created_milestone(milestone.as_ref()),
        ))
    }
}
