//! Project creation tool for MCP operations

use crate::error::Result;
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::created_project;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::CreateProjectRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for creating a project owned by one or more teams
#[derive(Default)]
pub struct CreateProjectTool;

impl CreateProjectTool {
    /// Creates a new instance of the CreateProjectTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateProjectTool {
    fn name(&self) -> &'static str {
        "create_project"
    }

    fn description(&self) -> &'static str {
        "Create a new project in Linear"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "The name of the project"
                },
                "teamIds": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "IDs of the teams the project belongs to"
                },
                "description": {
                    "type": "string",
                    "description": "Optional description of the project"
                },
                "targetDate": {
                    "type": "string",
                    "description": "Optional target date (ISO 8601 format, e.g., '2024-12-31')"
                },
                "startDate": {
                    "type": "string",
                    "description": "Optional start date (ISO 8601 format)"
                }
            },
            "required": ["name", "teamIds"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: CreateProjectRequest = BaseToolImpl::parse_arguments(arguments)?;
        let input = request.into_input()?;

        let project = context.api().create_project(input).await?;
        if let Some(project) = &project {
            tracing::info!("Created project {} ({})", project.name, project.id);
        }

        Ok(create_success_response(
            "project",
            created_project(project.as_ref()),
        ))
    }
}
