//! Project update creation tool for MCP operations

use crate::error::Result;
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::created_project_update;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::CreateProjectUpdateRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for posting a status update on a project
#[derive(Default)]
pub struct CreateProjectUpdateTool;

impl CreateProjectUpdateTool {
    /// Creates a new instance of the CreateProjectUpdateTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateProjectUpdateTool {
    fn name(&self) -> &'static str {
        "create_project_update"
    }

    fn description(&self) -> &'static str {
        "Create a project update to share progress, summarize development steps, or communicate status. Supports markdown formatting."
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "projectId": {
                    "type": "string",
                    "description": "The ID of the project to add the update to"
                },
                "body": {
                    "type": "string",
                    "description": "The content of the update (supports markdown). Can include development summaries, progress notes, blockers, etc."
                },
                "health": {
                    "type": "string",
                    "enum": ["onTrack", "atRisk", "offTrack"],
                    "description": "Optional health status of the project: 'onTrack' (green), 'atRisk' (yellow), 'offTrack' (red)"
                }
            },
            "required": ["projectId", "body"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: CreateProjectUpdateRequest = BaseToolImpl::parse_arguments(arguments)?;
        let input = request.into_input()?;
        let project_id = input.project_id.clone();

        let update = context.api().create_project_update(input).await?;
        tracing::info!("Posted update on project {}", project_id);

        Ok(create_success_response(
            "projectUpdate",
            created_project_update(update.as_ref()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::model::{Project, ProjectHealth};
    use crate::linear::{MockCall, MockFixtures, MockLinearClient};
    use crate::mcp::responses::response_text;
    use std::sync::Arc;

    fn arguments(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_create_project_update_tool_schema() {
        let tool = CreateProjectUpdateTool::new();
        let schema = tool.schema();

        assert_eq!(tool.name(), "create_project_update");
        assert_eq!(schema["required"], serde_json::json!(["projectId", "body"]));
        assert_eq!(schema["properties"]["health"]["enum"][1], "atRisk");
    }

    #[tokio::test]
    async fn test_create_project_update_with_health() {
        let client = Arc::new(MockLinearClient::from_fixtures(
            MockFixtures::new().with_project(Project::new("p1", "Launch")),
        ));
        let context = ToolContext::new(client.clone());

        let result = CreateProjectUpdateTool::new()
            .execute(
                arguments(serde_json::json!({
                    "projectId": "p1",
                    "body": "Shipped the beta",
                    "health": "onTrack"
                })),
                &context,
            )
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(false));
        let body: Value = serde_json::from_str(response_text(&result).unwrap()).unwrap();
        assert_eq!(body["projectUpdate"]["body"], "Shipped the beta");
        match client.last_call().await {
            Some(MockCall::CreateProjectUpdate(input)) => {
                assert_eq!(input.health, Some(ProjectHealth::OnTrack))
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_project_update_rejects_unknown_health() {
        let client = Arc::new(MockLinearClient::new());
        let context = ToolContext::new(client.clone());

        let result = CreateProjectUpdateTool::new()
            .execute(
                arguments(serde_json::json!({
                    "projectId": "p1",
                    "body": "b",
                    "health": "onFire"
                })),
                &context,
            )
            .await;

        assert!(result.is_err());
        assert!(client.calls().await.is_empty());
    }
}
