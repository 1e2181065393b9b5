//! Project detail tool for MCP operations

use crate::error::Result;
use crate::linear::relations::{project_lead, updates_with_author};
use crate::mcp::constants::{LISTING_TEXT_BUDGET, PROJECT_DETAIL_UPDATES};
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::project_detail;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetProjectRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for fetching a project with its lead and recent updates
#[derive(Default)]
pub struct GetProjectTool;

impl GetProjectTool {
    /// Creates a new instance of the GetProjectTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetProjectTool {
    fn name(&self) -> &'static str {
        "get_project"
    }

    fn description(&self) -> &'static str {
        "Get detailed information about a specific project including its current status and recent updates"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "projectId": {
                    "type": "string",
                    "description": "The ID of the project to retrieve"
                }
            },
            "required": ["projectId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: GetProjectRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::debug!("Getting project {}", request.project_id);

        let api = context.api();
        let (project, updates) = tokio::try_join!(
            api.project(&request.project_id),
            api.project_updates(&request.project_id, PROJECT_DETAIL_UPDATES)
        )?;
        let (lead, recent) =
            tokio::try_join!(project_lead(api, &project), updates_with_author(api, updates))?;

        let detail = project_detail(&project, lead.as_ref(), &recent, LISTING_TEXT_BUDGET);
        Ok(create_success_response("project", detail))
    }
}
