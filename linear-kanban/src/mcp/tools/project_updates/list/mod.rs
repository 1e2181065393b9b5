//! Project update listing tool for MCP operations

use crate::error::Result;
use crate::linear::relations::updates_with_author;
use crate::mcp::constants::DEFAULT_PROJECT_UPDATE_LIMIT;
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::project_update_entry;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::ListProjectUpdatesRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for listing the update history of a project
#[derive(Default)]
pub struct ListProjectUpdatesTool;

impl ListProjectUpdatesTool {
    /// Creates a new instance of the ListProjectUpdatesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListProjectUpdatesTool {
    fn name(&self) -> &'static str {
        "list_project_updates"
    }

    fn description(&self) -> &'static str {
        "List all updates for a specific project, showing progress history and status changes"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "projectId": {
                    "type": "string",
                    "description": "The ID of the project to list updates for"
                },
                "limit": {
                    "type": "number",
                    "description": "Maximum number of updates to return (default: 10)"
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
        let request: ListProjectUpdatesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let limit = request.limit.unwrap_or(DEFAULT_PROJECT_UPDATE_LIMIT);
        let api = context.api();

        let updates = api.project_updates(&request.project_id, limit).await?;
        let updates: Vec<Value> = updates_with_author(api, updates)
            .await?
            .iter()
            .map(|(update, user)| project_update_entry(update, user.as_ref()))
            .collect();

        Ok(create_success_response("projectUpdates", Value::Array(updates)))
    }
}
