//! Project listing tool for MCP operations

use crate::error::Result;
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::project_summary;
use crate::mcp::tool_registry::{McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for listing every project in the workspace
#[derive(Default)]
pub struct ListProjectsTool;

impl ListProjectsTool {
    /// Creates a new instance of the ListProjectsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListProjectsTool {
    fn name(&self) -> &'static str {
        "list_projects"
    }

    fn description(&self) -> &'static str {
        "List all projects in the Linear workspace"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(
        &self,
        _arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let projects = context.api().projects().await?;
        let projects: Vec<Value> = projects.iter().map(project_summary).collect();
        Ok(create_success_response("projects", Value::Array(projects)))
    }
}
