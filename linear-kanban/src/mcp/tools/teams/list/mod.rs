//! Team listing tool for MCP operations

use crate::error::Result;
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::team_summary;
use crate::mcp::tool_registry::{McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for listing the teams visible to the API key
#[derive(Default)]
pub struct ListTeamsTool;

impl ListTeamsTool {
    /// Creates a new instance of the ListTeamsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListTeamsTool {
    fn name(&self) -> &'static str {
        "list_teams"
    }

    fn description(&self) -> &'static str {
        "List all Linear teams available to the authenticated user"
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
        let teams = context.api().teams().await?;
        tracing::debug!("Listing {} teams", teams.len());

        let teams: Vec<Value> = teams.iter().map(team_summary).collect();
        Ok(create_success_response("teams", Value::Array(teams)))
    }
}
