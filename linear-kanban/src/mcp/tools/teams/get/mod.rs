//! Team detail tool for MCP operations

use crate::error::Result;
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::team_detail;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetTeamRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for fetching one team together with its workflow states
#[derive(Default)]
pub struct GetTeamTool;

impl GetTeamTool {
    /// Creates a new instance of the GetTeamTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetTeamTool {
    fn name(&self) -> &'static str {
        "get_team"
    }

    fn description(&self) -> &'static str {
        "Get a team by its ID, including its workflow states (kanban columns)"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "teamId": {
                    "type": "string",
                    "description": "The ID of the team to retrieve"
                }
            },
            "required": ["teamId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: GetTeamRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::debug!("Getting team {}", request.team_id);

        let api = context.api();
        let (team, states) =
            tokio::try_join!(api.team(&request.team_id), api.team_states(&request.team_id))?;

        Ok(create_success_response("team", team_detail(&team, states)))
    }
}
