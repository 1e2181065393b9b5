//! Workflow state listing tool for MCP operations

use crate::error::{LinearKanbanError, Result};
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::{sort_states, workflow_state};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::{non_empty, ListWorkflowStatesRequest};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for listing the columns of a team's board
#[derive(Default)]
pub struct ListWorkflowStatesTool;

impl ListWorkflowStatesTool {
    /// Creates a new instance of the ListWorkflowStatesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListWorkflowStatesTool {
    fn name(&self) -> &'static str {
        "list_workflow_states"
    }

    fn description(&self) -> &'static str {
        "List all workflow states (columns) available for a team's kanban board"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "teamId": {
                    "type": "string",
                    "description": "Optional team ID. If not provided, uses the first team."
                }
            },
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: ListWorkflowStatesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let api = context.api();

        let team = match non_empty(request.team_id) {
            Some(team_id) => api.team(&team_id).await?,
            None => api
                .teams()
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| LinearKanbanError::TeamNotFound("No team found".into()))?,
        };
        tracing::debug!("Listing workflow states of team {}", team.key);

        let states = api.team_states(&team.id).await?;
        let states: Vec<Value> = sort_states(states).iter().map(workflow_state).collect();

        Ok(create_success_response("states", Value::Array(states)))
    }
}
