//! Issue move tool for MCP operations
//!
//! Moves an issue to another column of its team's board, either by state id
//! or by state name.

use crate::error::{LinearKanbanError, Result};
use crate::linear::model::IssueUpdateInput;
use crate::linear::LinearApi;
use crate::mcp::responses::create_message_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::{non_empty, MoveIssueRequest};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for moving an issue between workflow states
#[derive(Default)]
pub struct MoveIssueTool;

impl MoveIssueTool {
    /// Creates a new instance of the MoveIssueTool
    pub fn new() -> Self {
        Self
    }

    /// Resolve a state name against the states of the issue's team
    ///
    /// Matching is exact but case-insensitive; the first match in upstream
    /// order wins.
    pub async fn resolve_state_id(
        api: &dyn LinearApi,
        issue_id: &str,
        state_name: &str,
    ) -> Result<String> {
        let issue = api.issue(issue_id).await?;
        let team_id = issue
            .team_id
            .ok_or_else(|| LinearKanbanError::TeamNotFound("Could not find team for issue".into()))?;
        let states = api.team_states(&team_id).await?;

        let wanted = state_name.to_lowercase();
        match states.iter().find(|s| s.name.to_lowercase() == wanted) {
            Some(state) => Ok(state.id.clone()),
            None => Err(LinearKanbanError::StateNotFound {
                state_name: state_name.to_string(),
                available_states: states.into_iter().map(|s| s.name).collect(),
            }),
        }
    }
}

#[async_trait]
impl McpTool for MoveIssueTool {
    fn name(&self) -> &'static str {
        "move_issue"
    }

    fn description(&self) -> &'static str {
        "Move an issue to a different workflow state (kanban column) by state name or ID"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "The ID of the issue to move"
                },
                "stateId": {
                    "type": "string",
                    "description": "The ID of the target workflow state (use this OR stateName)"
                },
                "stateName": {
                    "type": "string",
                    "description": "The name of the target workflow state (use this OR stateId)"
                }
            },
            "required": ["issueId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: MoveIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        let api = context.api();

        let state_id = match (non_empty(request.state_id), non_empty(request.state_name)) {
            (Some(id), _) => id,
            (None, Some(name)) => {
                tracing::debug!("Resolving state '{}' for issue {}", name, request.issue_id);
                Self::resolve_state_id(api, &request.issue_id, &name).await?
            }
            (None, None) => {
                return Err(LinearKanbanError::Other(
                    "Either stateId or stateName is required".into(),
                ))
            }
        };

        let input = IssueUpdateInput {
            state_id: Some(state_id.clone()),
            ..Default::default()
        };
        api.update_issue(&request.issue_id, input).await?;
        tracing::info!("Moved issue {} to state {}", request.issue_id, state_id);

        Ok(create_message_response("Issue moved successfully"))
    }
}
