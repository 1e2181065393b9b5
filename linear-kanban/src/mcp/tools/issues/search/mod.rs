//! Issue search tool for MCP operations

use crate::error::{LinearKanbanError, Result};
use crate::linear::relations::issue_state;
use crate::mcp::constants::{DEFAULT_SEARCH_LIMIT, SEARCH_TEXT_BUDGET};
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::search_hit;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::SearchIssuesRequest;
use async_trait::async_trait;
use futures::future::try_join_all;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for full-text issue search
#[derive(Default)]
pub struct SearchIssuesTool;

impl SearchIssuesTool {
    /// Creates a new instance of the SearchIssuesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchIssuesTool {
    fn name(&self) -> &'static str {
        "search_issues"
    }

    fn description(&self) -> &'static str {
        "Search for issues by title or description text"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query to match against issue titles and descriptions"
                },
                "limit": {
                    "type": "number",
                    "description": "Maximum number of results to return (default: 20)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: SearchIssuesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let limit = request.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        tracing::debug!("Searching issues for '{}' (limit {})", request.query, limit);

        let api = context.api();
        let hits = api.search_issues(&request.query, limit).await?;
        let hits = try_join_all(hits.iter().map(|issue| async move {
            let state = issue_state(api, issue).await?;
            Ok::<_, LinearKanbanError>(search_hit(issue, state.as_ref(), SEARCH_TEXT_BUDGET))
        }))
        .await?;

        Ok(create_success_response("issues", Value::Array(hits)))
    }
}
