//! User listing tool for MCP operations

use crate::error::Result;
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::user_entry;
use crate::mcp::tool_registry::{McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for listing workspace members
#[derive(Default)]
pub struct ListUsersTool;

impl ListUsersTool {
    /// Creates a new instance of the ListUsersTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListUsersTool {
    fn name(&self) -> &'static str {
        "list_users"
    }

    fn description(&self) -> &'static str {
        "List all users in the Linear workspace"
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
        let users = context.api().users().await?;
        let users: Vec<Value> = users.iter().map(user_entry).collect();
        Ok(create_success_response("users", Value::Array(users)))
    }
}
