//! Comment creation tool for MCP operations

use crate::error::Result;
use crate::linear::model::CommentCreateInput;
use crate::mcp::responses::create_success_response;
use crate::mcp::shaping::created_comment;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::AddCommentRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for commenting on an issue
#[derive(Default)]
pub struct AddCommentTool;

impl AddCommentTool {
    /// Creates a new instance of the AddCommentTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddCommentTool {
    fn name(&self) -> &'static str {
        "add_comment"
    }

    fn description(&self) -> &'static str {
        "Add a comment to an issue"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "The ID of the issue to comment on"
                },
                "body": {
                    "type": "string",
                    "description": "The comment text (supports markdown)"
                }
            },
            "required": ["issueId", "body"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: AddCommentRequest = BaseToolImpl::parse_arguments(arguments)?;
        let input = CommentCreateInput {
            issue_id: request.issue_id,
            body: request.body,
        };

        let comment = context.api().create_comment(input).await?;
        if let Some(comment) = &comment {
            tracing::info!("Added comment {}", comment.id);
        }

        Ok(create_success_response(
            "comment",
            created_comment(comment.as_ref()),
        ))
    }
}
