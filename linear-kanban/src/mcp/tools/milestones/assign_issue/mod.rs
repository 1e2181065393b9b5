//! Milestone assignment tool for MCP operations

use crate::error::Result;
use crate::linear::model::IssueUpdateInput;
use crate::mcp::responses::create_message_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::{non_empty, AssignIssueToMilestoneRequest};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};

/// Tool for attaching an issue to a milestone, or detaching it
#[derive(Default)]
pub struct AssignIssueToMilestoneTool;

impl AssignIssueToMilestoneTool {
    /// Creates a new instance of the AssignIssueToMilestoneTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AssignIssueToMilestoneTool {
    fn name(&self) -> &'static str {
        "assign_issue_to_milestone"
    }

    fn description(&self) -> &'static str {
        "Assign an issue to a milestone or remove it from its current milestone"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "The ID of the issue to assign"
                },
                "milestoneId": {
                    "type": ["string", "null"],
                    "description": "The ID of the milestone to assign the issue to. Pass null or omit to remove from milestone."
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
        let request: AssignIssueToMilestoneRequest = BaseToolImpl::parse_arguments(arguments)?;
        let milestone_id = non_empty(request.milestone_id);
        let message = match &milestone_id {
            Some(_) => "Issue assigned to milestone successfully",
            None => "Issue removed from milestone successfully",
        };

        let input = IssueUpdateInput {
            project_milestone_id: Some(milestone_id),
            ..Default::default()
        };
        context.api().update_issue(&request.issue_id, input).await?;
        tracing::info!("{} ({})", message, request.issue_id);

        Ok(create_message_response(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::model::Issue;
    use crate::linear::{MockCall, MockFixtures, MockLinearClient};
    use crate::mcp::responses::response_text;
    use std::sync::Arc;

    async fn assign(milestone_id: Option<Value>) -> (String, Option<Option<String>>) {
        let client = Arc::new(MockLinearClient::from_fixtures(
            MockFixtures::new().with_issue(Issue::new("i1", "ENG-1", "Fix login")),
        ));
        let context = ToolContext::new(client.clone());

        let mut arguments = Map::new();
        arguments.insert("issueId".to_string(), Value::from("i1"));
        if let Some(milestone_id) = milestone_id {
            arguments.insert("milestoneId".to_string(), milestone_id);
        }

        let result = AssignIssueToMilestoneTool::new()
            .execute(arguments, &context)
            .await
            .unwrap();
        let forwarded = match client.last_call().await {
            Some(MockCall::UpdateIssue { input, .. }) => input.project_milestone_id,
            other => panic!("unexpected call {other:?}"),
        };
        (response_text(&result).unwrap().to_string(), forwarded)
    }

    #[tokio::test]
    async fn test_assign_sets_milestone() {
        let (text, forwarded) = assign(Some(Value::from("m1"))).await;
        assert!(text.contains("Issue assigned to milestone successfully"));
        assert_eq!(forwarded, Some(Some("m1".to_string())));
    }

    #[tokio::test]
    async fn test_null_empty_or_missing_milestone_clears() {
        for milestone_id in [None, Some(Value::Null), Some(Value::from(""))] {
            let (text, forwarded) = assign(milestone_id).await;
            assert!(text.contains("Issue removed from milestone successfully"));
            assert_eq!(forwarded, Some(None));
        }
    }
}
