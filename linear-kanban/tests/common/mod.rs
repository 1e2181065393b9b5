//! Shared fixtures for the integration tests

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use linear_kanban::linear::mock::{MockFixtures, MockLinearClient};
use linear_kanban::linear::model::*;
use linear_kanban::mcp::responses::response_text;
use linear_kanban::McpServer;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A small workspace: one team with three columns, one project with a
/// milestone, two issues and one update
pub fn workspace() -> MockFixtures {
    let mut launch = Project::new("p1", "Launch");
    launch.lead_id = Some("u1".to_string());

    let mut login = Issue::new("i1", "ENG-1", "Fix login");
    login.description = Some("x".repeat(400));
    login.state_id = Some("s1".to_string());
    login.assignee_id = Some("u1".to_string());
    login.project_id = Some("p1".to_string());
    login.team_id = Some("t1".to_string());
    login.project_milestone_id = Some("m1".to_string());
    login.priority = 2;
    login.priority_label = priority_label(2).to_string();

    let mut docs = Issue::new("i2", "ENG-2", "Write docs");
    docs.team_id = Some("t1".to_string());

    MockFixtures::new()
        .with_team(Team::new("t1", "Engineering", "ENG"))
        .with_team(Team::new("t2", "Design", "DES"))
        .with_state(WorkflowState::new("s1", "Todo", "unstarted", 1.0, "t1"))
        .with_state(WorkflowState::new("s2", "In Progress", "started", 2.0, "t1"))
        .with_state(WorkflowState::new("s3", "Done", "completed", 0.5, "t1"))
        .with_user(User::new("u1", "Ada Lovelace", "ada@example.com"))
        .with_project(launch)
        .with_milestone(ProjectMilestone::new("m1", "Beta", "p1"))
        .with_issue(login)
        .with_issue(docs)
        .with_comment(Comment {
            id: "c1".to_string(),
            body: "Reproduced on staging".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            issue_id: Some("i1".to_string()),
        })
        .with_project_update(ProjectUpdate {
            id: "pu1".to_string(),
            body: "Login flow is on track".to_string(),
            health: Some(ProjectHealth::OnTrack),
            created_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
            url: "https://linear.app/update/pu1".to_string(),
            user_id: Some("u1".to_string()),
            project_id: Some("p1".to_string()),
        })
}

/// Server over the fixture workspace, plus a handle on its mock client
pub fn server() -> (McpServer, Arc<MockLinearClient>) {
    let client = Arc::new(MockLinearClient::from_fixtures(workspace()));
    (McpServer::new(client.clone()), client)
}

/// Build an argument map from a JSON object literal
pub fn args(value: Value) -> Option<Map<String, Value>> {
    value.as_object().cloned()
}

/// Parsed body of a tool result
pub fn body(result: &CallToolResult) -> Value {
    serde_json::from_str(response_text(result).expect("text content")).expect("json body")
}
