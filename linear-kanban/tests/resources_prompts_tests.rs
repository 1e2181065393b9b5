//! Resource snapshots and prompt rendering through the server surface

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::server;
use linear_kanban::linear::mock::{MockCall, MockLinearClient};
use linear_kanban::linear::model::{Project, ProjectUpdate, User};
use linear_kanban::mcp::resources::RESOURCES;
use linear_kanban::{LinearKanbanError, McpServer};
use serde_json::{json, Value};
use std::sync::Arc;

async fn read(server: &McpServer, uri: &str) -> Value {
    let text = server.read_resource_uri(uri).await.unwrap();
    serde_json::from_str(&text).unwrap()
}

#[tokio::test]
async fn test_every_catalog_resource_reads_as_array() {
    let (server, _) = server();
    for resource in RESOURCES {
        let value = read(&server, resource.uri).await;
        assert!(value.is_array(), "{} is not an array", resource.uri);
    }
}

#[tokio::test]
async fn test_teams_resource_is_bare_array() {
    let (server, _) = server();
    let teams = read(&server, "linear://teams").await;
    assert_eq!(teams[0], json!({
        "id": "t1",
        "name": "Engineering",
        "key": "ENG",
        "description": null,
    }));
    assert_eq!(teams.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_issues_resource_uses_priority_label() {
    let (server, client) = server();
    let issues = read(&server, "linear://issues").await;
    assert_eq!(issues[0]["priority"], "High");
    assert_eq!(issues[0]["state"], "Todo");
    assert_eq!(issues[1]["state"], "Unknown");
    assert_eq!(client.calls().await[0], MockCall::Issues { first: 50 });
}

#[tokio::test]
async fn test_workflow_states_resource_is_sorted() {
    let (server, _) = server();
    let states = read(&server, "linear://workflow-states").await;
    let positions: Vec<f64> = states
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["position"].as_f64().unwrap())
        .collect();
    assert_eq!(positions, vec![0.5, 1.0, 2.0]);
}

#[tokio::test]
async fn test_milestones_resource_names_project() {
    let (server, client) = server();
    let milestones = read(&server, "linear://milestones").await;
    assert_eq!(milestones[0]["project"], json!({ "id": "p1", "name": "Launch" }));
    assert_eq!(
        client.calls().await[0],
        MockCall::ProjectMilestones {
            project_id: None,
            first: 50
        }
    );
}

#[tokio::test]
async fn test_project_updates_resource_newest_first_and_capped() {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut fixtures = common::workspace();
    fixtures.project_updates.clear();
    fixtures
        .users
        .push(User::new("u2", "Grace Hopper", "grace@example.com"));
    for n in 0..5 {
        fixtures
            .projects
            .push(Project::new(format!("px{n}"), format!("P{n}")));
    }

    // Upstream lists a project's updates newest first
    let project_ids = ["p1", "px0", "px1", "px2", "px3", "px4"];
    for (k, project_id) in project_ids.iter().enumerate() {
        for n in (0..4).rev() {
            fixtures.project_updates.push(ProjectUpdate {
                id: format!("{project_id}-{n}"),
                body: "y".repeat(600),
                health: None,
                created_at: base + Duration::days((k * 10 + n) as i64),
                url: String::new(),
                user_id: Some("u2".to_string()),
                project_id: Some(project_id.to_string()),
            });
        }
    }
    let server = McpServer::new(Arc::new(MockLinearClient::from_fixtures(fixtures)));

    let updates = read(&server, "linear://project-updates").await;
    let updates = updates.as_array().unwrap();
    assert_eq!(updates.len(), 10);
    assert_eq!(updates[0]["id"], "px3-3");
    assert_eq!(updates[0]["projectName"], "P3");
    assert_eq!(updates[0]["user"], "Grace Hopper");
    assert_eq!(updates[0]["body"].as_str().unwrap().len(), 500);
    assert!(updates.iter().all(|u| {
        let id = u["id"].as_str().unwrap();
        !id.starts_with("px4") && !id.ends_with("-0")
    }));
}

#[tokio::test]
async fn test_unknown_resource_propagates() {
    let (server, client) = server();
    let err = server.read_resource_uri("linear://cycles").await.unwrap_err();
    assert!(matches!(err, LinearKanbanError::UnknownResource(_)));
    assert!(client.calls().await.is_empty());
}

#[tokio::test]
async fn test_resource_upstream_failure_propagates() {
    let (server, client) = server();
    client.fail_with("rate limited").await;
    let err = server.read_resource_uri("linear://teams").await.unwrap_err();
    assert_eq!(err.to_string(), "rate limited");
}

#[test]
fn test_prompt_renders_arguments() {
    let (server, _) = server();
    let args = json!({ "projectId": "p1" }).as_object().cloned();
    let result = server
        .render_prompt("milestone_overview", args.as_ref())
        .unwrap();
    assert_eq!(result.messages.len(), 1);
    let rmcp::model::PromptMessageContent::Text { text } = &result.messages[0].content else {
        panic!("expected text content");
    };
    assert!(text.contains("p1"));
}

#[test]
fn test_prompt_missing_required_argument() {
    let (server, _) = server();
    let err = server.render_prompt("create_task", None).unwrap_err();
    assert_eq!(err.to_string(), "Missing required argument: title");
}
