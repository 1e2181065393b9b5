//! End-to-end tool calls against the in-memory Linear client

mod common;

use common::{args, body, server};
use linear_kanban::linear::mock::MockCall;
use linear_kanban::linear::model::{IssueUpdateInput, ProjectMilestoneUpdateInput};
use linear_kanban::mcp::responses::response_text;
use serde_json::{json, Value};
use std::collections::BTreeSet;

fn keys(value: &Value) -> BTreeSet<&str> {
    value
        .as_object()
        .map(|object| object.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

fn key_set<'a>(expected: &[&'a str]) -> BTreeSet<&'a str> {
    expected.iter().copied().collect()
}

#[tokio::test]
async fn test_list_issues_defaults_and_projection() {
    let (server, client) = server();
    let result = server.call_tool_by_name("list_issues", None).await;
    assert_eq!(result.is_error, Some(false));

    let body = body(&result);
    assert_eq!(body["success"], true);
    let issues = body["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 2);

    let login = &issues[0];
    assert_eq!(login["identifier"], "ENG-1");
    assert_eq!(login["description"].as_str().unwrap().chars().count(), 300);
    assert_eq!(login["state"], "Todo");
    assert_eq!(login["stateId"], "s1");
    assert_eq!(login["priorityLabel"], "High");
    assert_eq!(login["assignee"], "Ada Lovelace");

    let docs = &issues[1];
    assert_eq!(docs["state"], "Unknown");
    assert_eq!(docs["stateId"], json!(null));
    assert_eq!(docs["assignee"], json!(null));
    assert_eq!(docs["description"], "");

    assert_eq!(client.calls().await[0], MockCall::Issues { first: 50 });
}

#[tokio::test]
async fn test_list_issues_scoped_to_project() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("list_issues", args(json!({ "projectId": "p1", "limit": 5 })))
        .await;
    assert_eq!(body(&result)["issues"].as_array().unwrap().len(), 1);
    assert_eq!(
        client.calls().await[0],
        MockCall::ProjectIssues {
            project_id: "p1".to_string(),
            first: 5
        }
    );
}

#[tokio::test]
async fn test_move_issue_by_state_name_is_case_insensitive() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("move_issue", args(json!({ "issueId": "i1", "stateName": "done" })))
        .await;

    assert_eq!(
        response_text(&result),
        Some(r#"{"success":true,"message":"Issue moved successfully"}"#)
    );
    assert_eq!(
        client.last_call().await,
        Some(MockCall::UpdateIssue {
            id: "i1".to_string(),
            input: IssueUpdateInput {
                state_id: Some("s3".to_string()),
                ..Default::default()
            },
        })
    );
}

#[tokio::test]
async fn test_move_issue_unknown_state_lists_columns() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("move_issue", args(json!({ "issueId": "i1", "stateName": "Review" })))
        .await;

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        body(&result),
        json!({
            "success": false,
            "error": "State 'Review' not found",
            "availableStates": ["Todo", "In Progress", "Done"],
        })
    );
    assert!(!client
        .calls()
        .await
        .iter()
        .any(|call| matches!(call, MockCall::UpdateIssue { .. })));
}

#[tokio::test]
async fn test_move_issue_needs_a_target() {
    let (server, _) = server();
    let result = server
        .call_tool_by_name("move_issue", args(json!({ "issueId": "i1" })))
        .await;
    assert_eq!(
        body(&result),
        json!({ "success": false, "error": "Either stateId or stateName is required" })
    );
}

#[tokio::test]
async fn test_move_issue_by_id_skips_state_lookup() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("move_issue", args(json!({ "issueId": "i1", "stateId": "s2" })))
        .await;
    assert_eq!(result.is_error, Some(false));
    assert_eq!(client.calls().await.len(), 1);
}

#[tokio::test]
async fn test_move_issue_unknown_issue() {
    let (server, _) = server();
    let result = server
        .call_tool_by_name(
            "move_issue",
            args(json!({ "issueId": "missing", "stateName": "Todo" })),
        )
        .await;
    assert_eq!(body(&result)["error"], "Issue not found: missing");
}

#[tokio::test]
async fn test_update_issue_with_no_fields_sends_empty_payload() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("update_issue", args(json!({ "issueId": "i1" })))
        .await;

    assert_eq!(body(&result)["message"], "Issue updated successfully");
    assert_eq!(
        client.last_call().await,
        Some(MockCall::UpdateIssue {
            id: "i1".to_string(),
            input: IssueUpdateInput::default(),
        })
    );
}

#[tokio::test]
async fn test_assign_issue_to_milestone_null_detaches() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name(
            "assign_issue_to_milestone",
            args(json!({ "issueId": "i1", "milestoneId": null })),
        )
        .await;

    assert_eq!(
        body(&result)["message"],
        "Issue removed from milestone successfully"
    );
    assert_eq!(
        client.last_call().await,
        Some(MockCall::UpdateIssue {
            id: "i1".to_string(),
            input: IssueUpdateInput {
                project_milestone_id: Some(None),
                ..Default::default()
            },
        })
    );
    let snapshot = client.snapshot().await;
    assert_eq!(snapshot.issues[0].project_milestone_id, None);
}

#[tokio::test]
async fn test_list_workflow_states_defaults_to_first_team() {
    let (server, client) = server();
    let result = server.call_tool_by_name("list_workflow_states", None).await;

    let names: Vec<_> = body(&result)["states"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Done", "Todo", "In Progress"]);
    assert_eq!(
        client.calls().await,
        vec![MockCall::Teams, MockCall::TeamStates("t1".to_string())]
    );
}

#[tokio::test]
async fn test_get_issue_resolves_relations() {
    let (server, _) = server();
    let result = server
        .call_tool_by_name("get_issue", args(json!({ "issueId": "i1" })))
        .await;
    let issue = &body(&result)["issue"];

    assert_eq!(issue["state"], "Todo");
    assert_eq!(issue["assignee"], json!({ "id": "u1", "name": "Ada Lovelace" }));
    assert_eq!(issue["project"], json!({ "id": "p1", "name": "Launch" }));
    assert_eq!(issue["team"], json!({ "id": "t1", "name": "Engineering" }));
    assert_eq!(issue["milestone"], json!({ "id": "m1", "name": "Beta" }));
    assert_eq!(issue["comments"][0]["body"], "Reproduced on staging");
    assert_eq!(issue["description"].as_str().unwrap().len(), 400);
}

#[tokio::test]
async fn test_get_issue_without_relations_uses_null() {
    let (server, _) = server();
    let result = server
        .call_tool_by_name("get_issue", args(json!({ "issueId": "i2" })))
        .await;
    let issue = &body(&result)["issue"];

    assert_eq!(issue["state"], json!(null));
    assert_eq!(issue["assignee"], json!(null));
    assert_eq!(issue["milestone"], json!(null));
    assert_eq!(issue["comments"], json!([]));
}

#[tokio::test]
async fn test_search_issues_default_limit() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("search_issues", args(json!({ "query": "LOGIN" })))
        .await;

    let issues = body(&result)["issues"].as_array().unwrap().clone();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["description"].as_str().unwrap().len(), 200);
    assert_eq!(
        client.calls().await[0],
        MockCall::SearchIssues {
            query: "LOGIN".to_string(),
            first: 20
        }
    );
}

#[tokio::test]
async fn test_create_issue_requires_title() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("create_issue", args(json!({ "teamId": "t1" })))
        .await;

    assert_eq!(
        body(&result),
        json!({ "success": false, "error": "Missing required argument: title" })
    );
    assert!(client.calls().await.is_empty());
}

#[tokio::test]
async fn test_create_issue_without_returned_entity() {
    let (server, client) = server();
    client.omit_created_entities(true).await;
    let result = server
        .call_tool_by_name(
            "create_issue",
            args(json!({ "title": "New", "teamId": "t1", "milestoneId": "m1" })),
        )
        .await;

    assert_eq!(body(&result), json!({ "success": true, "issue": null }));
    match client.last_call().await {
        Some(MockCall::CreateIssue(input)) => {
            assert_eq!(input.project_milestone_id.as_deref(), Some("m1"));
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn test_upstream_failure_becomes_envelope() {
    let (server, client) = server();
    client.fail_with("Authentication required").await;
    let result = server.call_tool_by_name("list_teams", None).await;

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        body(&result),
        json!({ "success": false, "error": "Authentication required" })
    );
}

#[tokio::test]
async fn test_get_milestone_embeds_issues() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("get_milestone", args(json!({ "milestoneId": "m1" })))
        .await;
    let milestone = &body(&result)["milestone"];

    assert_eq!(milestone["project"], json!({ "id": "p1", "name": "Launch" }));
    assert_eq!(milestone["issues"][0]["priority"], "High");
    assert_eq!(milestone["issues"][0]["state"], "Todo");
    assert!(client.calls().await.contains(&MockCall::MilestoneIssues {
        milestone_id: "m1".to_string(),
        first: 20
    }));
}

#[tokio::test]
async fn test_update_milestone_clears_target_date() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name(
            "update_milestone",
            args(json!({ "milestoneId": "m1", "targetDate": "" })),
        )
        .await;

    assert_eq!(body(&result)["message"], "Milestone updated successfully");
    match client.last_call().await {
        Some(MockCall::UpdateProjectMilestone { id, input }) => {
            assert_eq!(id, "m1");
            assert_eq!(input.target_date, Some(None));
            assert_eq!(input.name, None);
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn test_get_project_includes_recent_updates() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("get_project", args(json!({ "projectId": "p1" })))
        .await;
    let project = &body(&result)["project"];

    assert_eq!(project["lead"], json!({ "id": "u1", "name": "Ada Lovelace" }));
    assert_eq!(project["recentUpdates"][0]["user"], "Ada Lovelace");
    assert!(client.calls().await.contains(&MockCall::ProjectUpdates {
        project_id: "p1".to_string(),
        first: 5
    }));
}

#[tokio::test]
async fn test_get_team_includes_sorted_states() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("get_team", args(json!({ "teamId": "t1" })))
        .await;

    let body = body(&result);
    assert_eq!(body["success"], true);
    assert_eq!(
        keys(&body["team"]),
        key_set(&["id", "name", "key", "description", "states"])
    );
    let names: Vec<&str> = body["team"]["states"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert_eq!(names, ["Done", "Todo", "In Progress"]);

    let calls = client.calls().await;
    assert!(calls.contains(&MockCall::Team("t1".to_string())));
    assert!(calls.contains(&MockCall::TeamStates("t1".to_string())));
}

#[tokio::test]
async fn test_list_projects_projection() {
    let (server, _client) = server();
    let result = server.call_tool_by_name("list_projects", None).await;

    let body = body(&result);
    assert_eq!(body["success"], true);
    let projects = body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(
        keys(&projects[0]),
        key_set(&["id", "name", "description", "state", "progress", "url"])
    );
    assert_eq!(projects[0]["name"], "Launch");
}

#[tokio::test]
async fn test_create_project() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name(
            "create_project",
            args(json!({
                "name": "Mobile",
                "teamIds": ["t1"],
                "description": "",
                "targetDate": "2024-09-30"
            })),
        )
        .await;

    let body = body(&result);
    assert_eq!(body["success"], true);
    assert_eq!(
        keys(&body["project"]),
        key_set(&["id", "name", "description", "state", "url"])
    );
    assert_eq!(body["project"]["name"], "Mobile");

    match client.last_call().await {
        Some(MockCall::CreateProject(input)) => {
            assert_eq!(input.team_ids, ["t1"]);
            assert_eq!(input.description, None);
            assert_eq!(input.target_date.map(|d| d.to_string()).as_deref(), Some("2024-09-30"));
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_issue() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("delete_issue", args(json!({ "issueId": "i2" })))
        .await;

    assert_eq!(
        response_text(&result),
        Some(r#"{"success":true,"message":"Issue deleted successfully"}"#)
    );
    assert_eq!(client.last_call().await, Some(MockCall::DeleteIssue("i2".to_string())));
    assert_eq!(client.snapshot().await.issues.len(), 1);
}

#[tokio::test]
async fn test_add_comment() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name(
            "add_comment",
            args(json!({ "issueId": "i1", "body": "Fixed in #42" })),
        )
        .await;

    let body = body(&result);
    assert_eq!(body["success"], true);
    assert_eq!(keys(&body["comment"]), key_set(&["id", "body"]));
    assert_eq!(body["comment"]["body"], "Fixed in #42");
    assert_eq!(client.snapshot().await.comments.len(), 2);
}

#[tokio::test]
async fn test_list_users_projection() {
    let (server, client) = server();
    let result = server.call_tool_by_name("list_users", None).await;

    let body = body(&result);
    assert_eq!(body["success"], true);
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(
        keys(&users[0]),
        key_set(&["id", "name", "email", "displayName", "active"])
    );
    assert_eq!(client.calls().await, vec![MockCall::Users]);
}

#[tokio::test]
async fn test_create_project_update() {
    let (server, _client) = server();
    let result = server
        .call_tool_by_name(
            "create_project_update",
            args(json!({ "projectId": "p1", "body": "Beta is out" })),
        )
        .await;

    let body = body(&result);
    assert_eq!(body["success"], true);
    assert_eq!(
        keys(&body["projectUpdate"]),
        key_set(&["id", "body", "health", "createdAt", "url"])
    );
    assert_eq!(body["projectUpdate"]["health"], json!(null));
}

#[tokio::test]
async fn test_list_project_updates_default_limit() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("list_project_updates", args(json!({ "projectId": "p1" })))
        .await;

    let body = body(&result);
    assert_eq!(body["success"], true);
    let updates = body["projectUpdates"].as_array().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(
        keys(&updates[0]),
        key_set(&["id", "body", "health", "createdAt", "url", "user"])
    );
    assert_eq!(updates[0]["user"], json!({ "id": "u1", "name": "Ada Lovelace" }));

    assert_eq!(
        client.calls().await[0],
        MockCall::ProjectUpdates {
            project_id: "p1".to_string(),
            first: 10
        }
    );
}

#[tokio::test]
async fn test_list_milestones_names_project() {
    let (server, client) = server();
    let result = server.call_tool_by_name("list_milestones", None).await;

    let body = body(&result);
    assert_eq!(body["success"], true);
    let milestones = body["milestones"].as_array().unwrap();
    assert_eq!(milestones.len(), 1);
    assert_eq!(
        keys(&milestones[0]),
        key_set(&[
            "id",
            "name",
            "description",
            "targetDate",
            "sortOrder",
            "project",
            "createdAt",
            "updatedAt"
        ])
    );
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
async fn test_create_milestone() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name(
            "create_milestone",
            args(json!({
                "name": "GA",
                "projectId": "p1",
                "targetDate": "2024-12-01",
                "sortOrder": 2
            })),
        )
        .await;

    let body = body(&result);
    assert_eq!(body["success"], true);
    assert_eq!(
        keys(&body["milestone"]),
        key_set(&["id", "name", "description", "targetDate"])
    );
    assert_eq!(body["milestone"]["targetDate"], "2024-12-01");

    match client.last_call().await {
        Some(MockCall::CreateProjectMilestone(input)) => {
            assert_eq!(input.project_id, "p1");
            assert_eq!(input.description, None);
            assert_eq!(input.sort_order, Some(2.0));
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn test_list_milestone_issues_default_limit() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("list_milestone_issues", args(json!({ "milestoneId": "m1" })))
        .await;

    let body = body(&result);
    assert_eq!(body["success"], true);
    let issues = body["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(
        keys(&issues[0]),
        key_set(&[
            "id",
            "identifier",
            "title",
            "description",
            "state",
            "stateId",
            "priority",
            "priorityLabel",
            "assignee",
            "url"
        ])
    );
    assert_eq!(issues[0]["state"], "Todo");
    assert_eq!(
        client.calls().await[0],
        MockCall::MilestoneIssues {
            milestone_id: "m1".to_string(),
            first: 50
        }
    );
}

#[tokio::test]
async fn test_update_milestone_with_no_fields_sends_empty_payload() {
    let (server, client) = server();
    let result = server
        .call_tool_by_name("update_milestone", args(json!({ "milestoneId": "m1" })))
        .await;

    assert_eq!(result.is_error, Some(false));
    assert_eq!(
        client.last_call().await,
        Some(MockCall::UpdateProjectMilestone {
            id: "m1".to_string(),
            input: ProjectMilestoneUpdateInput::default(),
        })
    );
}
