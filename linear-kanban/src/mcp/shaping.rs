//! Projections from Linear entities to the JSON shapes tools and resources
//! return
//!
//! Every key of a projection is always present; absent values are `null`.
//! Nested relations collapse to `{id, name}`.

use super::constants::UNKNOWN_STATE;
use crate::linear::model::*;
use serde_json::{json, Value};

/// Entities that collapse to an `{id, name}` reference
pub trait Named {
    /// Identifier
    fn ref_id(&self) -> &str;
    /// Display name
    fn ref_name(&self) -> &str;
}

macro_rules! impl_named {
    ($($ty:ty),*) => {
        $(impl Named for $ty {
            fn ref_id(&self) -> &str {
                &self.id
            }
            fn ref_name(&self) -> &str {
                &self.name
            }
        })*
    };
}

impl_named!(Team, Project, User, ProjectMilestone, WorkflowState);

/// `{id, name}` or `null`
pub fn entity_ref<T: Named>(entity: Option<&T>) -> Value {
    match entity {
        Some(e) => json!({ "id": e.ref_id(), "name": e.ref_name() }),
        None => Value::Null,
    }
}

/// Name of an optional entity, or `null`
pub fn name_of<T: Named>(entity: Option<&T>) -> Value {
    entity.map_or(Value::Null, |e| Value::from(e.ref_name()))
}

/// First `max` characters of `text`; absent text becomes empty
pub fn truncate(text: Option<&str>, max: usize) -> String {
    text.map(|t| t.chars().take(max).collect())
        .unwrap_or_default()
}

fn state_name(state: Option<&WorkflowState>) -> &str {
    state.map_or(UNKNOWN_STATE, |s| s.name.as_str())
}

/// Team as listed by `list_teams` and `linear://teams`
pub fn team_summary(team: &Team) -> Value {
    json!({
        "id": team.id,
        "name": team.name,
        "key": team.key,
        "description": team.description,
    })
}

/// Team with its workflow states, sorted by position
pub fn team_detail(team: &Team, states: Vec<WorkflowState>) -> Value {
    let states: Vec<Value> = sort_states(states).iter().map(workflow_state).collect();
    json!({
        "id": team.id,
        "name": team.name,
        "key": team.key,
        "description": team.description,
        "states": states,
    })
}

/// Project as listed by `list_projects`
pub fn project_summary(project: &Project) -> Value {
    json!({
        "id": project.id,
        "name": project.name,
        "description": project.description,
        "state": project.state,
        "progress": project.progress,
        "url": project.url,
    })
}

/// Project as listed by `linear://projects`
pub fn project_resource_entry(project: &Project) -> Value {
    json!({
        "id": project.id,
        "name": project.name,
        "description": project.description,
        "state": project.state,
        "progress": project.progress,
    })
}

/// Project returned by `create_project`, `null` if upstream returned none
pub fn created_project(project: Option<&Project>) -> Value {
    match project {
        Some(p) => json!({
            "id": p.id,
            "name": p.name,
            "description": p.description,
            "state": p.state,
            "url": p.url,
        }),
        None => Value::Null,
    }
}

/// Project details with its lead and most recent updates
pub fn project_detail(
    project: &Project,
    lead: Option<&User>,
    recent_updates: &[(ProjectUpdate, Option<User>)],
    budget: usize,
) -> Value {
    let recent: Vec<Value> = recent_updates
        .iter()
        .map(|(update, user)| {
            json!({
                "id": update.id,
                "body": truncate(Some(&update.body), budget),
                "health": update.health,
                "createdAt": update.created_at,
                "user": name_of(user.as_ref()),
            })
        })
        .collect();

    json!({
        "id": project.id,
        "name": project.name,
        "description": project.description,
        "state": project.state,
        "progress": project.progress,
        "health": project.health,
        "targetDate": project.target_date,
        "startDate": project.start_date,
        "lead": entity_ref(lead),
        "url": project.url,
        "createdAt": project.created_at,
        "updatedAt": project.updated_at,
        "recentUpdates": recent,
    })
}

/// Issue as listed by `list_issues` and `list_milestone_issues`
pub fn issue_listing(
    issue: &Issue,
    state: Option<&WorkflowState>,
    assignee: Option<&User>,
    budget: usize,
) -> Value {
    json!({
        "id": issue.id,
        "identifier": issue.identifier,
        "title": issue.title,
        "description": truncate(issue.description.as_deref(), budget),
        "state": state_name(state),
        "stateId": state.map(|s| s.id.as_str()),
        "priority": issue.priority,
        "priorityLabel": issue.priority_label,
        "assignee": name_of(assignee),
        "url": issue.url,
    })
}

/// Issue as returned by `search_issues`
pub fn search_hit(issue: &Issue, state: Option<&WorkflowState>, budget: usize) -> Value {
    json!({
        "id": issue.id,
        "identifier": issue.identifier,
        "title": issue.title,
        "description": truncate(issue.description.as_deref(), budget),
        "state": state_name(state),
        "priority": issue.priority,
        "priorityLabel": issue.priority_label,
        "url": issue.url,
    })
}

/// Issue embedded in milestone details; `priority` is the label
pub fn milestone_issue(
    issue: &Issue,
    state: Option<&WorkflowState>,
    assignee: Option<&User>,
) -> Value {
    json!({
        "id": issue.id,
        "identifier": issue.identifier,
        "title": issue.title,
        "state": state_name(state),
        "priority": issue.priority_label,
        "assignee": name_of(assignee),
        "url": issue.url,
    })
}

/// Issue as listed by `linear://issues`
pub fn issue_resource_entry(issue: &Issue, state: Option<&WorkflowState>) -> Value {
    json!({
        "id": issue.id,
        "identifier": issue.identifier,
        "title": issue.title,
        "state": state_name(state),
        "priority": issue.priority_label,
        "url": issue.url,
    })
}

/// Relations resolved for a single issue
#[derive(Debug, Default)]
pub struct IssueRelations {
    /// Workflow state
    pub state: Option<WorkflowState>,
    /// Assigned user
    pub assignee: Option<User>,
    /// Owning project
    pub project: Option<Project>,
    /// Owning team
    pub team: Option<Team>,
    /// Milestone the issue is attached to
    pub milestone: Option<ProjectMilestone>,
    /// Comments, in upstream order
    pub comments: Vec<Comment>,
}

/// Full issue details for `get_issue`
///
/// Unlike listings, a missing state is `null` rather than `"Unknown"`.
pub fn issue_detail(issue: &Issue, relations: &IssueRelations) -> Value {
    let comments: Vec<Value> = relations
        .comments
        .iter()
        .map(|c| json!({ "id": c.id, "body": c.body, "createdAt": c.created_at }))
        .collect();

    json!({
        "id": issue.id,
        "identifier": issue.identifier,
        "title": issue.title,
        "description": issue.description,
        "state": name_of(relations.state.as_ref()),
        "stateId": relations.state.as_ref().map(|s| s.id.as_str()),
        "priority": issue.priority,
        "priorityLabel": issue.priority_label,
        "assignee": entity_ref(relations.assignee.as_ref()),
        "project": entity_ref(relations.project.as_ref()),
        "team": entity_ref(relations.team.as_ref()),
        "milestone": entity_ref(relations.milestone.as_ref()),
        "url": issue.url,
        "createdAt": issue.created_at,
        "updatedAt": issue.updated_at,
        "comments": comments,
    })
}

/// Issue returned by `create_issue`, `null` if upstream returned none
pub fn created_issue(issue: Option<&Issue>) -> Value {
    match issue {
        Some(i) => json!({
            "id": i.id,
            "identifier": i.identifier,
            "title": i.title,
            "url": i.url,
        }),
        None => Value::Null,
    }
}

/// Sort workflow states ascending by position
pub fn sort_states(mut states: Vec<WorkflowState>) -> Vec<WorkflowState> {
    states.sort_by(|a, b| a.position.total_cmp(&b.position));
    states
}

/// Workflow state as listed by `list_workflow_states`
pub fn workflow_state(state: &WorkflowState) -> Value {
    json!({
        "id": state.id,
        "name": state.name,
        "type": state.state_type,
        "position": state.position,
        "color": state.color,
    })
}

/// Workflow state as listed by `linear://workflow-states`
pub fn workflow_state_resource_entry(state: &WorkflowState) -> Value {
    json!({
        "id": state.id,
        "name": state.name,
        "type": state.state_type,
        "position": state.position,
    })
}

/// User as listed by `list_users`
pub fn user_entry(user: &User) -> Value {
    json!({
        "id": user.id,
        "name": user.name,
        "email": user.email,
        "displayName": user.display_name,
        "active": user.active,
    })
}

/// Comment returned by `add_comment`, `null` if upstream returned none
pub fn created_comment(comment: Option<&Comment>) -> Value {
    match comment {
        Some(c) => json!({ "id": c.id, "body": c.body }),
        None => Value::Null,
    }
}

/// Update returned by `create_project_update`, `null` if upstream returned none
pub fn created_project_update(update: Option<&ProjectUpdate>) -> Value {
    match update {
        Some(u) => json!({
            "id": u.id,
            "body": u.body,
            "health": u.health,
            "createdAt": u.created_at,
            "url": u.url,
        }),
        None => Value::Null,
    }
}

/// Update as listed by `list_project_updates`
pub fn project_update_entry(update: &ProjectUpdate, user: Option<&User>) -> Value {
    json!({
        "id": update.id,
        "body": update.body,
        "health": update.health,
        "createdAt": update.created_at,
        "url": update.url,
        "user": entity_ref(user),
    })
}

/// Update as listed by `linear://project-updates`
pub fn project_update_resource_entry(
    project: &Project,
    update: &ProjectUpdate,
    user: Option<&User>,
    budget: usize,
) -> Value {
    json!({
        "projectId": project.id,
        "projectName": project.name,
        "id": update.id,
        "body": truncate(Some(&update.body), budget),
        "health": update.health,
        "createdAt": update.created_at,
        "user": name_of(user),
    })
}

/// Milestone as listed by `list_milestones`
pub fn milestone_entry(milestone: &ProjectMilestone, project: Option<&Project>) -> Value {
    json!({
        "id": milestone.id,
        "name": milestone.name,
        "description": milestone.description,
        "targetDate": milestone.target_date,
        "sortOrder": milestone.sort_order,
        "project": entity_ref(project),
        "createdAt": milestone.created_at,
        "updatedAt": milestone.updated_at,
    })
}

/// Milestone details for `get_milestone`, with its issues
pub fn milestone_detail(
    milestone: &ProjectMilestone,
    project: Option<&Project>,
    issues: &[(Issue, Option<WorkflowState>, Option<User>)],
) -> Value {
    let mut detail = milestone_entry(milestone, project);
    let issues: Vec<Value> = issues
        .iter()
        .map(|(issue, state, assignee)| milestone_issue(issue, state.as_ref(), assignee.as_ref()))
        .collect();
    if let Value::Object(map) = &mut detail {
        map.insert("issues".to_string(), Value::Array(issues));
    }
    detail
}

/// Milestone returned by `create_milestone`, `null` if upstream returned none
pub fn created_milestone(milestone: Option<&ProjectMilestone>) -> Value {
    match milestone {
        Some(m) => json!({
            "id": m.id,
            "name": m.name,
            "description": m.description,
            "targetDate": m.target_date,
        }),
        None => Value::Null,
    }
}

/// Milestone as listed by `linear://milestones`
pub fn milestone_resource_entry(milestone: &ProjectMilestone, project: Option<&Project>) -> Value {
    json!({
        "id": milestone.id,
        "name": milestone.name,
        "description": milestone.description,
        "targetDate": milestone.target_date,
        "project": entity_ref(project),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_truncate_keeps_first_chars() {
        let long = "x".repeat(1000);
        assert_eq!(truncate(Some(&long), 300).len(), 300);
        assert_eq!(truncate(Some("short"), 300), "short");
        assert_eq!(truncate(None, 300), "");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate(Some("héllo wörld"), 5), "héllo");
    }

    proptest! {
        #[test]
        fn prop_truncate_is_prefix_within_budget(text in ".{0,400}", max in 0usize..350) {
            let cut = truncate(Some(&text), max);
            prop_assert!(cut.chars().count() <= max);
            prop_assert!(text.starts_with(&cut));
            if text.chars().count() <= max {
                prop_assert_eq!(cut, text);
            }
        }
    }

    #[test]
    fn test_listing_reports_unknown_state() {
        let issue = Issue::new("i1", "ENG-1", "Orphan");
        let shaped = issue_listing(&issue, None, None, 300);
        assert_eq!(shaped["state"], "Unknown");
        assert_eq!(shaped["stateId"], Value::Null);
        assert_eq!(shaped["assignee"], Value::Null);
        assert_eq!(shaped["description"], "");
    }

    #[test]
    fn test_listing_has_exactly_declared_keys() {
        let issue = Issue::new("i1", "ENG-1", "Listed");
        let shaped = issue_listing(&issue, None, None, 300);
        let keys: Vec<&str> = shaped.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
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
            ]
        );
    }

    #[test]
    fn test_entity_ref() {
        let user = User::new("u1", "Ada Lovelace", "ada@example.com");
        assert_eq!(
            entity_ref(Some(&user)),
            json!({ "id": "u1", "name": "Ada Lovelace" })
        );
        assert_eq!(entity_ref::<User>(None), Value::Null);
    }

    #[test]
    fn test_sort_states_by_position() {
        let states = vec![
            WorkflowState::new("s3", "Done", "completed", 3.0, "t1"),
            WorkflowState::new("s1", "Todo", "unstarted", 1.0, "t1"),
            WorkflowState::new("s2", "In Progress", "started", 2.0, "t1"),
        ];
        let names: Vec<String> = sort_states(states).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Todo", "In Progress", "Done"]);
    }

    #[test]
    fn test_milestone_detail_embeds_issues() {
        let milestone = ProjectMilestone::new("m1", "Beta", "p1");
        let project = Project::new("p1", "Apollo");
        let mut issue = Issue::new("i1", "ENG-1", "Ship");
        issue.priority_label = "High".to_string();

        let detail = milestone_detail(&milestone, Some(&project), &[(issue, None, None)]);
        assert_eq!(detail["project"]["name"], "Apollo");
        assert_eq!(detail["issues"][0]["priority"], "High");
        assert_eq!(detail["issues"][0]["state"], "Unknown");
    }

    #[test]
    fn test_created_entities_null_when_absent() {
        assert_eq!(created_issue(None), Value::Null);
        assert_eq!(created_comment(None), Value::Null);
        assert_eq!(created_milestone(None), Value::Null);
        assert_eq!(created_project_update(None), Value::Null);
        assert_eq!(created_project(None), Value::Null);
    }
}
