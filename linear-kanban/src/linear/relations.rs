//! Explicit lookups for the relations entities refer to by id
//!
//! Each function returns `Ok(None)` when the entity has no such relation and
//! propagates any client error otherwise. Callers join these with
//! `tokio::try_join!` or `futures::future::try_join_all`, so one failed lookup
//! fails the whole request.

use crate::error::{LinearKanbanError, Result};
use crate::linear::client::LinearApi;
use crate::linear::model::*;
use futures::future::try_join_all;

/// Workflow state of an issue
pub async fn issue_state(api: &dyn LinearApi, issue: &Issue) -> Result<Option<WorkflowState>> {
    match issue.state_id.as_deref() {
        Some(id) => api.workflow_state(id).await.map(Some),
        None => Ok(None),
    }
}

/// Assignee of an issue
pub async fn issue_assignee(api: &dyn LinearApi, issue: &Issue) -> Result<Option<User>> {
    match issue.assignee_id.as_deref() {
        Some(id) => api.user(id).await.map(Some),
        None => Ok(None),
    }
}

/// Project of an issue
pub async fn issue_project(api: &dyn LinearApi, issue: &Issue) -> Result<Option<Project>> {
    match issue.project_id.as_deref() {
        Some(id) => api.project(id).await.map(Some),
        None => Ok(None),
    }
}

/// Team of an issue
pub async fn issue_team(api: &dyn LinearApi, issue: &Issue) -> Result<Option<Team>> {
    match issue.team_id.as_deref() {
        Some(id) => api.team(id).await.map(Some),
        None => Ok(None),
    }
}

/// Milestone of an issue
pub async fn issue_milestone(
    api: &dyn LinearApi,
    issue: &Issue,
) -> Result<Option<ProjectMilestone>> {
    match issue.project_milestone_id.as_deref() {
        Some(id) => api.project_milestone(id).await.map(Some),
        None => Ok(None),
    }
}

/// Lead of a project
pub async fn project_lead(api: &dyn LinearApi, project: &Project) -> Result<Option<User>> {
    match project.lead_id.as_deref() {
        Some(id) => api.user(id).await.map(Some),
        None => Ok(None),
    }
}

/// Author of a project update
pub async fn update_author(api: &dyn LinearApi, update: &ProjectUpdate) -> Result<Option<User>> {
    match update.user_id.as_deref() {
        Some(id) => api.user(id).await.map(Some),
        None => Ok(None),
    }
}

/// Project a milestone belongs to
pub async fn milestone_project(
    api: &dyn LinearApi,
    milestone: &ProjectMilestone,
) -> Result<Option<Project>> {
    match milestone.project_id.as_deref() {
        Some(id) => api.project(id).await.map(Some),
        None => Ok(None),
    }
}

/// State and assignee of an issue, fetched concurrently
pub async fn issue_state_and_assignee(
    api: &dyn LinearApi,
    issue: &Issue,
) -> Result<(Option<WorkflowState>, Option<User>)> {
    tokio::try_join!(issue_state(api, issue), issue_assignee(api, issue))
}

/// [`issue_state_and_assignee`] for every issue, in input order
pub async fn issues_with_state_and_assignee(
    api: &dyn LinearApi,
    issues: Vec<Issue>,
) -> Result<Vec<(Issue, Option<WorkflowState>, Option<User>)>> {
    try_join_all(issues.into_iter().map(|issue| async move {
        let (state, assignee) = issue_state_and_assignee(api, &issue).await?;
        Ok::<_, LinearKanbanError>((issue, state, assignee))
    }))
    .await
}

/// Author of every update, in input order
pub async fn updates_with_author(
    api: &dyn LinearApi,
    updates: Vec<ProjectUpdate>,
) -> Result<Vec<(ProjectUpdate, Option<User>)>> {
    try_join_all(updates.into_iter().map(|update| async move {
        let author = update_author(api, &update).await?;
        Ok::<_, LinearKanbanError>((update, author))
    }))
    .await
}

/// Project of every milestone, in input order
pub async fn milestones_with_project(
    api: &dyn LinearApi,
    milestones: Vec<ProjectMilestone>,
) -> Result<Vec<(ProjectMilestone, Option<Project>)>> {
    try_join_all(milestones.into_iter().map(|milestone| async move {
        let project = milestone_project(api, &milestone).await?;
        Ok::<_, LinearKanbanError>((milestone, project))
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::mock::{MockFixtures, MockLinearClient};

    fn fixtures() -> MockFixtures {
        let mut assigned = Issue::new("i1", "ENG-1", "Assigned");
        assigned.state_id = Some("s1".into());
        assigned.assignee_id = Some("u1".into());

        MockFixtures::new()
            .with_team(Team::new("t1", "Engineering", "ENG"))
            .with_state(WorkflowState::new("s1", "Todo", "unstarted", 0.0, "t1"))
            .with_user(User::new("u1", "Ada Lovelace", "ada@example.com"))
            .with_issue(assigned)
            .with_issue(Issue::new("i2", "ENG-2", "Bare"))
    }

    #[tokio::test]
    async fn test_absent_relation_is_none() {
        let client = MockLinearClient::from_fixtures(fixtures());
        let issue = client.issue("i2").await.unwrap();
        let (state, assignee) = issue_state_and_assignee(&client, &issue).await.unwrap();
        assert!(state.is_none());
        assert!(assignee.is_none());
    }

    #[tokio::test]
    async fn test_bulk_lookup_keeps_order() {
        let client = MockLinearClient::from_fixtures(fixtures());
        let issues = client.issues(10).await.unwrap();
        let joined = issues_with_state_and_assignee(&client, issues).await.unwrap();

        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].0.id, "i1");
        assert_eq!(joined[0].1.as_ref().unwrap().name, "Todo");
        assert_eq!(joined[0].2.as_ref().unwrap().name, "Ada Lovelace");
        assert_eq!(joined[1].0.id, "i2");
    }

    #[tokio::test]
    async fn test_dangling_relation_fails_whole_join() {
        let mut dangling = Issue::new("i3", "ENG-3", "Dangling");
        dangling.state_id = Some("missing".into());
        let client = MockLinearClient::from_fixtures(fixtures().with_issue(dangling));

        let issues = client.issues(10).await.unwrap();
        let err = issues_with_state_and_assignee(&client, issues)
            .await
            .unwrap_err();
        assert!(matches!(err, LinearKanbanError::NotFound { .. }));
    }
}
