//! Mock in-memory Linear client for testing
//!
//! [`MockLinearClient`] implements [`LinearApi`] over a set of fixtures held
//! in memory. Every call is recorded as a [`MockCall`] so tests can assert on
//! the limits and mutation payloads the MCP layer produced.
//!
//! # Usage
//!
//! ```ignore
//! use linear_kanban::linear::mock::{MockFixtures, MockLinearClient};
//! use linear_kanban::linear::model::Team;
//! use linear_kanban::linear::LinearApi;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MockLinearClient::from_fixtures(
//!         MockFixtures::new().with_team(Team::new("t1", "Engineering", "ENG")),
//!     );
//!     assert_eq!(client.teams().await?.len(), 1);
//!     Ok(())
//! }
//! ```

use crate::error::{LinearKanbanError, Result};
use crate::linear::client::LinearApi;
use crate::linear::model::*;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Seed data for a [`MockLinearClient`]
///
/// Collections keep insertion order, which is the order the mock returns
/// them in.
#[derive(Debug, Clone, Default)]
pub struct MockFixtures {
    /// Teams
    pub teams: Vec<Team>,
    /// Workflow states of every team
    pub states: Vec<WorkflowState>,
    /// Projects
    pub projects: Vec<Project>,
    /// Issues
    pub issues: Vec<Issue>,
    /// Users
    pub users: Vec<User>,
    /// Comments
    pub comments: Vec<Comment>,
    /// Project updates
    pub project_updates: Vec<ProjectUpdate>,
    /// Project milestones
    pub milestones: Vec<ProjectMilestone>,
}

impl MockFixtures {
    /// Empty fixtures
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a team
    pub fn with_team(mut self, team: Team) -> Self {
        self.teams.push(team);
        self
    }

    /// Add a workflow state
    pub fn with_state(mut self, state: WorkflowState) -> Self {
        self.states.push(state);
        self
    }

    /// Add a project
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Add an issue
    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.push(issue);
        self
    }

    /// Add a user
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    /// Add a comment
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    /// Add a project update
    pub fn with_project_update(mut self, update: ProjectUpdate) -> Self {
        self.project_updates.push(update);
        self
    }

    /// Add a milestone
    pub fn with_milestone(mut self, milestone: ProjectMilestone) -> Self {
        self.milestones.push(milestone);
        self
    }
}

/// A call received by the mock, with its arguments
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum MockCall {
    Teams,
    Team(String),
    TeamStates(String),
    Projects,
    Project(String),
    CreateProject(ProjectCreateInput),
    ProjectIssues { project_id: String, first: usize },
    ProjectUpdates { project_id: String, first: usize },
    ProjectMilestones { project_id: Option<String>, first: usize },
    Issues { first: usize },
    Issue(String),
    SearchIssues { query: String, first: usize },
    IssueComments(String),
    CreateIssue(IssueCreateInput),
    UpdateIssue { id: String, input: IssueUpdateInput },
    DeleteIssue(String),
    WorkflowState(String),
    User(String),
    Users,
    CreateComment(CommentCreateInput),
    CreateProjectUpdate(ProjectUpdateCreateInput),
    ProjectMilestone(String),
    MilestoneIssues { milestone_id: String, first: usize },
    CreateProjectMilestone(ProjectMilestoneCreateInput),
    UpdateProjectMilestone { id: String, input: ProjectMilestoneUpdateInput },
    DeleteProjectMilestone(String),
}

#[derive(Debug, Default)]
struct MockState {
    data: MockFixtures,
    calls: Vec<MockCall>,
    failure: Option<String>,
    omit_created: bool,
    next_id: u64,
}

impl MockState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-new-{}", self.next_id)
    }

    fn require_team(&self, id: &str) -> Result<&Team> {
        self.data
            .teams
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| LinearKanbanError::not_found("Team", id))
    }

    fn require_project(&self, id: &str) -> Result<&Project> {
        self.data
            .projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| LinearKanbanError::not_found("Project", id))
    }

    fn require_issue(&self, id: &str) -> Result<&Issue> {
        self.data
            .issues
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| LinearKanbanError::not_found("Issue", id))
    }

    fn require_milestone(&self, id: &str) -> Result<&ProjectMilestone> {
        self.data
            .milestones
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| LinearKanbanError::not_found("ProjectMilestone", id))
    }
}

/// In-memory [`LinearApi`] implementation
#[derive(Debug, Clone, Default)]
pub struct MockLinearClient {
    state: Arc<RwLock<MockState>>,
}

impl MockLinearClient {
    /// A client with no data
    pub fn new() -> Self {
        Self::default()
    }

    /// A client seeded with fixtures
    pub fn from_fixtures(fixtures: MockFixtures) -> Self {
        Self {
            state: Arc::new(RwLock::new(MockState {
                data: fixtures,
                ..Default::default()
            })),
        }
    }

    /// Make every subsequent call fail with an upstream error carrying `message`
    pub async fn fail_with(&self, message: impl Into<String>) {
        self.state.write().await.failure = Some(message.into());
    }

    /// Stop failing calls
    pub async fn clear_failure(&self) {
        self.state.write().await.failure = None;
    }

    /// Make create mutations succeed without returning the created entity
    pub async fn omit_created_entities(&self, omit: bool) {
        self.state.write().await.omit_created = omit;
    }

    /// Every call received so far, oldest first
    pub async fn calls(&self) -> Vec<MockCall> {
        self.state.read().await.calls.clone()
    }

    /// The most recent call
    pub async fn last_call(&self) -> Option<MockCall> {
        self.state.read().await.calls.last().cloned()
    }

    /// Forget recorded calls
    pub async fn clear_calls(&self) {
        self.state.write().await.calls.clear();
    }

    /// A copy of the current data, without recording a call
    pub async fn snapshot(&self) -> MockFixtures {
        self.state.read().await.data.clone()
    }

    async fn begin(&self, call: MockCall) -> Result<tokio::sync::RwLockWriteGuard<'_, MockState>> {
        let mut state = self.state.write().await;
        state.calls.push(call);
        if let Some(message) = &state.failure {
            return Err(LinearKanbanError::Upstream(message.clone()));
        }
        Ok(state)
    }
}

#[async_trait]
impl LinearApi for MockLinearClient {
    async fn teams(&self) -> Result<Vec<Team>> {
        let state = self.begin(MockCall::Teams).await?;
        Ok(state.data.teams.clone())
    }

    async fn team(&self, id: &str) -> Result<Team> {
        let state = self.begin(MockCall::Team(id.to_string())).await?;
        state.require_team(id).cloned()
    }

    async fn team_states(&self, team_id: &str) -> Result<Vec<WorkflowState>> {
        let state = self.begin(MockCall::TeamStates(team_id.to_string())).await?;
        state.require_team(team_id)?;
        Ok(state
            .data
            .states
            .iter()
            .filter(|s| s.team_id.as_deref() == Some(team_id))
            .cloned()
            .collect())
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        let state = self.begin(MockCall::Projects).await?;
        Ok(state.data.projects.clone())
    }

    async fn project(&self, id: &str) -> Result<Project> {
        let state = self.begin(MockCall::Project(id.to_string())).await?;
        state.require_project(id).cloned()
    }

    async fn create_project(&self, input: ProjectCreateInput) -> Result<Option<Project>> {
        let mut state = self.begin(MockCall::CreateProject(input.clone())).await?;
        for team_id in &input.team_ids {
            state.require_team(team_id)?;
        }

        let mut project = Project::new(state.next_id("project"), input.name);
        project.description = input.description;
        project.target_date = input.target_date;
        project.start_date = input.start_date;
        project.created_at = Utc::now();
        project.updated_at = project.created_at;
        state.data.projects.push(project.clone());

        Ok((!state.omit_created).then_some(project))
    }

    async fn project_issues(&self, project_id: &str, first: usize) -> Result<Vec<Issue>> {
        let state = self
            .begin(MockCall::ProjectIssues {
                project_id: project_id.to_string(),
                first,
            })
            .await?;
        state.require_project(project_id)?;
        Ok(state
            .data
            .issues
            .iter()
            .filter(|i| i.project_id.as_deref() == Some(project_id))
            .take(first)
            .cloned()
            .collect())
    }

    async fn project_updates(
        &self,
        project_id: &str,
        first: usize,
    ) -> Result<Vec<ProjectUpdate>> {
        let state = self
            .begin(MockCall::ProjectUpdates {
                project_id: project_id.to_string(),
                first,
            })
            .await?;
        state.require_project(project_id)?;
        Ok(state
            .data
            .project_updates
            .iter()
            .filter(|u| u.project_id.as_deref() == Some(project_id))
            .take(first)
            .cloned()
            .collect())
    }

    async fn project_milestones(
        &self,
        project_id: Option<&str>,
        first: usize,
    ) -> Result<Vec<ProjectMilestone>> {
        let state = self
            .begin(MockCall::ProjectMilestones {
                project_id: project_id.map(str::to_string),
                first,
            })
            .await?;
        if let Some(project_id) = project_id {
            state.require_project(project_id)?;
        }
        Ok(state
            .data
            .milestones
            .iter()
            .filter(|m| project_id.is_none() || m.project_id.as_deref() == project_id)
            .take(first)
            .cloned()
            .collect())
    }

    async fn issues(&self, first: usize) -> Result<Vec<Issue>> {
        let state = self.begin(MockCall::Issues { first }).await?;
        Ok(state.data.issues.iter().take(first).cloned().collect())
    }

    async fn issue(&self, id: &str) -> Result<Issue> {
        let state = self.begin(MockCall::Issue(id.to_string())).await?;
        state.require_issue(id).cloned()
    }

    async fn search_issues(&self, query: &str, first: usize) -> Result<Vec<Issue>> {
        let state = self
            .begin(MockCall::SearchIssues {
                query: query.to_string(),
                first,
            })
            .await?;
        let needle = query.to_lowercase();
        Ok(state
            .data
            .issues
            .iter()
            .filter(|i| {
                i.title.to_lowercase().contains(&needle)
                    || i.identifier.to_lowercase().contains(&needle)
                    || i
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .take(first)
            .cloned()
            .collect())
    }

    async fn issue_comments(&self, issue_id: &str) -> Result<Vec<Comment>> {
        let state = self
            .begin(MockCall::IssueComments(issue_id.to_string()))
            .await?;
        state.require_issue(issue_id)?;
        Ok(state
            .data
            .comments
            .iter()
            .filter(|c| c.issue_id.as_deref() == Some(issue_id))
            .cloned()
            .collect())
    }

    async fn create_issue(&self, input: IssueCreateInput) -> Result<Option<Issue>> {
        let mut state = self.begin(MockCall::CreateIssue(input.clone())).await?;
        let key = state.require_team(&input.team_id)?.key.clone();
        let number = state
            .data
            .issues
            .iter()
            .filter(|i| i.team_id.as_deref() == Some(input.team_id.as_str()))
            .count()
            + 1;

        let mut issue = Issue::new(
            state.next_id("issue"),
            format!("{key}-{number}"),
            input.title,
        );
        issue.description = input.description;
        issue.team_id = Some(input.team_id);
        issue.project_id = input.project_id;
        issue.state_id = input.state_id;
        issue.assignee_id = input.assignee_id;
        issue.project_milestone_id = input.project_milestone_id;
        if let Some(priority) = input.priority {
            issue.priority = priority;
            issue.priority_label = priority_label(priority).to_string();
        }
        issue.created_at = Utc::now();
        issue.updated_at = issue.created_at;
        state.data.issues.push(issue.clone());

        Ok((!state.omit_created).then_some(issue))
    }

    async fn update_issue(&self, id: &str, input: IssueUpdateInput) -> Result<()> {
        let mut state = self
            .begin(MockCall::UpdateIssue {
                id: id.to_string(),
                input: input.clone(),
            })
            .await?;
        let issue = state
            .data
            .issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| LinearKanbanError::not_found("Issue", id))?;

        if let Some(title) = input.title {
            issue.title = title;
        }
        if let Some(description) = input.description {
            issue.description = description;
        }
        if let Some(state_id) = input.state_id {
            issue.state_id = Some(state_id);
        }
        if let Some(priority) = input.priority {
            issue.priority = priority;
            issue.priority_label = priority_label(priority).to_string();
        }
        if let Some(assignee_id) = input.assignee_id {
            issue.assignee_id = Some(assignee_id);
        }
        if let Some(milestone_id) = input.project_milestone_id {
            issue.project_milestone_id = milestone_id;
        }
        issue.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_issue(&self, id: &str) -> Result<()> {
        let mut state = self.begin(MockCall::DeleteIssue(id.to_string())).await?;
        let before = state.data.issues.len();
        state.data.issues.retain(|i| i.id != id);
        if state.data.issues.len() == before {
            return Err(LinearKanbanError::not_found("Issue", id));
        }
        Ok(())
    }

    async fn workflow_state(&self, id: &str) -> Result<WorkflowState> {
        let state = self.begin(MockCall::WorkflowState(id.to_string())).await?;
        state
            .data
            .states
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| LinearKanbanError::not_found("WorkflowState", id))
    }

    async fn user(&self, id: &str) -> Result<User> {
        let state = self.begin(MockCall::User(id.to_string())).await?;
        state
            .data
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| LinearKanbanError::not_found("User", id))
    }

    async fn users(&self) -> Result<Vec<User>> {
        let state = self.begin(MockCall::Users).await?;
        Ok(state.data.users.clone())
    }

    async fn create_comment(&self, input: CommentCreateInput) -> Result<Option<Comment>> {
        let mut state = self.begin(MockCall::CreateComment(input.clone())).await?;
        state.require_issue(&input.issue_id)?;

        let comment = Comment {
            id: state.next_id("comment"),
            body: input.body,
            created_at: Utc::now(),
            issue_id: Some(input.issue_id),
        };
        state.data.comments.push(comment.clone());

        Ok((!state.omit_created).then_some(comment))
    }

    async fn create_project_update(
        &self,
        input: ProjectUpdateCreateInput,
    ) -> Result<Option<ProjectUpdate>> {
        let mut state = self
            .begin(MockCall::CreateProjectUpdate(input.clone()))
            .await?;
        state.require_project(&input.project_id)?;

        let id = state.next_id("update");
        let update = ProjectUpdate {
            url: format!("https://linear.app/project-update/{id}"),
            id,
            body: input.body,
            health: input.health,
            created_at: Utc::now(),
            user_id: None,
            project_id: Some(input.project_id),
        };
        state.data.project_updates.push(update.clone());

        Ok((!state.omit_created).then_some(update))
    }

    async fn project_milestone(&self, id: &str) -> Result<ProjectMilestone> {
        let state = self
            .begin(MockCall::ProjectMilestone(id.to_string()))
            .await?;
        state.require_milestone(id).cloned()
    }

    async fn milestone_issues(&self, milestone_id: &str, first: usize) -> Result<Vec<Issue>> {
        let state = self
            .begin(MockCall::MilestoneIssues {
                milestone_id: milestone_id.to_string(),
                first,
            })
            .await?;
        state.require_milestone(milestone_id)?;
        Ok(state
            .data
            .issues
            .iter()
            .filter(|i| i.project_milestone_id.as_deref() == Some(milestone_id))
            .take(first)
            .cloned()
            .collect())
    }

    async fn create_project_milestone(
        &self,
        input: ProjectMilestoneCreateInput,
    ) -> Result<Option<ProjectMilestone>> {
        let mut state = self
            .begin(MockCall::CreateProjectMilestone(input.clone()))
            .await?;
        state.require_project(&input.project_id)?;

        let mut milestone =
            ProjectMilestone::new(state.next_id("milestone"), input.name, input.project_id);
        milestone.description = input.description;
        milestone.target_date = input.target_date;
        milestone.sort_order = input.sort_order.unwrap_or_default();
        milestone.created_at = Utc::now();
        milestone.updated_at = milestone.created_at;
        state.data.milestones.push(milestone.clone());

        Ok((!state.omit_created).then_some(milestone))
    }

    async fn update_project_milestone(
        &self,
        id: &str,
        input: ProjectMilestoneUpdateInput,
    ) -> Result<()> {
        let mut state = self
            .begin(MockCall::UpdateProjectMilestone {
                id: id.to_string(),
                input: input.clone(),
            })
            .await?;
        let milestone = state
            .data
            .milestones
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| LinearKanbanError::not_found("ProjectMilestone", id))?;

        if let Some(name) = input.name {
            milestone.name = name;
        }
        if let Some(description) = input.description {
            milestone.description = description;
        }
        if let Some(target_date) = input.target_date {
            milestone.target_date = target_date;
        }
        if let Some(sort_order) = input.sort_order {
            milestone.sort_order = sort_order;
        }
        milestone.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_project_milestone(&self, id: &str) -> Result<()> {
        let mut state = self
            .begin(MockCall::DeleteProjectMilestone(id.to_string()))
            .await?;
        state.require_milestone(id)?;
        state.data.milestones.retain(|m| m.id != id);
        for issue in state
            .data
            .issues
            .iter_mut()
            .filter(|i| i.project_milestone_id.as_deref() == Some(id))
        {
            issue.project_milestone_id = None;
        }
        Ok(())
    }
}
