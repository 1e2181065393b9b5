//! The boundary between the MCP surface and the Linear service

use crate::error::Result;
use crate::linear::model::*;
use async_trait::async_trait;

/// Operations the MCP surface needs from Linear
///
/// One method per upstream query or mutation. Relations are never fetched
/// implicitly: callers resolve them by id through the single-entity getters,
/// usually via [`crate::linear::relations`].
///
/// Mutations that can succeed without returning an entity yield `Ok(None)`.
#[async_trait]
pub trait LinearApi: Send + Sync {
    /// All teams
    async fn teams(&self) -> Result<Vec<Team>>;

    /// A single team
    async fn team(&self, id: &str) -> Result<Team>;

    /// Workflow states of a team, in upstream order
    async fn team_states(&self, team_id: &str) -> Result<Vec<WorkflowState>>;

    /// All projects
    async fn projects(&self) -> Result<Vec<Project>>;

    /// A single project
    async fn project(&self, id: &str) -> Result<Project>;

    /// Create a project
    async fn create_project(&self, input: ProjectCreateInput) -> Result<Option<Project>>;

    /// First `first` issues of a project
    async fn project_issues(&self, project_id: &str, first: usize) -> Result<Vec<Issue>>;

    /// First `first` updates posted on a project
    async fn project_updates(&self, project_id: &str, first: usize)
        -> Result<Vec<ProjectUpdate>>;

    /// First `first` milestones, of one project or of the whole workspace
    async fn project_milestones(
        &self,
        project_id: Option<&str>,
        first: usize,
    ) -> Result<Vec<ProjectMilestone>>;

    /// First `first` issues of the workspace
    async fn issues(&self, first: usize) -> Result<Vec<Issue>>;

    /// A single issue
    async fn issue(&self, id: &str) -> Result<Issue>;

    /// Full-text issue search
    async fn search_issues(&self, query: &str, first: usize) -> Result<Vec<Issue>>;

    /// Comments on an issue
    async fn issue_comments(&self, issue_id: &str) -> Result<Vec<Comment>>;

    /// Create an issue
    async fn create_issue(&self, input: IssueCreateInput) -> Result<Option<Issue>>;

    /// Update an issue
    async fn update_issue(&self, id: &str, input: IssueUpdateInput) -> Result<()>;

    /// Delete (archive) an issue
    async fn delete_issue(&self, id: &str) -> Result<()>;

    /// A single workflow state
    async fn workflow_state(&self, id: &str) -> Result<WorkflowState>;

    /// A single user
    async fn user(&self, id: &str) -> Result<User>;

    /// All users
    async fn users(&self) -> Result<Vec<User>>;

    /// Comment on an issue
    async fn create_comment(&self, input: CommentCreateInput) -> Result<Option<Comment>>;

    /// Post a project update
    async fn create_project_update(
        &self,
        input: ProjectUpdateCreateInput,
    ) -> Result<Option<ProjectUpdate>>;

    /// A single milestone
    async fn project_milestone(&self, id: &str) -> Result<ProjectMilestone>;

    /// First `first` issues attached to a milestone
    async fn milestone_issues(&self, milestone_id: &str, first: usize) -> Result<Vec<Issue>>;

    /// Create a milestone
    async fn create_project_milestone(
        &self,
        input: ProjectMilestoneCreateInput,
    ) -> Result<Option<ProjectMilestone>>;

    /// Update a milestone
    async fn update_project_milestone(
        &self,
        id: &str,
        input: ProjectMilestoneUpdateInput,
    ) -> Result<()>;

    /// Delete a milestone
    async fn delete_project_milestone(&self, id: &str) -> Result<()>;
}
