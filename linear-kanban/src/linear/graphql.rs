//! [`LinearApi`] over Linear's GraphQL HTTP endpoint

use crate::config::Config;
use crate::error::{LinearKanbanError, Result};
use crate::linear::client::LinearApi;
use crate::linear::model::*;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

const TEAM_FIELDS: &str = "id name key description";
const PROJECT_FIELDS: &str =
    "id name description state progress health targetDate startDate url lead { id } createdAt updatedAt";
const ISSUE_FIELDS: &str = "id identifier title description priority priorityLabel url \
     state { id } assignee { id } project { id } team { id } projectMilestone { id } \
     createdAt updatedAt";
const STATE_FIELDS: &str = "id name type position color team { id }";
const USER_FIELDS: &str = "id name email displayName active";
const COMMENT_FIELDS: &str = "id body createdAt issue { id }";
const UPDATE_FIELDS: &str = "id body health createdAt url user { id } project { id }";
const MILESTONE_FIELDS: &str =
    "id name description targetDate sortOrder project { id } createdAt updatedAt";

/// Linear client speaking GraphQL over reqwest
///
/// Authenticates with a personal API key sent verbatim in the
/// `Authorization` header. Without a key every call fails with
/// [`LinearKanbanError::MissingApiKey`] before touching the network.
#[derive(Debug, Clone)]
pub struct GraphqlLinearClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GraphqlLinearClient {
    /// Create a client for an endpoint
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| LinearKanbanError::Config(e.to_string()))?;
        if !config.has_api_key() {
            warn!("LINEAR_API_KEY is not set; every Linear call will fail until it is");
        }
        Ok(Self::new(config.api_url.clone(), config.api_key.clone()))
    }

    /// The GraphQL endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a query and deserialize its `data`
    ///
    /// `subject` names the entity a single-entity lookup is about, so that
    /// upstream "not found" errors become [`LinearKanbanError::NotFound`].
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        subject: Option<(&str, &str)>,
    ) -> Result<T> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LinearKanbanError::MissingApiKey)?;

        debug!("Linear GraphQL request: {}", first_line(query));
        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", api_key)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: GraphqlResponse<T> = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(LinearKanbanError::Upstream(format!(
                    "Linear API returned {status}"
                )))
            }
        };

        if let Some(error) = parsed.errors.and_then(|errors| errors.into_iter().next()) {
            warn!("Linear GraphQL error: {}", error.message);
            return Err(classify_error(error, subject));
        }
        if !status.is_success() {
            return Err(LinearKanbanError::Upstream(format!(
                "Linear API returned {status}"
            )));
        }

        parsed.data.ok_or_else(|| {
            LinearKanbanError::Upstream("Linear API returned no data".to_string())
        })
    }

    async fn fetch_node<N: DeserializeOwned>(
        &self,
        field: &str,
        entity: &str,
        id: &str,
        query: String,
    ) -> Result<N> {
        let mut data: serde_json::Map<String, Value> = self
            .execute(&query, json!({ "id": id }), Some((entity, id)))
            .await?;
        match data.remove(field) {
            Some(Value::Null) | None => Err(LinearKanbanError::not_found(entity, id)),
            Some(node) => Ok(serde_json::from_value(node)?),
        }
    }
}

fn first_line(query: &str) -> &str {
    query.lines().next().unwrap_or_default()
}

fn classify_error(error: GraphqlError, subject: Option<(&str, &str)>) -> LinearKanbanError {
    let presentable = error
        .extensions
        .as_ref()
        .and_then(|ext| ext.get("userPresentableMessage"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let is_not_found = std::iter::once(error.message.as_str())
        .chain(presentable.as_deref())
        .any(|m| m.to_lowercase().contains("not found"));

    match subject {
        Some((entity, id)) if is_not_found => LinearKanbanError::not_found(entity, id),
        _ => LinearKanbanError::Upstream(presentable.unwrap_or(error.message)),
    }
}

fn check_success(operation: &str, success: bool) -> Result<()> {
    if success {
        Ok(())
    } else {
        Err(LinearKanbanError::Upstream(format!(
            "{operation} was not successful"
        )))
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
    extensions: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct IdRef {
    id: String,
}

fn id_of(r: Option<IdRef>) -> Option<String> {
    r.map(|r| r.id)
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectNode {
    id: String,
    name: String,
    description: Option<String>,
    state: String,
    progress: f64,
    health: Option<ProjectHealth>,
    target_date: Option<NaiveDate>,
    start_date: Option<NaiveDate>,
    url: String,
    lead: Option<IdRef>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProjectNode> for Project {
    fn from(n: ProjectNode) -> Self {
        Project {
            id: n.id,
            name: n.name,
            description: n.description,
            state: n.state,
            progress: n.progress,
            health: n.health,
            target_date: n.target_date,
            start_date: n.start_date,
            url: n.url,
            lead_id: id_of(n.lead),
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueNode {
    id: String,
    identifier: String,
    title: String,
    description: Option<String>,
    priority: f64,
    priority_label: String,
    url: String,
    state: Option<IdRef>,
    assignee: Option<IdRef>,
    project: Option<IdRef>,
    team: Option<IdRef>,
    project_milestone: Option<IdRef>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<IssueNode> for Issue {
    fn from(n: IssueNode) -> Self {
        Issue {
            id: n.id,
            identifier: n.identifier,
            title: n.title,
            description: n.description,
            priority: n.priority as i64,
            priority_label: n.priority_label,
            url: n.url,
            state_id: id_of(n.state),
            assignee_id: id_of(n.assignee),
            project_id: id_of(n.project),
            team_id: id_of(n.team),
            project_milestone_id: id_of(n.project_milestone),
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateNode {
    id: String,
    name: String,
    #[serde(rename = "type")]
    state_type: String,
    position: f64,
    color: String,
    team: Option<IdRef>,
}

impl From<StateNode> for WorkflowState {
    fn from(n: StateNode) -> Self {
        WorkflowState {
            id: n.id,
            name: n.name,
            state_type: n.state_type,
            position: n.position,
            color: n.color,
            team_id: id_of(n.team),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentNode {
    id: String,
    body: String,
    created_at: DateTime<Utc>,
    issue: Option<IdRef>,
}

impl From<CommentNode> for Comment {
    fn from(n: CommentNode) -> Self {
        Comment {
            id: n.id,
            body: n.body,
            created_at: n.created_at,
            issue_id: id_of(n.issue),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateNode {
    id: String,
    body: String,
    health: Option<ProjectHealth>,
    created_at: DateTime<Utc>,
    url: String,
    user: Option<IdRef>,
    project: Option<IdRef>,
}

impl From<UpdateNode> for ProjectUpdate {
    fn from(n: UpdateNode) -> Self {
        ProjectUpdate {
            id: n.id,
            body: n.body,
            health: n.health,
            created_at: n.created_at,
            url: n.url,
            user_id: id_of(n.user),
            project_id: id_of(n.project),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MilestoneNode {
    id: String,
    name: String,
    description: Option<String>,
    target_date: Option<NaiveDate>,
    sort_order: f64,
    project: Option<IdRef>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MilestoneNode> for ProjectMilestone {
    fn from(n: MilestoneNode) -> Self {
        ProjectMilestone {
            id: n.id,
            name: n.name,
            description: n.description,
            target_date: n.target_date,
            sort_order: n.sort_order,
            project_id: id_of(n.project),
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

/// `{ <field>: { nodes: [...] } }`
#[derive(Debug, Deserialize)]
struct Nodes<T> {
    #[serde(flatten)]
    inner: std::collections::HashMap<String, Connection<T>>,
}

impl<T> Nodes<T> {
    fn take(mut self, field: &str) -> Vec<T> {
        self.inner
            .remove(field)
            .map(|c| c.nodes)
            .unwrap_or_default()
    }
}

/// Mutation payload `{ success, <entity>? }`
#[derive(Debug, Deserialize)]
struct Payload<T> {
    success: bool,
    #[serde(flatten)]
    entity: std::collections::HashMap<String, Option<T>>,
}

impl<T> Payload<T> {
    fn into_entity(mut self, operation: &str, field: &str) -> Result<Option<T>> {
        check_success(operation, self.success)?;
        Ok(self.entity.remove(field).flatten())
    }
}

#[derive(Debug, Deserialize)]
struct SuccessOnly {
    success: bool,
}

fn nested_nodes<T: DeserializeOwned>(
    mut data: serde_json::Map<String, Value>,
    parent: &str,
    field: &str,
    entity: &str,
    id: &str,
) -> Result<Vec<T>> {
    let node = match data.remove(parent) {
        Some(Value::Null) | None => return Err(LinearKanbanError::not_found(entity, id)),
        Some(node) => node,
    };
    let nodes: Nodes<T> = serde_json::from_value(node)?;
    Ok(nodes.take(field))
}

#[async_trait]
impl LinearApi for GraphqlLinearClient {
    async fn teams(&self) -> Result<Vec<Team>> {
        let query = format!("query Teams {{ teams {{ nodes {{ {TEAM_FIELDS} }} }} }}");
        let data: Nodes<Team> = self.execute(&query, json!({}), None).await?;
        Ok(data.take("teams"))
    }

    async fn team(&self, id: &str) -> Result<Team> {
        let query = format!("query Team($id: String!) {{ team(id: $id) {{ {TEAM_FIELDS} }} }}");
        self.fetch_node("team", "Team", id, query).await
    }

    async fn team_states(&self, team_id: &str) -> Result<Vec<WorkflowState>> {
        let query = format!(
            "query TeamStates($id: String!) {{ team(id: $id) {{ states {{ nodes {{ {STATE_FIELDS} }} }} }} }}"
        );
        let data = self
            .execute(&query, json!({ "id": team_id }), Some(("Team", team_id)))
            .await?;
        let nodes: Vec<StateNode> = nested_nodes(data, "team", "states", "Team", team_id)?;
        Ok(nodes.into_iter().map(Into::into).collect())
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        let query = format!("query Projects {{ projects {{ nodes {{ {PROJECT_FIELDS} }} }} }}");
        let data: Nodes<ProjectNode> = self.execute(&query, json!({}), None).await?;
        Ok(data.take("projects").into_iter().map(Into::into).collect())
    }

    async fn project(&self, id: &str) -> Result<Project> {
        let query =
            format!("query Project($id: String!) {{ project(id: $id) {{ {PROJECT_FIELDS} }} }}");
        let node: ProjectNode = self.fetch_node("project", "Project", id, query).await?;
        Ok(node.into())
    }

    async fn create_project(&self, input: ProjectCreateInput) -> Result<Option<Project>> {
        let query = format!(
            "mutation ProjectCreate($input: ProjectCreateInput!) {{ projectCreate(input: $input) {{ success project {{ {PROJECT_FIELDS} }} }} }}"
        );
        let data: std::collections::HashMap<String, Payload<ProjectNode>> = self
            .execute(&query, json!({ "input": input }), None)
            .await?;
        payload_entity(data, "projectCreate", "project").map(|p| p.map(Into::into))
    }

    async fn project_issues(&self, project_id: &str, first: usize) -> Result<Vec<Issue>> {
        let query = format!(
            "query ProjectIssues($id: String!, $first: Int!) {{ project(id: $id) {{ issues(first: $first) {{ nodes {{ {ISSUE_FIELDS} }} }} }} }}"
        );
        let data = self
            .execute(
                &query,
                json!({ "id": project_id, "first": first }),
                Some(("Project", project_id)),
            )
            .await?;
        let nodes: Vec<IssueNode> = nested_nodes(data, "project", "issues", "Project", project_id)?;
        Ok(nodes.into_iter().map(Into::into).collect())
    }

    async fn project_updates(
        &self,
        project_id: &str,
        first: usize,
    ) -> Result<Vec<ProjectUpdate>> {
        let query = format!(
            "query ProjectUpdates($id: String!, $first: Int!) {{ project(id: $id) {{ projectUpdates(first: $first) {{ nodes {{ {UPDATE_FIELDS} }} }} }} }}"
        );
        let data = self
            .execute(
                &query,
                json!({ "id": project_id, "first": first }),
                Some(("Project", project_id)),
            )
            .await?;
        let nodes: Vec<UpdateNode> =
            nested_nodes(data, "project", "projectUpdates", "Project", project_id)?;
        Ok(nodes.into_iter().map(Into::into).collect())
    }

    async fn project_milestones(
        &self,
        project_id: Option<&str>,
        first: usize,
    ) -> Result<Vec<ProjectMilestone>> {
        let nodes: Vec<MilestoneNode> = match project_id {
            Some(project_id) => {
                let query = format!(
                    "query ProjectMilestonesOf($id: String!, $first: Int!) {{ project(id: $id) {{ projectMilestones(first: $first) {{ nodes {{ {MILESTONE_FIELDS} }} }} }} }}"
                );
                let data = self
                    .execute(
                        &query,
                        json!({ "id": project_id, "first": first }),
                        Some(("Project", project_id)),
                    )
                    .await?;
                nested_nodes(data, "project", "projectMilestones", "Project", project_id)?
            }
            None => {
                let query = format!(
                    "query ProjectMilestones($first: Int!) {{ projectMilestones(first: $first) {{ nodes {{ {MILESTONE_FIELDS} }} }} }}"
                );
                let data: Nodes<MilestoneNode> = self
                    .execute(&query, json!({ "first": first }), None)
                    .await?;
                data.take("projectMilestones")
            }
        };
        Ok(nodes.into_iter().map(Into::into).collect())
    }

    async fn issues(&self, first: usize) -> Result<Vec<Issue>> {
        let query = format!(
            "query Issues($first: Int!) {{ issues(first: $first) {{ nodes {{ {ISSUE_FIELDS} }} }} }}"
        );
        let data: Nodes<IssueNode> = self.execute(&query, json!({ "first": first }), None).await?;
        Ok(data.take("issues").into_iter().map(Into::into).collect())
    }

    async fn issue(&self, id: &str) -> Result<Issue> {
        let query = format!("query Issue($id: String!) {{ issue(id: $id) {{ {ISSUE_FIELDS} }} }}");
        let node: IssueNode = self.fetch_node("issue", "Issue", id, query).await?;
        Ok(node.into())
    }

    async fn search_issues(&self, query_text: &str, first: usize) -> Result<Vec<Issue>> {
        let query = format!(
            "query SearchIssues($term: String!, $first: Int!) {{ searchIssues(term: $term, first: $first) {{ nodes {{ {ISSUE_FIELDS} }} }} }}"
        );
        let data: Nodes<IssueNode> = self
            .execute(&query, json!({ "term": query_text, "first": first }), None)
            .await?;
        Ok(data.take("searchIssues").into_iter().map(Into::into).collect())
    }

    async fn issue_comments(&self, issue_id: &str) -> Result<Vec<Comment>> {
        let query = format!(
            "query IssueComments($id: String!) {{ issue(id: $id) {{ comments {{ nodes {{ {COMMENT_FIELDS} }} }} }} }}"
        );
        let data = self
            .execute(&query, json!({ "id": issue_id }), Some(("Issue", issue_id)))
            .await?;
        let nodes: Vec<CommentNode> = nested_nodes(data, "issue", "comments", "Issue", issue_id)?;
        Ok(nodes.into_iter().map(Into::into).collect())
    }

    async fn create_issue(&self, input: IssueCreateInput) -> Result<Option<Issue>> {
        let query = format!(
            "mutation IssueCreate($input: IssueCreateInput!) {{ issueCreate(input: $input) {{ success issue {{ {ISSUE_FIELDS} }} }} }}"
        );
        let data: std::collections::HashMap<String, Payload<IssueNode>> = self
            .execute(&query, json!({ "input": input }), None)
            .await?;
        payload_entity(data, "issueCreate", "issue").map(|i| i.map(Into::into))
    }

    async fn update_issue(&self, id: &str, input: IssueUpdateInput) -> Result<()> {
        let query = "mutation IssueUpdate($id: String!, $input: IssueUpdateInput!) { issueUpdate(id: $id, input: $input) { success } }";
        let data: std::collections::HashMap<String, SuccessOnly> = self
            .execute(query, json!({ "id": id, "input": input }), Some(("Issue", id)))
            .await?;
        payload_success(data, "issueUpdate")
    }

    async fn delete_issue(&self, id: &str) -> Result<()> {
        let query = "mutation IssueDelete($id: String!) { issueDelete(id: $id) { success } }";
        let data: std::collections::HashMap<String, SuccessOnly> = self
            .execute(query, json!({ "id": id }), Some(("Issue", id)))
            .await?;
        payload_success(data, "issueDelete")
    }

    async fn workflow_state(&self, id: &str) -> Result<WorkflowState> {
        let query = format!(
            "query WorkflowState($id: String!) {{ workflowState(id: $id) {{ {STATE_FIELDS} }} }}"
        );
        let node: StateNode = self
            .fetch_node("workflowState", "WorkflowState", id, query)
            .await?;
        Ok(node.into())
    }

    async fn user(&self, id: &str) -> Result<User> {
        let query = format!("query User($id: String!) {{ user(id: $id) {{ {USER_FIELDS} }} }}");
        self.fetch_node("user", "User", id, query).await
    }

    async fn users(&self) -> Result<Vec<User>> {
        let query = format!("query Users {{ users {{ nodes {{ {USER_FIELDS} }} }} }}");
        let data: Nodes<User> = self.execute(&query, json!({}), None).await?;
        Ok(data.take("users"))
    }

    async fn create_comment(&self, input: CommentCreateInput) -> Result<Option<Comment>> {
        let query = format!(
            "mutation CommentCreate($input: CommentCreateInput!) {{ commentCreate(input: $input) {{ success comment {{ {COMMENT_FIELDS} }} }} }}"
        );
        let data: std::collections::HashMap<String, Payload<CommentNode>> = self
            .execute(&query, json!({ "input": input }), None)
            .await?;
        payload_entity(data, "commentCreate", "comment").map(|c| c.map(Into::into))
    }

    async fn create_project_update(
        &self,
        input: ProjectUpdateCreateInput,
    ) -> Result<Option<ProjectUpdate>> {
        let query = format!(
            "mutation ProjectUpdateCreate($input: ProjectUpdateCreateInput!) {{ projectUpdateCreate(input: $input) {{ success projectUpdate {{ {UPDATE_FIELDS} }} }} }}"
        );
        let data: std::collections::HashMap<String, Payload<UpdateNode>> = self
            .execute(&query, json!({ "input": input }), None)
            .await?;
        payload_entity(data, "projectUpdateCreate", "projectUpdate").map(|u| u.map(Into::into))
    }

    async fn project_milestone(&self, id: &str) -> Result<ProjectMilestone> {
        let query = format!(
            "query ProjectMilestone($id: String!) {{ projectMilestone(id: $id) {{ {MILESTONE_FIELDS} }} }}"
        );
        let node: MilestoneNode = self
            .fetch_node("projectMilestone", "ProjectMilestone", id, query)
            .await?;
        Ok(node.into())
    }

    async fn milestone_issues(&self, milestone_id: &str, first: usize) -> Result<Vec<Issue>> {
        let query = format!(
            "query MilestoneIssues($id: String!, $first: Int!) {{ projectMilestone(id: $id) {{ issues(first: $first) {{ nodes {{ {ISSUE_FIELDS} }} }} }} }}"
        );
        let data = self
            .execute(
                &query,
                json!({ "id": milestone_id, "first": first }),
                Some(("ProjectMilestone", milestone_id)),
            )
            .await?;
        let nodes: Vec<IssueNode> = nested_nodes(
            data,
            "projectMilestone",
            "issues",
            "ProjectMilestone",
            milestone_id,
        )?;
        Ok(nodes.into_iter().map(Into::into).collect())
    }

    async fn create_project_milestone(
        &self,
        input: ProjectMilestoneCreateInput,
    ) -> Result<Option<ProjectMilestone>> {
        let query = format!(
            "mutation ProjectMilestoneCreate($input: ProjectMilestoneCreateInput!) {{ projectMilestoneCreate(input: $input) {{ success projectMilestone {{ {MILESTONE_FIELDS} }} }} }}"
        );
        let data: std::collections::HashMap<String, Payload<MilestoneNode>> = self
            .execute(&query, json!({ "input": input }), None)
            .await?;
        payload_entity(data, "projectMilestoneCreate", "projectMilestone")
            .map(|m| m.map(Into::into))
    }

    async fn update_project_milestone(
        &self,
        id: &str,
        input: ProjectMilestoneUpdateInput,
    ) -> Result<()> {
        let query = "mutation ProjectMilestoneUpdate($id: String!, $input: ProjectMilestoneUpdateInput!) { projectMilestoneUpdate(id: $id, input: $input) { success } }";
        let data: std::collections::HashMap<String, SuccessOnly> = self
            .execute(
                query,
                json!({ "id": id, "input": input }),
                Some(("ProjectMilestone", id)),
            )
            .await?;
        payload_success(data, "projectMilestoneUpdate")
    }

    async fn delete_project_milestone(&self, id: &str) -> Result<()> {
        let query = "mutation ProjectMilestoneDelete($id: String!) { projectMilestoneDelete(id: $id) { success } }";
        let data: std::collections::HashMap<String, SuccessOnly> = self
            .execute(query, json!({ "id": id }), Some(("ProjectMilestone", id)))
            .await?;
        payload_success(data, "projectMilestoneDelete")
    }
}

fn payload_entity<T>(
    mut data: std::collections::HashMap<String, Payload<T>>,
    operation: &str,
    field: &str,
) -> Result<Option<T>> {
    match data.remove(operation) {
        Some(payload) => payload.into_entity(operation, field),
        None => Err(LinearKanbanError::Upstream(format!(
            "{operation} returned no payload"
        ))),
    }
}

fn payload_success(
    mut data: std::collections::HashMap<String, SuccessOnly>,
    operation: &str,
) -> Result<()> {
    match data.remove(operation) {
        Some(payload) => check_success(operation, payload.success),
        None => Err(LinearKanbanError::Upstream(format!(
            "{operation} returned no payload"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found_with_subject() {
        let error = GraphqlError {
            message: "Entity not found: Issue".to_string(),
            extensions: None,
        };
        let classified = classify_error(error, Some(("Issue", "abc")));
        assert!(matches!(
            classified,
            LinearKanbanError::NotFound { ref entity, ref id } if entity == "Issue" && id == "abc"
        ));
    }

    #[test]
    fn test_classify_prefers_user_presentable_message() {
        let error = GraphqlError {
            message: "Argument Validation Error".to_string(),
            extensions: Some(json!({ "userPresentableMessage": "Title is too long" })),
        };
        let classified = classify_error(error, None);
        assert_eq!(classified.to_string(), "Title is too long");
    }

    #[test]
    fn test_classify_not_found_behind_presentable_message() {
        let error = GraphqlError {
            message: "Entity not found".to_string(),
            extensions: Some(json!({
                "userPresentableMessage": "Could not find referenced Issue."
            })),
        };
        let classified = classify_error(error, Some(("Issue", "nope")));
        assert!(classified.is_not_found());
        assert_eq!(classified.to_string(), "Issue not found: nope");
    }

    #[test]
    fn test_not_found_without_subject_stays_upstream() {
        let error = GraphqlError {
            message: "Entity not found".to_string(),
            extensions: None,
        };
        assert!(matches!(
            classify_error(error, None),
            LinearKanbanError::Upstream(_)
        ));
    }

    #[test]
    fn test_issue_node_conversion() {
        let node: IssueNode = serde_json::from_value(json!({
            "id": "i1",
            "identifier": "ENG-1",
            "title": "Fix",
            "description": null,
            "priority": 2.0,
            "priorityLabel": "High",
            "url": "https://linear.app/x/issue/ENG-1",
            "state": { "id": "s1" },
            "assignee": null,
            "project": null,
            "team": { "id": "t1" },
            "projectMilestone": null,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-02T00:00:00.000Z"
        }))
        .unwrap();
        let issue: Issue = node.into();
        assert_eq!(issue.priority, 2);
        assert_eq!(issue.state_id.as_deref(), Some("s1"));
        assert_eq!(issue.team_id.as_deref(), Some("t1"));
        assert_eq!(issue.assignee_id, None);
    }

    #[test]
    fn test_payload_failure_is_upstream_error() {
        let data: std::collections::HashMap<String, Payload<CommentNode>> =
            serde_json::from_value(json!({
                "commentCreate": { "success": false, "comment": null }
            }))
            .unwrap();
        let err = payload_entity(data, "commentCreate", "comment").unwrap_err();
        assert_eq!(err.to_string(), "commentCreate was not successful");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let client = GraphqlLinearClient::new("http://127.0.0.1:9/graphql", None);
        let err = client.teams().await.unwrap_err();
        assert!(matches!(err, LinearKanbanError::MissingApiKey));
    }
}
