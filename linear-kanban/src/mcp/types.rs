//! Request types bound from tool argument bags, and the mutation payloads
//! built from them

use crate::error::{LinearKanbanError, Result};
use crate::linear::model::*;
use chrono::{DateTime, NaiveDate};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Fail with [`LinearKanbanError::MissingArgument`] for the first required
/// field that is absent or null
pub fn require_fields(arguments: &Map<String, Value>, required: &[&str]) -> Result<()> {
    match required
        .iter()
        .find(|field| matches!(arguments.get(**field), None | Some(Value::Null)))
    {
        Some(field) => Err(LinearKanbanError::missing(*field)),
        None => Ok(()),
    }
}

/// Bind an argument bag to a request type
///
/// Undeclared fields are ignored. Fields of the wrong JSON type fail with
/// [`LinearKanbanError::InvalidArguments`].
pub fn bind_arguments<T: DeserializeOwned>(arguments: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(arguments)).map_err(|e| {
        let message = e.to_string();
        match message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            Some(field) => LinearKanbanError::missing(field),
            None => LinearKanbanError::InvalidArguments(message),
        }
    })
}

/// `Some(s)` only when `s` is non-empty
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Parse `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| {
            LinearKanbanError::InvalidArguments(format!(
                "{field} must be an ISO 8601 date, e.g. '2024-12-31'"
            ))
        })
}

fn parse_optional_date(field: &str, value: Option<String>) -> Result<Option<NaiveDate>> {
    non_empty(value)
        .map(|v| parse_date(field, &v))
        .transpose()
}

/// Deserialize a field that distinguishes absent (`None`), `null`
/// (`Some(None)`) and a value (`Some(Some(v))`); pair with `#[serde(default)]`
pub fn double_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn whole_number<E: de::Error>(value: f64, what: &str) -> std::result::Result<i64, E> {
    if value.is_finite() && value.fract() == 0.0 {
        Ok(value as i64)
    } else {
        Err(E::custom(format!("{what} must be a whole number, got {value}")))
    }
}

/// Optional integer that also accepts integral floats such as `2.0`
pub fn optional_integer<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(v) => whole_number(v, "value").map(Some),
        None => Ok(None),
    }
}

/// Optional non-negative count such as a `limit`
pub fn optional_count<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(v) => {
            let n = whole_number::<D::Error>(v, "limit")?;
            usize::try_from(n)
                .map(Some)
                .map_err(|_| de::Error::custom(format!("limit must not be negative, got {n}")))
        }
        None => Ok(None),
    }
}

/// Request for `get_team`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTeamRequest {
    /// Team to fetch
    pub team_id: String,
}

/// Request for `get_project`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectRequest {
    /// Project to fetch
    pub project_id: String,
}

/// Request for `create_project`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Display name
    pub name: String,
    /// Teams the project belongs to
    pub team_ids: Vec<String>,
    /// Optional description
    pub description: Option<String>,
    /// Optional planned completion date
    pub target_date: Option<String>,
    /// Optional planned start date
    pub start_date: Option<String>,
}

impl CreateProjectRequest {
    /// Build the `projectCreate` payload
    pub fn into_input(self) -> Result<ProjectCreateInput> {
        if self.team_ids.is_empty() {
            return Err(LinearKanbanError::InvalidArguments(
                "teamIds must name at least one team".to_string(),
            ));
        }
        Ok(ProjectCreateInput {
            name: self.name,
            team_ids: self.team_ids,
            description: non_empty(self.description),
            target_date: parse_optional_date("targetDate", self.target_date)?,
            start_date: parse_optional_date("startDate", self.start_date)?,
        })
    }
}

/// Request for `list_issues`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIssuesRequest {
    /// Restrict to one project
    pub project_id: Option<String>,
    /// Maximum number of issues
    #[serde(default, deserialize_with = "optional_count")]
    pub limit: Option<usize>,
}

/// Request for `get_issue`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetIssueRequest {
    /// Issue to fetch
    pub issue_id: String,
}

/// Request for `list_workflow_states`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkflowStatesRequest {
    /// Team whose states to list; the first team when absent
    pub team_id: Option<String>,
}

/// Request for `create_issue`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    /// Title
    pub title: String,
    /// Team to create the issue in
    pub team_id: String,
    /// Markdown description
    pub description: Option<String>,
    /// Project to associate
    pub project_id: Option<String>,
    /// Initial workflow state
    pub state_id: Option<String>,
    /// Priority 0-4
    #[serde(default, deserialize_with = "optional_integer")]
    pub priority: Option<i64>,
    /// User to assign
    pub assignee_id: Option<String>,
    /// Milestone to attach
    pub milestone_id: Option<String>,
}

impl From<CreateIssueRequest> for IssueCreateInput {
    fn from(r: CreateIssueRequest) -> Self {
        IssueCreateInput {
            title: r.title,
            team_id: r.team_id,
            description: non_empty(r.description),
            project_id: non_empty(r.project_id),
            state_id: non_empty(r.state_id),
            priority: r.priority,
            assignee_id: non_empty(r.assignee_id),
            project_milestone_id: non_empty(r.milestone_id),
        }
    }
}

/// Request for `update_issue`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueRequest {
    /// Issue to update
    pub issue_id: String,
    /// New title
    pub title: Option<String>,
    /// New description; null clears it
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    /// New workflow state
    pub state_id: Option<String>,
    /// New priority
    #[serde(default, deserialize_with = "optional_integer")]
    pub priority: Option<i64>,
    /// New assignee
    pub assignee_id: Option<String>,
    /// New milestone; null detaches the issue
    #[serde(default, deserialize_with = "double_option")]
    pub milestone_id: Option<Option<String>>,
}

impl UpdateIssueRequest {
    /// Split into the issue id and the `issueUpdate` payload
    pub fn into_parts(self) -> (String, IssueUpdateInput) {
        let input = IssueUpdateInput {
            title: non_empty(self.title),
            description: self.description,
            state_id: non_empty(self.state_id),
            priority: self.priority,
            assignee_id: non_empty(self.assignee_id),
            project_milestone_id: self.milestone_id,
        };
        (self.issue_id, input)
    }
}

/// Request for `move_issue`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveIssueRequest {
    /// Issue to move
    pub issue_id: String,
    /// Target state id; wins over `state_name`
    pub state_id: Option<String>,
    /// Target state name, matched case-insensitively
    pub state_name: Option<String>,
}

/// Request for `delete_issue`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteIssueRequest {
    /// Issue to delete
    pub issue_id: String,
}

/// Request for `add_comment`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    /// Issue to comment on
    pub issue_id: String,
    /// Markdown body
    pub body: String,
}

/// Request for `search_issues`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIssuesRequest {
    /// Search text
    pub query: String,
    /// Maximum number of hits
    #[serde(default, deserialize_with = "optional_count")]
    pub limit: Option<usize>,
}

/// Request for `create_project_update`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectUpdateRequest {
    /// Project to post on
    pub project_id: String,
    /// Markdown body
    pub body: String,
    /// `onTrack`, `atRisk` or `offTrack`
    pub health: Option<String>,
}

impl CreateProjectUpdateRequest {
    /// Build the `projectUpdateCreate` payload
    pub fn into_input(self) -> Result<ProjectUpdateCreateInput> {
        let health = non_empty(self.health)
            .map(|h| ProjectHealth::from_str(&h).map_err(LinearKanbanError::InvalidArguments))
            .transpose()?;
        Ok(ProjectUpdateCreateInput {
            project_id: self.project_id,
            body: self.body,
            health,
        })
    }
}

/// Request for `list_project_updates`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectUpdatesRequest {
    /// Project whose updates to list
    pub project_id: String,
    /// Maximum number of updates
    #[serde(default, deserialize_with = "optional_count")]
    pub limit: Option<usize>,
}

/// Request for `list_milestones`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMilestonesRequest {
    /// Restrict to one project
    pub project_id: Option<String>,
    /// Maximum number of milestones
    #[serde(default, deserialize_with = "optional_count")]
    pub limit: Option<usize>,
}

/// Request for `get_milestone`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMilestoneRequest {
    /// Milestone to fetch
    pub milestone_id: String,
}

/// Request for `create_milestone`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMilestoneRequest {
    /// Display name
    pub name: String,
    /// Owning project
    pub project_id: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional target date
    pub target_date: Option<String>,
    /// Optional ordering key
    pub sort_order: Option<f64>,
}

impl CreateMilestoneRequest {
    /// Build the `projectMilestoneCreate` payload
    pub fn into_input(self) -> Result<ProjectMilestoneCreateInput> {
        Ok(ProjectMilestoneCreateInput {
            name: self.name,
            project_id: self.project_id,
            description: non_empty(self.description),
            target_date: parse_optional_date("targetDate", self.target_date)?,
            sort_order: self.sort_order,
        })
    }
}

/// Request for `update_milestone`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMilestoneRequest {
    /// Milestone to update
    pub milestone_id: String,
    /// New name
    pub name: Option<String>,
    /// New description; null clears it
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    /// New target date; null clears it
    #[serde(default, deserialize_with = "double_option")]
    pub target_date: Option<Option<String>>,
    /// New ordering key
    pub sort_order: Option<f64>,
}

impl UpdateMilestoneRequest {
    /// Split into the milestone id and the `projectMilestoneUpdate` payload
    pub fn into_parts(self) -> Result<(String, ProjectMilestoneUpdateInput)> {
        let target_date = match self.target_date {
            None => None,
            Some(None) => Some(None),
            Some(Some(date)) if date.is_empty() => Some(None),
            Some(Some(date)) => Some(Some(parse_date("targetDate", &date)?)),
        };
        let input = ProjectMilestoneUpdateInput {
            name: non_empty(self.name),
            description: self.description,
            target_date,
            sort_order: self.sort_order,
        };
        Ok((self.milestone_id, input))
    }
}

/// Request for `delete_milestone`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMilestoneRequest {
    /// Milestone to delete
    pub milestone_id: String,
}

/// Request for `assign_issue_to_milestone`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignIssueToMilestoneRequest {
    /// Issue to attach or detach
    pub issue_id: String,
    /// Milestone to attach to; absent, null or empty detaches
    pub milestone_id: Option<String>,
}

/// Request for `list_milestone_issues`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMilestoneIssuesRequest {
    /// Milestone whose issues to list
    pub milestone_id: String,
    /// Maximum number of issues
    #[serde(default, deserialize_with = "optional_count")]
    pub limit: Option<usize>,
}
