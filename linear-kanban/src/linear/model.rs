//! Linear domain objects and mutation inputs
//!
//! Entities carry the ids of their relations rather than the related objects;
//! [`crate::linear::relations`] resolves them with explicit client calls.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Linear team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Short key used in issue identifiers, e.g. `ENG`
    pub key: String,
    /// Optional description
    pub description: Option<String>,
}

impl Team {
    /// Create a team with no description
    pub fn new(id: impl Into<String>, name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            key: key.into(),
            description: None,
        }
    }
}

/// Self-reported project status carried by projects and project updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectHealth {
    /// Progressing as planned
    OnTrack,
    /// Likely to slip
    AtRisk,
    /// Behind plan
    OffTrack,
}

impl ProjectHealth {
    /// Wire name of the health value
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectHealth::OnTrack => "onTrack",
            ProjectHealth::AtRisk => "atRisk",
            ProjectHealth::OffTrack => "offTrack",
        }
    }
}

impl fmt::Display for ProjectHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectHealth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onTrack" => Ok(ProjectHealth::OnTrack),
            "atRisk" => Ok(ProjectHealth::AtRisk),
            "offTrack" => Ok(ProjectHealth::OffTrack),
            other => Err(format!(
                "invalid health '{other}', expected one of onTrack, atRisk, offTrack"
            )),
        }
    }
}

/// A Linear project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Lifecycle state, e.g. `planned`, `started`, `completed`
    pub state: String,
    /// Completion ratio between 0 and 1
    pub progress: f64,
    /// Latest reported health
    pub health: Option<ProjectHealth>,
    /// Planned completion date
    pub target_date: Option<NaiveDate>,
    /// Planned start date
    pub start_date: Option<NaiveDate>,
    /// Web URL
    pub url: String,
    /// Id of the project lead
    pub lead_id: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a planned project with no optional data
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            url: format!("https://linear.app/project/{id}"),
            id,
            name: name.into(),
            description: None,
            state: "planned".to_string(),
            progress: 0.0,
            health: None,
            target_date: None,
            start_date: None,
            lead_id: None,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }
}

/// A Linear issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique identifier
    pub id: String,
    /// Human readable identifier, e.g. `ENG-42`
    pub identifier: String,
    /// Title
    pub title: String,
    /// Markdown description
    pub description: Option<String>,
    /// Priority, 0 (none) through 4 (low)
    pub priority: i64,
    /// Priority label, e.g. `Urgent`
    pub priority_label: String,
    /// Web URL
    pub url: String,
    /// Workflow state id
    pub state_id: Option<String>,
    /// Assignee user id
    pub assignee_id: Option<String>,
    /// Project id
    pub project_id: Option<String>,
    /// Team id
    pub team_id: Option<String>,
    /// Project milestone id
    pub project_milestone_id: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Create an unprioritised issue with no relations
    pub fn new(
        id: impl Into<String>,
        identifier: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let identifier = identifier.into();
        Self {
            id: id.into(),
            url: format!("https://linear.app/issue/{identifier}"),
            identifier,
            title: title.into(),
            description: None,
            priority: 0,
            priority_label: priority_label(0).to_string(),
            state_id: None,
            assignee_id: None,
            project_id: None,
            team_id: None,
            project_milestone_id: None,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }
}

/// Label Linear shows for a numeric priority
pub fn priority_label(priority: i64) -> &'static str {
    match priority {
        1 => "Urgent",
        2 => "High",
        3 => "Medium",
        4 => "Low",
        _ => "No priority",
    }
}

/// A column of a team's board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    /// Unique identifier
    pub id: String,
    /// Display name, e.g. `In Progress`
    pub name: String,
    /// Category: `triage`, `backlog`, `unstarted`, `started`, `completed` or `canceled`
    #[serde(rename = "type")]
    pub state_type: String,
    /// Board ordering key
    pub position: f64,
    /// Hex color
    pub color: String,
    /// Owning team id
    pub team_id: Option<String>,
}

impl WorkflowState {
    /// Create a state belonging to a team
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        state_type: impl Into<String>,
        position: f64,
        team_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state_type: state_type.into(),
            position,
            color: "#bec2c8".to_string(),
            team_id: Some(team_id.into()),
        }
    }
}

/// A workspace member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: String,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Short display name
    pub display_name: String,
    /// Whether the account is active
    pub active: bool,
}

impl User {
    /// Create an active user whose display name is the lowercase first name
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            display_name: name
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_lowercase(),
            name,
            email: email.into(),
            active: true,
        }
    }
}

/// A comment on an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier
    pub id: String,
    /// Markdown body
    pub body: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Issue the comment belongs to
    pub issue_id: Option<String>,
}

/// A status post on a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    /// Unique identifier
    pub id: String,
    /// Markdown body
    pub body: String,
    /// Health reported with the update
    pub health: Option<ProjectHealth>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Web URL
    pub url: String,
    /// Author id
    pub user_id: Option<String>,
    /// Project the update belongs to
    pub project_id: Option<String>,
}

/// A named checkpoint inside a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMilestone {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Target date
    pub target_date: Option<NaiveDate>,
    /// Ordering key within the project
    pub sort_order: f64,
    /// Owning project id
    pub project_id: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl ProjectMilestone {
    /// Create a milestone belonging to a project
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            target_date: None,
            sort_order: 0.0,
            project_id: Some(project_id.into()),
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }
}

/// Payload for `issueCreate`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCreateInput {
    /// Title
    pub title: String,
    /// Team the issue is created in
    pub team_id: String,
    /// Markdown description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Project id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Initial workflow state id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    /// Priority 0-4
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Assignee user id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Project milestone id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_milestone_id: Option<String>,
}

/// Payload for `issueUpdate`
///
/// Fields typed `Option<Option<T>>` distinguish "leave unchanged" (`None`)
/// from "clear" (`Some(None)`), which serializes as an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueUpdateInput {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, or null to clear
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New workflow state id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    /// New priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// New assignee user id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// New milestone id, or null to detach
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_milestone_id: Option<Option<String>>,
}

impl IssueUpdateInput {
    /// True when the update changes nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Payload for `commentCreate`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreateInput {
    /// Issue to comment on
    pub issue_id: String,
    /// Markdown body
    pub body: String,
}

/// Payload for `projectCreate`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreateInput {
    /// Display name
    pub name: String,
    /// Teams the project belongs to
    pub team_ids: Vec<String>,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Planned completion date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    /// Planned start date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// Payload for `projectUpdateCreate`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdateCreateInput {
    /// Project the update is posted on
    pub project_id: String,
    /// Markdown body
    pub body: String,
    /// Reported health
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<ProjectHealth>,
}

/// Payload for `projectMilestoneCreate`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMilestoneCreateInput {
    /// Display name
    pub name: String,
    /// Owning project id
    pub project_id: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    /// Ordering key within the project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
}

/// Payload for `projectMilestoneUpdate`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMilestoneUpdateInput {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description, or null to clear
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New target date, or null to clear
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<Option<NaiveDate>>,
    /// New ordering key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
}

impl ProjectMilestoneUpdateInput {
    /// True when the update changes nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
