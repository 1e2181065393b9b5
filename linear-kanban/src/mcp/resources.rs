//! Read-only JSON snapshots addressed by `linear://` URIs
//!
//! Resource contents are the bare pretty-printed JSON array, without a
//! success envelope. Errors propagate to the caller rather than being
//! wrapped.

use super::constants::*;
use super::shaping;
use crate::error::{LinearKanbanError, Result};
use crate::linear::relations::{issue_state, milestones_with_project, updates_with_author};
use crate::linear::LinearApi;
use futures::future::try_join_all;
use rmcp::model::{Annotated, RawResource, Resource};
use serde_json::Value;

/// MIME type of every resource
pub const JSON_MIME_TYPE: &str = "application/json";

/// Static description of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Address, e.g. `linear://teams`
    pub uri: &'static str,
    /// Display name
    pub name: &'static str,
    /// What the snapshot contains
    pub description: &'static str,
}

/// The resource catalog, in listing order
pub const RESOURCES: &[ResourceDescriptor] = &[
    ResourceDescriptor {
        uri: "linear://teams",
        name: "Linear Teams",
        description: "List of all teams in the Linear workspace",
    },
    ResourceDescriptor {
        uri: "linear://projects",
        name: "Linear Projects",
        description: "List of all projects in the Linear workspace",
    },
    ResourceDescriptor {
        uri: "linear://issues",
        name: "Linear Issues",
        description: "List of recent issues in the Linear workspace",
    },
    ResourceDescriptor {
        uri: "linear://workflow-states",
        name: "Workflow States",
        description: "Available workflow states (kanban columns) for organizing issues",
    },
    ResourceDescriptor {
        uri: "linear://project-updates",
        name: "Recent Project Updates",
        description: "Recent project updates across all projects in the workspace",
    },
    ResourceDescriptor {
        uri: "linear://milestones",
        name: "Project Milestones",
        description: "List of all milestones across projects in the workspace",
    },
];

/// The catalog as MCP resources
pub fn list_resources() -> Vec<Resource> {
    RESOURCES
        .iter()
        .map(|descriptor| {
            let mut raw = RawResource::new(descriptor.uri, descriptor.name);
            raw.description = Some(descriptor.description.to_string());
            raw.mime_type = Some(JSON_MIME_TYPE.to_string());
            Annotated::new(raw, None)
        })
        .collect()
}

/// Read a resource and return its JSON text
pub async fn read_resource(api: &dyn LinearApi, uri: &str) -> Result<String> {
    tracing::debug!("Reading resource {}", uri);
    let snapshot = match uri {
        "linear://teams" => teams(api).await?,
        "linear://projects" => projects(api).await?,
        "linear://issues" => issues(api).await?,
        "linear://workflow-states" => workflow_states(api).await?,
        "linear://project-updates" => project_updates(api).await?,
        "linear://milestones" => milestones(api).await?,
        other => return Err(LinearKanbanError::UnknownResource(other.to_string())),
    };
    Ok(serde_json::to_string_pretty(&Value::Array(snapshot))?)
}

async fn teams(api: &dyn LinearApi) -> Result<Vec<Value>> {
    Ok(api.teams().await?.iter().map(shaping::team_summary).collect())
}

async fn projects(api: &dyn LinearApi) -> Result<Vec<Value>> {
    Ok(api
        .projects()
        .await?
        .iter()
        .map(shaping::project_resource_entry)
        .collect())
}

async fn issues(api: &dyn LinearApi) -> Result<Vec<Value>> {
    let issues = api.issues(RESOURCE_ISSUE_COUNT).await?;
    try_join_all(issues.iter().map(|issue| async move {
        let state = issue_state(api, issue).await?;
        Ok::<_, LinearKanbanError>(shaping::issue_resource_entry(issue, state.as_ref()))
    }))
    .await
}

async fn workflow_states(api: &dyn LinearApi) -> Result<Vec<Value>> {
    let team = api
        .teams()
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| LinearKanbanError::TeamNotFound("No team found".into()))?;
    let states = api.team_states(&team.id).await?;
    Ok(shaping::sort_states(states)
        .iter()
        .map(shaping::workflow_state_resource_entry)
        .collect())
}

/// Latest updates of the first few projects, newest first
async fn project_updates(api: &dyn LinearApi) -> Result<Vec<Value>> {
    let projects: Vec<_> = api
        .projects()
        .await?
        .into_iter()
        .take(RESOURCE_UPDATE_PROJECTS)
        .collect();

    let per_project = try_join_all(projects.iter().map(|project| async move {
        let updates = api
            .project_updates(&project.id, RESOURCE_UPDATES_PER_PROJECT)
            .await?;
        let updates = updates_with_author(api, updates).await?;
        Ok::<_, LinearKanbanError>((project, updates))
    }))
    .await?;

    let mut merged: Vec<_> = per_project
        .into_iter()
        .flat_map(|(project, updates)| {
            updates
                .into_iter()
                .map(move |(update, user)| (project, update, user))
        })
        .collect();
    merged.sort_by(|a, b| b.1.created_at.cmp(&a.1.created_at));

    Ok(merged
        .iter()
        .take(RESOURCE_UPDATE_CAP)
        .map(|(project, update, user)| {
            shaping::project_update_resource_entry(
                project,
                update,
                user.as_ref(),
                RESOURCE_TEXT_BUDGET,
            )
        })
        .collect())
}

async fn milestones(api: &dyn LinearApi) -> Result<Vec<Value>> {
    let milestones = api
        .project_milestones(None, RESOURCE_MILESTONE_COUNT)
        .await?;
    Ok(milestones_with_project(api, milestones)
        .await?
        .iter()
        .map(|(milestone, project)| shaping::milestone_resource_entry(milestone, project.as_ref()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_uris_are_unique() {
        let mut uris: Vec<&str> = RESOURCES.iter().map(|r| r.uri).collect();
        uris.sort_unstable();
        uris.dedup();
        assert_eq!(uris.len(), RESOURCES.len());
    }

    #[test]
    fn test_list_resources_sets_mime_type() {
        let resources = list_resources();
        assert_eq!(resources.len(), 6);
        assert!(resources
            .iter()
            .all(|r| r.raw.mime_type.as_deref() == Some(JSON_MIME_TYPE)));
        assert_eq!(resources[0].raw.uri, "linear://teams");
    }
}
