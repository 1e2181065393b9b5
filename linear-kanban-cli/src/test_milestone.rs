//! `test-milestone`: find a project by name and create a milestone in it
//!
//! A smoke test for write access. The milestone is named
//! [`TEST_MILESTONE_NAME`] and falls due [`TARGET_DAYS_AHEAD`] days from today.

use anyhow::Result;
use chrono::{DateTime, Days, NaiveDate, Utc};
use linear_kanban::config::Config;
use linear_kanban::linear::model::{Project, ProjectMilestone, ProjectMilestoneCreateInput};
use linear_kanban::linear::{GraphqlLinearClient, LinearApi};

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};

/// Name given to the created milestone
pub const TEST_MILESTONE_NAME: &str = "Test Milestone";

/// Description given to the created milestone
pub const TEST_MILESTONE_DESCRIPTION: &str =
    "This is a test milestone created via the Linear Kanban MCP server";

/// Days between today and the milestone's target date
pub const TARGET_DAYS_AHEAD: u64 = 30;

/// Result of looking a project up by name
#[derive(Debug)]
pub enum ProjectSearch {
    /// First project whose name matched
    Found(Project),
    /// Nothing matched; every project in the workspace
    Missing(Vec<Project>),
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when `name` contains `query`, ignoring case and whitespace
pub fn project_matches(name: &str, query: &str) -> bool {
    normalize(name).contains(&normalize(query))
}

/// Look for the first project matching `query`
pub async fn find_project(api: &dyn LinearApi, query: &str) -> Result<ProjectSearch> {
    let projects = api.projects().await?;
    Ok(
        match projects.iter().position(|p| project_matches(&p.name, query)) {
            Some(index) => ProjectSearch::Found(projects[index].clone()),
            None => ProjectSearch::Missing(projects),
        },
    )
}

/// Target date [`TARGET_DAYS_AHEAD`] days after the UTC calendar date of `now`
pub fn target_date(now: DateTime<Utc>) -> Option<NaiveDate> {
    now.date_naive().checked_add_days(Days::new(TARGET_DAYS_AHEAD))
}

/// Create the test milestone in `project_id`, due [`TARGET_DAYS_AHEAD`] days after `now`
pub async fn create_test_milestone(
    api: &dyn LinearApi,
    project_id: &str,
    now: DateTime<Utc>,
) -> Result<Option<ProjectMilestone>> {
    let input = ProjectMilestoneCreateInput {
        name: TEST_MILESTONE_NAME.to_string(),
        project_id: project_id.to_string(),
        description: Some(TEST_MILESTONE_DESCRIPTION.to_string()),
        target_date: target_date(now),
        sort_order: None,
    };
    Ok(api.create_project_milestone(input).await?)
}

/// Run the command and return the process exit code
pub async fn run(config: &Config, project_query: &str) -> i32 {
    if !config.has_api_key() {
        eprintln!("Error: LINEAR_API_KEY environment variable is required");
        return EXIT_ERROR;
    }

    match execute(config, project_query).await {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!("test-milestone failed: {e:?}");
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}

async fn execute(config: &Config, project_query: &str) -> Result<i32> {
    let client = GraphqlLinearClient::from_config(config)?;

    println!("Searching for {project_query} project...");
    let project = match find_project(&client, project_query).await? {
        ProjectSearch::Found(project) => project,
        ProjectSearch::Missing(available) => {
            println!("Available projects:");
            for project in &available {
                println!("  - {} (ID: {})", project.name, project.id);
            }
            println!(
                "\nCould not find a project containing '{project_query}'. Please check the project name above."
            );
            return Ok(EXIT_ERROR);
        }
    };

    println!("Found project: {} (ID: {})", project.name, project.id);
    println!("\nCreating test milestone...");

    match create_test_milestone(&client, &project.id, Utc::now()).await? {
        Some(milestone) => {
            println!("\nMilestone created successfully!");
            println!("ID: {}", milestone.id);
            println!("Name: {}", milestone.name);
            println!(
                "Description: {}",
                milestone.description.as_deref().unwrap_or_default()
            );
            println!(
                "Target Date: {}",
                milestone
                    .target_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            );
            Ok(EXIT_SUCCESS)
        }
        None => {
            println!("Failed to create milestone");
            Ok(EXIT_ERROR)
        }
    }
}
