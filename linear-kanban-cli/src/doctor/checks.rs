//! Check implementations for the doctor module

use super::types::*;
use super::utils::*;
use linear_kanban::config::Config;
use linear_kanban::linear::LinearApi;
use std::env;
use std::process::Command;

/// Check names constants to avoid typos and improve maintainability
pub mod check_names {
    pub const API_KEY: &str = "LINEAR_API_KEY";
    pub const CONFIG_VALIDATION: &str = "Configuration values";
    pub const CONFIG_FILE: &str = "Configuration file";
    pub const IN_PATH: &str = "linear-kanban-mcp in PATH";
    pub const CLAUDE_CONFIG: &str = "Claude Code MCP configuration";
    pub const CONNECTIVITY: &str = "Linear API connectivity";
}

/// Report whether the API key is configured, showing only its tail
pub fn check_api_key(checks: &mut Vec<Check>, config: &Config) {
    let check = match &config.api_key {
        Some(key) => Check::new(
            check_names::API_KEY,
            CheckCategory::Configuration,
            CheckStatus::Ok,
        )
        .with_message(format!("Set ({})", mask_secret(key))),
        None => Check::new(
            check_names::API_KEY,
            CheckCategory::Configuration,
            CheckStatus::Error,
        )
        .with_message("LINEAR_API_KEY environment variable is not set")
        .with_fix("Create a personal API key in Linear settings and export LINEAR_API_KEY"),
    };
    checks.push(check.build());
}

/// Validate configuration values and report which YAML file, if any, was used
pub fn check_config(checks: &mut Vec<Check>, config: &Config) {
    let validation = match config.validate() {
        Ok(()) => Check::new(
            check_names::CONFIG_VALIDATION,
            CheckCategory::Configuration,
            CheckStatus::Ok,
        )
        .with_message(format!("API URL: {}", config.api_url)),
        Err(e) => Check::new(
            check_names::CONFIG_VALIDATION,
            CheckCategory::Configuration,
            CheckStatus::Error,
        )
        .with_message(e.to_string())
        .with_fix("Correct the value in linear-kanban.yaml or the LINEAR_KANBAN_* variables"),
    };
    checks.push(validation.build());

    let file = match Config::find_yaml_config_file() {
        Some(path) => Check::new(
            check_names::CONFIG_FILE,
            CheckCategory::Configuration,
            CheckStatus::Ok,
        )
        .with_message(format!("Using {}", path.display())),
        None => Check::new(
            check_names::CONFIG_FILE,
            CheckCategory::Configuration,
            CheckStatus::Ok,
        )
        .with_message("No linear-kanban.yaml found, using defaults"),
    };
    checks.push(file.build());
}

/// Check if linear-kanban-mcp is in PATH
pub fn check_in_path(checks: &mut Vec<Check>) {
    let path_var = env::var_os("PATH").unwrap_or_default();

    let check = match find_in_path(BINARY_NAME, &path_var) {
        Some(found) => Check::new(
            check_names::IN_PATH,
            CheckCategory::Installation,
            CheckStatus::Ok,
        )
        .with_message(format!("Found at: {}", found.display())),
        None => Check::new(
            check_names::IN_PATH,
            CheckCategory::Installation,
            CheckStatus::Warning,
        )
        .with_message(format!("{BINARY_NAME} not found in PATH"))
        .with_fix(format!(
            "Add {BINARY_NAME} to your PATH or use the full path in Claude Code config"
        )),
    };
    checks.push(check.build());
}

/// Check Claude Code MCP configuration
///
/// Runs `claude mcp list` and looks for the server name in its output.
pub fn check_claude_config(checks: &mut Vec<Check>) {
    let check = match Command::new("claude").arg("mcp").arg("list").output() {
        Ok(output) if output.status.success() => {
            claude_list_check(&String::from_utf8_lossy(&output.stdout))
        }
        Ok(output) => Check::new(
            check_names::CLAUDE_CONFIG,
            CheckCategory::Installation,
            CheckStatus::Warning,
        )
        .with_message(format!(
            "Failed to run 'claude mcp list': {}",
            String::from_utf8_lossy(&output.stderr).trim()
        ))
        .with_fix("Ensure Claude Code is installed and the 'claude' command is available"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Check::new(
            check_names::CLAUDE_CONFIG,
            CheckCategory::Installation,
            CheckStatus::Warning,
        )
        .with_message("Claude Code command not found")
        .with_fix(get_claude_add_command()),
        Err(e) => Check::new(
            check_names::CLAUDE_CONFIG,
            CheckCategory::Installation,
            CheckStatus::Warning,
        )
        .with_message(format!("Failed to run 'claude mcp list': {e}"))
        .with_fix("Check that Claude Code is properly installed"),
    };
    checks.push(check.build());
}

fn claude_list_check(stdout: &str) -> CheckBuilder {
    if stdout.contains(MCP_SERVER_NAME) {
        Check::new(
            check_names::CLAUDE_CONFIG,
            CheckCategory::Installation,
            CheckStatus::Ok,
        )
        .with_message(format!("{MCP_SERVER_NAME} is configured in Claude Code"))
    } else {
        Check::new(
            check_names::CLAUDE_CONFIG,
            CheckCategory::Installation,
            CheckStatus::Warning,
        )
        .with_message(format!(
            "{MCP_SERVER_NAME} not found in Claude Code MCP servers"
        ))
        .with_fix(get_claude_add_command())
    }
}

/// Call Linear with the configured key and report how many teams it can see
pub async fn check_connectivity(checks: &mut Vec<Check>, api: &dyn LinearApi) {
    let check = match api.teams().await {
        Ok(teams) => Check::new(
            check_names::CONNECTIVITY,
            CheckCategory::LinearApi,
            CheckStatus::Ok,
        )
        .with_message(format!("Authenticated, {} team(s) visible", teams.len())),
        Err(e) => {
            tracing::debug!("Connectivity check failed: {e}");
            Check::new(
                check_names::CONNECTIVITY,
                CheckCategory::LinearApi,
                CheckStatus::Error,
            )
            .with_message(e.to_string())
            .with_fix("Verify the API key is valid and that api.linear.app is reachable")
        }
    };
    checks.push(check.build());
}
