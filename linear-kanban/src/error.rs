//! Unified error handling for the Linear Kanban library
//!
//! Every failure a tool, resource or client call can produce is a variant of
//! [`LinearKanbanError`]. Tool calls turn these into `{success: false}`
//! envelopes; resource and prompt reads turn them into MCP protocol errors.

use std::io;
use thiserror::Error;

/// The main error type for the Linear Kanban library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LinearKanbanError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template parsing or rendering failed
    #[error("Template error: {0}")]
    Template(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// No Linear API key was configured
    #[error("LINEAR_API_KEY environment variable is required")]
    MissingApiKey,

    /// A tool name that is not in the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A resource URI that is not in the catalog
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// A prompt name that is not in the catalog
    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    /// A required argument was absent or null
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Arguments were present but could not be bound
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The upstream service has no entity with this id
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity: String,
        /// Identifier that was looked up
        id: String,
    },

    /// An issue has no team, or no team exists at all
    #[error("{0}")]
    TeamNotFound(String),

    /// No workflow state of the issue's team matched the requested name
    #[error("State '{state_name}' not found")]
    StateNotFound {
        /// Name the caller asked for
        state_name: String,
        /// Every state name of the team, in upstream order
        available_states: Vec<String>,
    },

    /// The upstream service rejected or failed the call
    #[error("{0}")]
    Upstream(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl LinearKanbanError {
    /// Shorthand for [`LinearKanbanError::NotFound`]
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Shorthand for [`LinearKanbanError::MissingArgument`]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingArgument(field.into())
    }

    /// True for errors meaning the upstream entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for Linear Kanban operations
pub type Result<T> = std::result::Result<T, LinearKanbanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_not_found_message() {
        let err = LinearKanbanError::StateNotFound {
            state_name: "Review".to_string(),
            available_states: vec!["Todo".to_string(), "Done".to_string()],
        };
        assert_eq!(err.to_string(), "State 'Review' not found");
    }

    #[test]
    fn test_unknown_tool_message() {
        let err = LinearKanbanError::UnknownTool("frobnicate".to_string());
        assert_eq!(err.to_string(), "Unknown tool: frobnicate");
    }

    #[test]
    fn test_not_found_helper() {
        let err = LinearKanbanError::not_found("Issue", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Issue not found: abc");
        assert!(!LinearKanbanError::Upstream("boom".into()).is_not_found());
    }

    #[test]
    fn test_io_conversion() {
        let err: LinearKanbanError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().contains("gone"));
    }
}
