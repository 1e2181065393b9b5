//! # Linear Kanban
//!
//! An MCP adapter exposing a Linear workspace (teams, projects, issues,
//! milestones, comments, users and project updates) to AI assistants.
//!
//! ## Features
//!
//! - **Tools**: a fixed catalog of read and write actions against Linear
//! - **Resources**: read-only JSON snapshots addressed by `linear://` URIs
//! - **Prompts**: Liquid templates that guide an assistant through common
//!   kanban workflows
//! - **Pluggable client**: everything upstream goes through the
//!   [`linear::LinearApi`] trait, so tests run against
//!   [`linear::mock::MockLinearClient`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use linear_kanban::config::Config;
//! use linear_kanban::linear::GraphqlLinearClient;
//! use linear_kanban::mcp::McpServer;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new();
//! let client = GraphqlLinearClient::from_config(&config)?;
//! let server = McpServer::new(Arc::new(client));
//! let running = rmcp::serve_server(server, rmcp::transport::io::stdio()).await?;
//! running.waiting().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Shared helpers
pub mod common;

/// Configuration loading from the environment and YAML files
pub mod config;

/// Crate error type
pub mod error;

/// Linear API client abstraction, GraphQL implementation and in-memory mock
pub mod linear;

/// Model Context Protocol (MCP) server support
pub mod mcp;

/// Template engine and rendering
pub mod template;

pub use error::{LinearKanbanError, Result};
pub use linear::{GraphqlLinearClient, LinearApi};
pub use mcp::McpServer;
pub use template::{Template, TemplateEngine};

/// Name the server reports to MCP clients
pub const SERVER_NAME: &str = "linear-kanban-mcp";

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::linear::model::*;
    pub use crate::linear::{GraphqlLinearClient, LinearApi};
    pub use crate::mcp::{McpServer, ToolContext, ToolRegistry};
    pub use crate::{LinearKanbanError, Result};
}
