//! MCP tools, one module per noun and one submodule per verb
//!
//! Each noun module exposes a `register_<noun>_tools` function;
//! [`crate::mcp::tool_registry::register_all_tools`] calls them in catalog
//! order.

pub mod comments;
pub mod issues;
pub mod milestones;
pub mod project_updates;
pub mod projects;
pub mod teams;
pub mod users;
pub mod workflow_states;
