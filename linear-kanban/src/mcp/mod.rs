//! Model Context Protocol (MCP) server support
//!
//! This module exposes a Linear workspace through the Model Context Protocol:
//! a catalog of tools, `linear://` resources and guided prompts.

// Module declarations
pub mod constants;
pub mod prompts;
pub mod resources;
pub mod responses;
pub mod server;
pub mod shaping;
pub mod tool_registry;
pub mod tools;
pub mod types;

// Re-export commonly used items from submodules
pub use server::McpServer;
pub use tool_registry::{register_all_tools, McpTool, ToolContext, ToolRegistry};
