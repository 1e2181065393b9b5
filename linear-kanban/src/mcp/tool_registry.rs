//! Tool registry for MCP operations
//!
//! Every tool is a [`McpTool`] registered once in a [`ToolRegistry`]. The
//! registry is the only place a tool call enters: it checks the schema's
//! required arguments, runs the tool, and turns any error into a
//! `{success: false}` envelope.

use super::responses::create_error_response;
use super::types::{bind_arguments, require_fields};
use crate::error::{LinearKanbanError, Result};
use crate::linear::LinearApi;
use rmcp::model::{CallToolResult, Tool};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Context shared by all tools during execution
#[derive(Clone)]
pub struct ToolContext {
    /// Linear client every tool calls through
    pub client: Arc<dyn LinearApi>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(client: Arc<dyn LinearApi>) -> Self {
        Self { client }
    }

    /// The Linear client
    pub fn api(&self) -> &dyn LinearApi {
        self.client.as_ref()
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> Value;

    /// Execute the tool with the given arguments and context
    ///
    /// Errors are reported to the caller as error envelopes by
    /// [`ToolRegistry::call_tool`].
    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult>;
}

/// Registry for managing MCP tools, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn McpTool>>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the full tool catalog
    pub fn with_all_tools() -> Self {
        let mut registry = Self::new();
        register_all_tools(&mut registry);
        registry
    }

    /// Register a tool; a tool with the same name is replaced in place
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name();
        match self.index.get(name) {
            Some(&slot) => self.tools[slot] = Box::new(tool),
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(Box::new(tool));
            }
        }
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.index.get(name).map(|&slot| self.tools[slot].as_ref())
    }

    /// List all registered tool names
    pub fn list_tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    /// Get all registered tools as Tool objects for MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .iter()
            .map(|tool| {
                let schema_map = match tool.schema() {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };

                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a tool call
    ///
    /// Never fails: unknown names, missing arguments and client failures all
    /// come back as error envelopes with `is_error` set.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
        context: &ToolContext,
    ) -> CallToolResult {
        let Some(tool) = self.get_tool(name) else {
            tracing::warn!("Unknown tool requested: {}", name);
            return create_error_response(&LinearKanbanError::UnknownTool(name.to_string()));
        };

        let arguments = arguments.unwrap_or_default();
        tracing::debug!("Calling tool {} with {} argument(s)", name, arguments.len());

        let outcome = match BaseToolImpl::check_required(tool, &arguments) {
            Ok(()) => tool.execute(arguments, context).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Tool {} failed: {}", name, e);
                create_error_response(&e)
            }
        }
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed request
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: Map<String, Value>,
    ) -> Result<T> {
        bind_arguments(arguments)
    }

    /// Names listed under `required` in a tool schema
    pub fn required_fields(schema: &Value) -> Vec<&str> {
        schema
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Check every schema-required argument is present and non-null
    pub fn check_required(tool: &dyn McpTool, arguments: &Map<String, Value>) -> Result<()> {
        let schema = tool.schema();
        require_fields(arguments, &Self::required_fields(&schema))
    }
}

/// Register the full tool catalog
pub fn register_all_tools(registry: &mut ToolRegistry) {
    use crate::mcp::tools;
    tools::teams::register_team_tools(registry);
    tools::projects::register_project_tools(registry);
    tools::issues::register_issue_tools(registry);
    tools::workflow_states::register_workflow_state_tools(registry);
    tools::comments::register_comment_tools(registry);
    tools::users::register_user_tools(registry);
    tools::project_updates::register_project_update_tools(registry);
    tools::milestones::register_milestone_tools(registry);
}
