//! MCP server exposing Linear tools, resources and prompts

use crate::linear::LinearApi;
use crate::{LinearKanbanError, SERVER_NAME, VERSION};
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::prompts;
use super::resources;
use super::tool_registry::{ToolContext, ToolRegistry};

const INSTRUCTIONS: &str = "Kanban access to a Linear workspace. Use list_workflow_states to see the board columns, list_issues and search_issues to find work, and create_issue, update_issue and move_issue to manage it. Milestone and project update tools cover project planning. Resources under linear:// give read-only snapshots.";

/// MCP server for a Linear workspace
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    /// Tool context containing the shared Linear client
    pub tool_context: Arc<ToolContext>,
}

impl McpServer {
    /// Create a server with the full tool catalog over the given client
    pub fn new(client: Arc<dyn LinearApi>) -> Self {
        Self::with_registry(client, ToolRegistry::with_all_tools())
    }

    /// Create a server with a custom tool registry
    pub fn with_registry(client: Arc<dyn LinearApi>, registry: ToolRegistry) -> Self {
        Self {
            tool_registry: Arc::new(registry),
            tool_context: Arc::new(ToolContext::new(client)),
        }
    }

    /// The registered tools
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Invoke a tool by name; failures come back as error envelopes
    pub async fn call_tool_by_name(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> CallToolResult {
        self.tool_registry
            .call_tool(name, arguments, &self.tool_context)
            .await
    }

    /// Read a resource's JSON text
    pub async fn read_resource_uri(&self, uri: &str) -> crate::Result<String> {
        resources::read_resource(self.tool_context.api(), uri).await
    }

    /// Render a prompt by name
    pub fn render_prompt(
        &self,
        name: &str,
        arguments: Option<&Map<String, Value>>,
    ) -> crate::Result<GetPromptResult> {
        prompts::render_prompt(name, arguments)
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities {
            prompts: Some(PromptsCapability {
                list_changed: Some(false),
            }),
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
            resources: Some(ResourcesCapability {
                subscribe: None,
                list_changed: None,
            }),
            logging: None,
            completions: None,
            experimental: None,
        }
    }

    fn implementation() -> Implementation {
        Implementation {
            name: SERVER_NAME.into(),
            version: VERSION.into(),
        }
    }
}

impl ServerHandler for McpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );

        Ok(InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            instructions: Some(INSTRUCTIONS.into()),
            server_info: Self::implementation(),
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(self
            .call_tool_by_name(&request.name, request.arguments)
            .await)
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: resources::list_resources(),
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        match self.read_resource_uri(&request.uri).await {
            Ok(text) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::TextResourceContents {
                    uri: request.uri,
                    mime_type: Some(resources::JSON_MIME_TYPE.into()),
                    text,
                }],
            }),
            Err(e) => {
                tracing::error!("Failed to read resource {}: {}", request.uri, e);
                Err(McpError::internal_error(
                    format!("Failed to read resource {}: {e}", request.uri),
                    None,
                ))
            }
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: prompts::list_prompts(),
            next_cursor: None,
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        match self.render_prompt(&request.name, request.arguments.as_ref()) {
            Ok(result) => Ok(result),
            Err(e @ LinearKanbanError::Template(_)) => {
                tracing::error!("Prompt '{}' failed to render: {}", request.name, e);
                Err(McpError::internal_error(e.to_string(), None))
            }
            Err(e) => {
                tracing::warn!("Prompt '{}' rejected: {}", request.name, e);
                Err(McpError::invalid_params(e.to_string(), None))
            }
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Self::implementation(),
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::mock::MockLinearClient;
    use crate::mcp::responses::response_text;

    fn server() -> McpServer {
        McpServer::new(Arc::new(MockLinearClient::new()))
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "linear-kanban-mcp");
        assert_eq!(info.server_info.version, VERSION);
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());
    }

    #[test]
    fn test_server_registers_all_tools() {
        assert_eq!(server().tool_registry().len(), 24);
    }

    #[tokio::test]
    async fn test_unknown_tool_by_name() {
        let result = server().call_tool_by_name("frobnicate", None).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            response_text(&result),
            Some(r#"{"success":false,"error":"Unknown tool: frobnicate"}"#)
        );
    }

    #[tokio::test]
    async fn test_unknown_resource_uri() {
        let err = server()
            .read_resource_uri("linear://nothing")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown resource: linear://nothing");
    }

    #[test]
    fn test_unknown_prompt() {
        let err = server().render_prompt("nope", None).unwrap_err();
        assert!(matches!(err, LinearKanbanError::UnknownPrompt(_)));
    }
}
