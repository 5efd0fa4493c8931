//! MCP protocol handler
//!
//! Bridges the tool registry to the MCP list/call surface. Validation
//! failures are protocol-level `invalid_params` rejections; resolution
//! and upstream failures stay in-band as error-flagged tool results so
//! the calling agent's conversation continues.

use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    ErrorData, ServerHandler,
};
use serde_json::Value as JsonValue;

use cap_core::{Error, ToolManager, ToolResult};

/// MCP server handler exposing the registered Capacities tools
#[derive(Clone)]
pub struct CapacitiesServer {
    tools: Arc<ToolManager>,
}

impl CapacitiesServer {
    pub fn new(tools: Arc<ToolManager>) -> Self {
        Self { tools }
    }
}

impl ServerHandler for CapacitiesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "cap-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Tools for saving notes and weblinks to Capacities and searching \
                 existing content."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = self
            .tools
            .tools()
            .into_iter()
            .map(|tool| {
                let schema = tool.input_schema().as_object().cloned().unwrap_or_default();
                rmcp::model::Tool::new(
                    tool.name().to_string(),
                    tool.description().to_string(),
                    Arc::new(schema),
                )
            })
            .collect();

        Ok(ListToolsResult {
            tools,
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        if !self.tools.contains(&request.name) {
            return Err(ErrorData::invalid_params(
                format!("Unknown tool: {}", request.name),
                None,
            ));
        }

        let args = JsonValue::Object(request.arguments.unwrap_or_default());
        to_call_result(self.tools.execute(&request.name, args).await)
    }
}

/// Map a tool outcome onto the protocol reply
fn to_call_result(result: cap_core::Result<ToolResult>) -> Result<CallToolResult, ErrorData> {
    match result {
        Ok(r) if r.is_error => Ok(CallToolResult::error(vec![Content::text(r.output)])),
        Ok(r) => Ok(CallToolResult::success(vec![Content::text(r.output)])),
        Err(Error::InvalidInput(msg)) => Err(ErrorData::invalid_params(msg, None)),
        Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
}
