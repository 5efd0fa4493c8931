//! Tool trait definition
//!
//! The core trait for tools reachable through the MCP front end. The
//! transport channel dispatches by name; implementations own validation,
//! the outbound call, and result formatting.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::Result;

/// Tool execution result
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Output text returned to the caller
    pub output: String,
    /// Whether the invocation failed (still a normal protocol reply)
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: true,
        }
    }
}

/// Tool trait for MCP tool invocations
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as listed to the client
    fn name(&self) -> &str;

    /// Tool description shown when the client selects tools
    fn description(&self) -> &str;

    /// JSON schema for the tool's argument bag
    fn input_schema(&self) -> JsonValue;

    /// Execute the tool with the given argument bag
    ///
    /// # Errors
    /// `Error::InvalidInput` signals an argument-shape violation that the
    /// front end reports through the protocol error path. Any other error
    /// or an `is_error` result is delivered as a failed tool invocation.
    async fn execute(&self, input: JsonValue) -> Result<ToolResult>;
}
