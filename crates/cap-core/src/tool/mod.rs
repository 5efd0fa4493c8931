//! Tool system for MCP tool invocations
//!
//! Defines the trait implemented by every exposed tool and the registry
//! the protocol front end dispatches into.

pub mod manager;
pub mod traits;

pub use manager::ToolManager;
pub use traits::{Tool, ToolResult};
