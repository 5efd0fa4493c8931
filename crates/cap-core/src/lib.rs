//! cap-core: Capacities MCP Gateway Core Library
//!
//! Shared configuration, error types, and the tool system used by the
//! Capacities API client and the MCP front end.

pub mod config;
pub mod error;
pub mod tool;

pub use config::{Config, TransportKind};
pub use error::{Error, Result};
pub use tool::{Tool, ToolManager, ToolResult};
