//! Transport channels for the protocol session
//!
//! The channel is pure transport: both implementations serve the same
//! handler with identical semantics. Selection happens once at startup.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Json, Router};
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use rmcp::ServiceExt;
use serde_json::{json, Value as JsonValue};
use tower_http::trace::TraceLayer;
use tracing::info;

use cap_core::{Config, ToolManager, TransportKind};

use crate::handler::CapacitiesServer;

/// A serving channel for the tool-invocation protocol
#[async_trait]
pub trait Transport: Send + Sync {
    /// Which channel this is
    fn kind(&self) -> TransportKind;

    /// Serve until the session or listener ends
    async fn run(&self, tools: Arc<ToolManager>) -> anyhow::Result<()>;
}

/// Select the channel configured at startup
pub fn select(config: &Config) -> Box<dyn Transport> {
    match config.transport {
        TransportKind::Stdio => Box::new(StdioTransport),
        TransportKind::Http => Box::new(HttpTransport { port: config.port }),
    }
}

/// One protocol session over stdin/stdout for the process lifetime
pub struct StdioTransport;

#[async_trait]
impl Transport for StdioTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Stdio
    }

    async fn run(&self, tools: Arc<ToolManager>) -> anyhow::Result<()> {
        info!("Serving MCP session on stdio");
        let service = CapacitiesServer::new(tools).serve(stdio()).await?;
        service.waiting().await?;
        Ok(())
    }
}

/// HTTP listener: unauthenticated liveness probe on `/`, one protocol
/// exchange per request on `/mcp`
pub struct HttpTransport {
    pub port: u16,
}

#[async_trait]
impl Transport for HttpTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Http
    }

    async fn run(&self, tools: Arc<ToolManager>) -> anyhow::Result<()> {
        // Stateless mode: every request gets its own handler instance;
        // no session is reused across requests.
        let service = StreamableHttpService::new(
            move || Ok::<_, std::io::Error>(CapacitiesServer::new(Arc::clone(&tools))),
            LocalSessionManager::default().into(),
            StreamableHttpServerConfig {
                stateful_mode: false,
                ..Default::default()
            },
        );

        let app = Router::new()
            .route("/", get(liveness))
            .nest_service("/mcp", service)
            .layer(TraceLayer::new_for_http());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("MCP HTTP listener on {}", addr);
        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Fixed status payload for the liveness probe
async fn liveness() -> Json<JsonValue> {
    Json(json!({
        "status": "ok",
        "name": "cap-mcp",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
