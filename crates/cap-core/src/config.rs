//! Configuration management
//!
//! All configuration is read once from the environment at startup and
//! passed into the transport and tool layers as an explicit value, so
//! tests can build fixtures without touching process environment.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Transport channel selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Single MCP session over stdin/stdout for the process lifetime
    #[default]
    Stdio,
    /// HTTP listener with one protocol exchange per request
    Http,
}

impl TransportKind {
    /// Parse the `CAPACITIES_TRANSPORT` value; anything unrecognized
    /// falls back to stdio.
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "http" | "network" => TransportKind::Http,
            _ => TransportKind::Stdio,
        }
    }
}

/// Main configuration for the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bearer credential for the Capacities API (required)
    pub api_token: String,

    /// Base origin of the Capacities API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Default space id used when a tool call carries none
    pub default_space_id: Option<String>,

    /// Which channel to serve the protocol on
    #[serde(default)]
    pub transport: TransportKind,

    /// Listen port (http transport only)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_api_url() -> String {
    "https://api.capacities.io".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns a `Config` error if `CAPACITIES_API_TOKEN` is not set.
    pub fn from_env() -> crate::Result<Self> {
        let api_token = std::env::var("CAPACITIES_API_TOKEN")
            .map_err(|_| Error::Config("CAPACITIES_API_TOKEN not set".to_string()))?;

        if api_token.trim().is_empty() {
            return Err(Error::Config("CAPACITIES_API_TOKEN is empty".to_string()));
        }

        Ok(Config {
            api_token,
            api_url: std::env::var("CAPACITIES_API_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(default_api_url),
            default_space_id: std::env::var("CAPACITIES_SPACE_ID")
                .ok()
                .filter(|v| !v.is_empty()),
            transport: std::env::var("CAPACITIES_TRANSPORT")
                .map(|v| TransportKind::parse(&v))
                .unwrap_or_default(),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_port),
        })
    }
}
