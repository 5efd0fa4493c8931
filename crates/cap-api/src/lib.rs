//! cap-api: Capacities REST API client
//!
//! A thin authenticated client for the four Capacities endpoints the
//! gateway consumes. One outbound call per invocation, no retries; the
//! upstream is treated as a black box.

pub mod client;
pub mod types;

pub use client::{CapacitiesClient, OutboundCall};
pub use types::{
    SaveToDailyNoteRequest, SaveWeblinkRequest, SearchRequest, SearchResponse, SearchResult,
    Space, SpacesResponse, WeblinkResponse,
};
