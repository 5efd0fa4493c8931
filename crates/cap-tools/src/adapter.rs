//! Generic request/response adapter shared by all tools
//!
//! Every tool follows the same skeleton: validate the argument bag,
//! resolve the target space, issue exactly one outbound call, format the
//! result. `ApiTool` implements that skeleton once over a declarative
//! `ApiCall`; the per-tool modules only supply the varying pieces.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use cap_api::{CapacitiesClient, OutboundCall};
use cap_core::{Error, Result, Tool, ToolResult};

/// How a tool uses the target space id
pub enum SpaceUse<'a> {
    /// The call acts within one space; the argument may override the
    /// configured default.
    Required(Option<&'a str>),
    /// The call is space-independent.
    NotNeeded,
}

/// Declarative description of one Capacities tool
pub trait ApiCall: Send + Sync + 'static {
    /// Typed argument bag; shape and primitive types are enforced by serde
    type Args: DeserializeOwned + Send + Sync;

    /// Tool name as exposed over the protocol
    fn name(&self) -> &'static str;

    /// Tool description shown to the calling agent
    fn description(&self) -> &'static str;

    /// JSON schema for the argument bag
    fn input_schema(&self) -> JsonValue;

    /// Bounds and format checks beyond shape/type
    ///
    /// # Errors
    /// `Error::InvalidInput` for any violation; nothing has touched the
    /// network at this point.
    fn validate(&self, args: &Self::Args) -> Result<()>;

    /// Whether and how the call targets a space
    fn space<'a>(&self, args: &'a Self::Args) -> SpaceUse<'a>;

    /// Map validated arguments to the single outbound request
    fn request(&self, args: &Self::Args, space_id: Option<&str>) -> Result<OutboundCall>;

    /// Render the parsed upstream response as reply text
    fn format(&self, args: &Self::Args, response: JsonValue) -> Result<String>;
}

/// The shared adapter: one `ApiCall` bound to the client and the
/// process-wide default space
pub struct ApiTool<C: ApiCall> {
    call: C,
    client: Arc<CapacitiesClient>,
    default_space_id: Option<String>,
}

impl<C: ApiCall> ApiTool<C> {
    pub fn new(call: C, client: Arc<CapacitiesClient>, default_space_id: Option<String>) -> Self {
        Self {
            call,
            client,
            default_space_id,
        }
    }
}

#[async_trait]
impl<C: ApiCall> Tool for ApiTool<C> {
    fn name(&self) -> &str {
        self.call.name()
    }

    fn description(&self) -> &str {
        self.call.description()
    }

    fn input_schema(&self) -> JsonValue {
        self.call.input_schema()
    }

    async fn execute(&self, input: JsonValue) -> Result<ToolResult> {
        // Validate: shape via serde, bounds via the call
        let args: C::Args = serde_json::from_value(input)
            .map_err(|e| Error::InvalidInput(format!("{}: {}", self.call.name(), e)))?;
        self.call.validate(&args)?;

        // Resolve: explicit argument wins, else the configured default.
        // Neither present means no network call is made at all.
        let space_id = match self.call.space(&args) {
            SpaceUse::NotNeeded => None,
            SpaceUse::Required(explicit) => {
                let resolved = explicit
                    .map(str::to_string)
                    .or_else(|| self.default_space_id.clone());
                match resolved {
                    Some(id) => Some(id),
                    None => {
                        debug!(tool = self.call.name(), "No space id resolvable");
                        return Ok(ToolResult::error(
                            "No space ID provided and no default space is configured. \
                             Pass spaceId or set CAPACITIES_SPACE_ID.",
                        ));
                    }
                }
            }
        };

        // Invoke: exactly one outbound call, no retries
        let call = self.call.request(&args, space_id.as_deref())?;
        let response = match self.client.execute(&call).await {
            Ok(value) => value,
            Err(e) => {
                warn!(tool = self.call.name(), "Upstream call failed: {}", e);
                return Ok(ToolResult::error(e.to_string()));
            }
        };

        // Format
        Ok(ToolResult::success(self.call.format(&args, response)?))
    }
}

/// Check an explicitly passed space id for Capacities' identifier format
pub(crate) fn validate_space_id(space_id: &str) -> Result<()> {
    uuid::Uuid::parse_str(space_id)
        .map(|_| ())
        .map_err(|_| Error::InvalidInput(format!("spaceId is not a valid space ID: {}", space_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct PingArgs {
        #[serde(rename = "spaceId")]
        space_id: Option<String>,
    }

    struct PingCall;

    impl ApiCall for PingCall {
        type Args = PingArgs;

        fn name(&self) -> &'static str {
            "ping"
        }

        fn description(&self) -> &'static str {
            "Test call"
        }

        fn input_schema(&self) -> JsonValue {
            json!({"type": "object", "properties": {"spaceId": {"type": "string"}}})
        }

        fn validate(&self, _args: &Self::Args) -> Result<()> {
            Ok(())
        }

        fn space<'a>(&self, args: &'a Self::Args) -> SpaceUse<'a> {
            SpaceUse::Required(args.space_id.as_deref())
        }

        fn request(&self, _args: &Self::Args, space_id: Option<&str>) -> Result<OutboundCall> {
            Ok(OutboundCall::post(
                "/ping",
                json!({"spaceId": space_id.unwrap_or_default()}),
            ))
        }

        fn format(&self, _args: &Self::Args, _response: JsonValue) -> Result<String> {
            Ok("pong".to_string())
        }
    }

    fn tool(uri: &str, default_space: Option<&str>) -> ApiTool<PingCall> {
        let client = Arc::new(CapacitiesClient::new(uri, "tok").unwrap());
        ApiTool::new(PingCall, client, default_space.map(str::to_string))
    }

    #[tokio::test]
    async fn test_missing_space_makes_no_call() {
        let server = MockServer::start().await;

        // Any request at all would fail this expectation
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = tool(&server.uri(), None)
            .execute(json!({}))
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.output.contains("No space ID"));
    }

    #[tokio::test]
    async fn test_explicit_space_beats_default() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server.uri(), Some("default-space"))
            .execute(json!({"spaceId": "explicit-space"}))
            .await
            .unwrap();
        assert!(!result.is_error);

        let requests = server.received_requests().await.unwrap();
        let body: JsonValue = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["spaceId"], "explicit-space");
    }

    #[tokio::test]
    async fn test_default_space_used_when_no_argument() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server.uri(), Some("default-space"))
            .execute(json!({}))
            .await
            .unwrap();
        assert!(!result.is_error);

        let requests = server.received_requests().await.unwrap();
        let body: JsonValue = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["spaceId"], "default-space");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_error_result() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server exploded"))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server.uri(), Some("s"))
            .execute(json!({}))
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.output.contains("500"));
        assert!(result.output.contains("server exploded"));
    }

    #[tokio::test]
    async fn test_malformed_arguments_reject_before_network() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = tool(&server.uri(), Some("s"))
            .execute(json!({"spaceId": 42}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_validate_space_id() {
        assert!(validate_space_id("a3bb189e-8bf9-3888-9912-ace4e6543002").is_ok());
        assert!(validate_space_id("not-a-uuid").is_err());
    }
}
