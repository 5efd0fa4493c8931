//! Capacities API client
//!
//! Sends exactly one authenticated request per tool invocation. Non-2xx
//! statuses become `Error::Api` carrying the status code and body text.

use reqwest::{header, Client, Method};
use serde_json::Value as JsonValue;
use tracing::debug;

use cap_core::{Error, Result};

/// One outbound HTTP request to the Capacities API
#[derive(Debug, Clone)]
pub struct OutboundCall {
    pub method: Method,
    pub path: &'static str,
    pub query: Option<Vec<(&'static str, String)>>,
    pub body: Option<JsonValue>,
}

impl OutboundCall {
    /// A GET request with no query or body
    pub fn get(path: &'static str) -> Self {
        Self {
            method: Method::GET,
            path,
            query: None,
            body: None,
        }
    }

    /// A POST request with a JSON body
    pub fn post(path: &'static str, body: JsonValue) -> Self {
        Self {
            method: Method::POST,
            path,
            query: None,
            body: Some(body),
        }
    }
}

/// Capacities REST API client
#[derive(Clone)]
pub struct CapacitiesClient {
    client: Client,
    base_url: String,
    token: String,
}

impl CapacitiesClient {
    /// Create a new client against the given base origin
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Send one outbound call and read the response body as JSON.
    ///
    /// An empty 2xx body yields `Value::Null` (an empty result, not an
    /// error). A non-2xx status yields `Error::Api` with the status code
    /// and the body text, or the status line if the body is unreadable.
    pub async fn execute(&self, call: &OutboundCall) -> Result<JsonValue> {
        let url = format!("{}{}", self.base_url, call.path);

        debug!(method = %call.method, path = call.path, "Calling Capacities API");

        let mut request = self
            .client
            .request(call.method.clone(), &url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/json");

        if let Some(query) = &call.query {
            request = request.query(query);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(JsonValue::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_execute_sends_bearer_and_parses_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spaces"))
            .and(header("authorization", "Bearer tok-123"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"spaces": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = CapacitiesClient::new(&server.uri(), "tok-123").unwrap();
        let value = client.execute(&OutboundCall::get("/spaces")).await.unwrap();
        assert_eq!(value, json!({"spaces": []}));
    }

    #[tokio::test]
    async fn test_execute_posts_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/lookup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = CapacitiesClient::new(&server.uri(), "tok").unwrap();
        let call = OutboundCall::post("/lookup", json!({"mode": "title"}));
        let value = client.execute(&call).await.unwrap();
        assert_eq!(value["results"], json!([]));
    }

    #[tokio::test]
    async fn test_non_success_carries_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spaces"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server exploded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = CapacitiesClient::new(&server.uri(), "tok").unwrap();
        let err = client
            .execute(&OutboundCall::get("/spaces"))
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("server exploded"));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null_not_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/save-to-daily-note"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = CapacitiesClient::new(&server.uri(), "tok").unwrap();
        let call = OutboundCall::post("/save-to-daily-note", json!({"mdText": "x"}));
        let value = client.execute(&call).await.unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = CapacitiesClient::new("https://api.capacities.io/", "tok").unwrap();
        assert_eq!(client.base_url, "https://api.capacities.io");
    }
}
