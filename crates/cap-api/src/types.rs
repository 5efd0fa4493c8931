//! Request and response types for the Capacities API
//!
//! Wire field names follow Capacities' spelling (`mdText`, `noTimeStamp`,
//! `titleOverwrite`). Optional overrides use `skip_serializing_if` so an
//! absent argument never appears in the request body.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value as JsonValue;

use cap_core::Result;

/// Body for `POST /save-to-daily-note`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveToDailyNoteRequest {
    pub space_id: String,
    pub md_text: String,
    #[serde(rename = "noTimeStamp")]
    pub no_time_stamp: bool,
}

/// Body for `POST /save-weblink`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWeblinkRequest {
    pub space_id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_overwrite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_overwrite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Body for `POST /lookup` (title search within one space)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub mode: String,
    pub search_term: String,
    pub space_ids: Vec<String>,
}

impl SearchRequest {
    /// Title-mode search scoped to a single space
    pub fn by_title(search_term: impl Into<String>, space_id: impl Into<String>) -> Self {
        Self {
            mode: "title".to_string(),
            search_term: search_term.into(),
            space_ids: vec![space_id.into()],
        }
    }
}

/// One space as returned by `GET /spaces`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Space {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Response of `GET /spaces`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpacesResponse {
    #[serde(default)]
    pub spaces: Vec<Space>,
}

/// One match as returned by `POST /lookup`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Content-type identifier of the matched object
    #[serde(default)]
    pub structure_id: String,
}

/// Response of `POST /lookup`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Response of `POST /save-weblink`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeblinkResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Parse an upstream response value into a typed body.
///
/// An empty body arrives here as `Null` and maps to the type's default;
/// it is a valid empty result, not a parse error.
pub fn parse_response<T: DeserializeOwned + Default>(value: JsonValue) -> Result<T> {
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_daily_note_request_wire_names() {
        let body = serde_json::to_value(SaveToDailyNoteRequest {
            space_id: "s-1".to_string(),
            md_text: "hello".to_string(),
            no_time_stamp: true,
        })
        .unwrap();

        assert_eq!(body["spaceId"], "s-1");
        assert_eq!(body["mdText"], "hello");
        assert_eq!(body["noTimeStamp"], true);
    }

    #[test]
    fn test_weblink_request_omits_absent_overrides() {
        let body = serde_json::to_value(SaveWeblinkRequest {
            space_id: "s-1".to_string(),
            url: "https://example.com".to_string(),
            title_overwrite: None,
            description_overwrite: None,
            md_text: None,
            tags: None,
        })
        .unwrap();

        let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["spaceId", "url"]);
    }

    #[test]
    fn test_weblink_request_maps_override_names() {
        let body = serde_json::to_value(SaveWeblinkRequest {
            space_id: "s-1".to_string(),
            url: "https://example.com".to_string(),
            title_overwrite: Some("Title".to_string()),
            description_overwrite: Some("Desc".to_string()),
            md_text: Some("notes".to_string()),
            tags: Some(vec!["a".to_string(), "b".to_string()]),
        })
        .unwrap();

        assert_eq!(body["titleOverwrite"], "Title");
        assert_eq!(body["descriptionOverwrite"], "Desc");
        assert_eq!(body["mdText"], "notes");
        assert_eq!(body["tags"], json!(["a", "b"]));
    }

    #[test]
    fn test_search_request_by_title() {
        let body = serde_json::to_value(SearchRequest::by_title("query", "s-1")).unwrap();
        assert_eq!(body["mode"], "title");
        assert_eq!(body["searchTerm"], "query");
        assert_eq!(body["spaceIds"], json!(["s-1"]));
    }

    #[test]
    fn test_parse_response_null_is_default() {
        let parsed: SpacesResponse = parse_response(JsonValue::Null).unwrap();
        assert!(parsed.spaces.is_empty());

        let parsed: WeblinkResponse = parse_response(JsonValue::Null).unwrap();
        assert!(parsed.id.is_none());
    }

    #[test]
    fn test_parse_response_typed() {
        let value = json!({
            "results": [
                {"id": "r1", "title": "First", "structureId": "RootPage"},
                {"id": "r2", "title": "Second"}
            ]
        });
        let parsed: SearchResponse = parse_response(value).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].structure_id, "RootPage");
        assert_eq!(parsed.results[1].structure_id, "");
    }
}
