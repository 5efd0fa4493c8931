//! Save a web link with optional metadata overrides

use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use url::Url;

use cap_api::{types, OutboundCall, SaveWeblinkRequest, WeblinkResponse};
use cap_core::{Error, Result};

use crate::adapter::{validate_space_id, ApiCall, SpaceUse};

/// Maximum markdown length for the notes field
pub const MAX_NOTES_LEN: usize = 200_000;

/// Maximum number of tags per weblink
pub const MAX_TAGS: usize = 30;

/// Arguments for `capacities_save_weblink`
#[derive(Debug, Deserialize)]
pub struct WeblinkArgs {
    /// The link to save
    pub url: String,
    /// Title override
    pub title: Option<String>,
    /// Description override
    pub description: Option<String>,
    /// Markdown notes attached to the weblink
    pub notes: Option<String>,
    /// Tags applied to the weblink
    pub tags: Option<Vec<String>>,
    /// Target space override
    #[serde(rename = "spaceId")]
    pub space_id: Option<String>,
}

/// `capacities_save_weblink`: store a URL in the resolved space, with any
/// provided overrides mapped to the upstream field names
pub struct WeblinkCall;

impl ApiCall for WeblinkCall {
    type Args = WeblinkArgs;

    fn name(&self) -> &'static str {
        "capacities_save_weblink"
    }

    fn description(&self) -> &'static str {
        "Save a web link to a Capacities space. Title and description are \
         resolved by Capacities unless overridden; markdown notes and tags \
         are optional."
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL to save"
                },
                "title": {
                    "type": "string",
                    "description": "Override for the resolved page title"
                },
                "description": {
                    "type": "string",
                    "description": "Override for the resolved page description"
                },
                "notes": {
                    "type": "string",
                    "description": "Markdown notes to attach",
                    "maxLength": MAX_NOTES_LEN
                },
                "tags": {
                    "type": "array",
                    "items": {"type": "string"},
                    "maxItems": MAX_TAGS,
                    "description": "Tags to apply (created if they do not exist)"
                },
                "spaceId": {
                    "type": "string",
                    "description": "Space to save to (defaults to the configured space)"
                }
            },
            "required": ["url"]
        })
    }

    fn validate(&self, args: &Self::Args) -> Result<()> {
        Url::parse(&args.url)
            .map_err(|e| Error::InvalidInput(format!("url is not a valid URL: {}", e)))?;

        if let Some(notes) = &args.notes {
            if notes.chars().count() > MAX_NOTES_LEN {
                return Err(Error::InvalidInput(format!(
                    "notes exceed the maximum length of {} characters",
                    MAX_NOTES_LEN
                )));
            }
        }
        if let Some(tags) = &args.tags {
            if tags.len() > MAX_TAGS {
                return Err(Error::InvalidInput(format!(
                    "at most {} tags are allowed",
                    MAX_TAGS
                )));
            }
        }
        if let Some(space_id) = &args.space_id {
            validate_space_id(space_id)?;
        }
        Ok(())
    }

    fn space<'a>(&self, args: &'a Self::Args) -> SpaceUse<'a> {
        SpaceUse::Required(args.space_id.as_deref())
    }

    fn request(&self, args: &Self::Args, space_id: Option<&str>) -> Result<OutboundCall> {
        let body = serde_json::to_value(SaveWeblinkRequest {
            space_id: space_id.unwrap_or_default().to_string(),
            url: args.url.clone(),
            title_overwrite: args.title.clone(),
            description_overwrite: args.description.clone(),
            md_text: args.notes.clone(),
            tags: args.tags.clone(),
        })?;
        Ok(OutboundCall::post("/save-weblink", body))
    }

    fn format(&self, args: &Self::Args, response: JsonValue) -> Result<String> {
        let parsed: WeblinkResponse = types::parse_response(response)?;
        let title = parsed
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| args.url.clone());
        let id = parsed
            .id
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| "n/a".to_string());

        Ok(format!(
            "Saved weblink: {}\nURL: {}\nID: {}",
            title, args.url, id
        ))
    }
}
