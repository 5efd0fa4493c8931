//! Save markdown text to today's daily note

use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use cap_api::{OutboundCall, SaveToDailyNoteRequest};
use cap_core::{Error, Result};

use crate::adapter::{validate_space_id, ApiCall, SpaceUse};

/// Maximum markdown length accepted by the upstream endpoint
pub const MAX_TEXT_LEN: usize = 200_000;

/// Preview length in the confirmation reply
const PREVIEW_LEN: usize = 200;

/// Arguments for `capacities_save_to_daily_note`
#[derive(Debug, Deserialize)]
pub struct DailyNoteArgs {
    /// Markdown text to append
    pub text: String,
    /// Target space override
    #[serde(rename = "spaceId")]
    pub space_id: Option<String>,
    /// Suppress the automatic timestamp prefix
    #[serde(rename = "noTimestamp", default)]
    pub no_timestamp: bool,
}

/// `capacities_save_to_daily_note`: append markdown to the date-keyed
/// daily note of the resolved space
pub struct DailyNoteCall;

impl ApiCall for DailyNoteCall {
    type Args = DailyNoteArgs;

    fn name(&self) -> &'static str {
        "capacities_save_to_daily_note"
    }

    fn description(&self) -> &'static str {
        "Save markdown text to today's daily note in a Capacities space. \
         Appends to the existing note; an automatic timestamp prefix can be \
         suppressed with noTimestamp."
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Markdown text to append to today's daily note",
                    "minLength": 1,
                    "maxLength": MAX_TEXT_LEN
                },
                "spaceId": {
                    "type": "string",
                    "description": "Space to save to (defaults to the configured space)"
                },
                "noTimestamp": {
                    "type": "boolean",
                    "description": "Suppress the automatic timestamp prefix (default: false)"
                }
            },
            "required": ["text"]
        })
    }

    fn validate(&self, args: &Self::Args) -> Result<()> {
        if args.text.trim().is_empty() {
            return Err(Error::InvalidInput("text must not be empty".to_string()));
        }
        if args.text.chars().count() > MAX_TEXT_LEN {
            return Err(Error::InvalidInput(format!(
                "text exceeds the maximum length of {} characters",
                MAX_TEXT_LEN
            )));
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
        let body = serde_json::to_value(SaveToDailyNoteRequest {
            space_id: space_id.unwrap_or_default().to_string(),
            md_text: args.text.clone(),
            no_time_stamp: args.no_timestamp,
        })?;
        Ok(OutboundCall::post("/save-to-daily-note", body))
    }

    fn format(&self, args: &Self::Args, _response: JsonValue) -> Result<String> {
        // The endpoint replies with an empty body on success
        Ok(format!("Saved to daily note:\n{}", preview(&args.text)))
    }
}

/// Full text if it fits, otherwise the first `PREVIEW_LEN` characters
/// followed by an ellipsis marker
fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_LEN {
        return text.to_string();
    }
    let mut out: String = text.chars().take(PREVIEW_LEN).collect();
    out.push_str("...");
    out
}
