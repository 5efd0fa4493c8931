//! List the spaces visible to the configured credential

use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use cap_api::{types, OutboundCall, SpacesResponse};
use cap_core::Result;

use crate::adapter::{ApiCall, SpaceUse};

/// Arguments for `capacities_get_spaces` (none)
#[derive(Debug, Default, Deserialize)]
pub struct SpacesArgs {}

/// `capacities_get_spaces`: list all spaces the API token can see
pub struct SpacesCall;

impl ApiCall for SpacesCall {
    type Args = SpacesArgs;

    fn name(&self) -> &'static str {
        "capacities_get_spaces"
    }

    fn description(&self) -> &'static str {
        "List all Capacities spaces visible to the configured API token, \
         with their titles and space IDs."
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    fn validate(&self, _args: &Self::Args) -> Result<()> {
        Ok(())
    }

    fn space<'a>(&self, _args: &'a Self::Args) -> SpaceUse<'a> {
        SpaceUse::NotNeeded
    }

    fn request(&self, _args: &Self::Args, _space_id: Option<&str>) -> Result<OutboundCall> {
        Ok(OutboundCall::get("/spaces"))
    }

    fn format(&self, _args: &Self::Args, response: JsonValue) -> Result<String> {
        let parsed: SpacesResponse = types::parse_response(response)?;
        if parsed.spaces.is_empty() {
            return Ok("No spaces are visible to this API token.".to_string());
        }

        let mut out = String::from("Your Capacities spaces:\n");
        for space in &parsed.spaces {
            out.push_str(&format!("- {} ({})\n", space.title, space.id));
        }
        Ok(out.trim_end().to_string())
    }
}
