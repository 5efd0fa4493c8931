//! Search existing content by title within one space

use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use cap_api::{types, OutboundCall, SearchRequest, SearchResponse};
use cap_core::{Error, Result};

use crate::adapter::{validate_space_id, ApiCall, SpaceUse};

/// Arguments for `capacities_lookup`
#[derive(Debug, Deserialize)]
pub struct LookupArgs {
    /// Term matched against content titles
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    /// Target space override
    #[serde(rename = "spaceId")]
    pub space_id: Option<String>,
}

/// `capacities_lookup`: title search within the resolved space
pub struct LookupCall;

impl ApiCall for LookupCall {
    type Args = LookupArgs;

    fn name(&self) -> &'static str {
        "capacities_lookup"
    }

    fn description(&self) -> &'static str {
        "Search existing content in a Capacities space by title. Returns \
         matching objects with their IDs and content types."
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "searchTerm": {
                    "type": "string",
                    "description": "Term to match against content titles",
                    "minLength": 1
                },
                "spaceId": {
                    "type": "string",
                    "description": "Space to search in (defaults to the configured space)"
                }
            },
            "required": ["searchTerm"]
        })
    }

    fn validate(&self, args: &Self::Args) -> Result<()> {
        if args.search_term.trim().is_empty() {
            return Err(Error::InvalidInput(
                "searchTerm must not be empty".to_string(),
            ));
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
        let body = serde_json::to_value(SearchRequest::by_title(
            args.search_term.clone(),
            space_id.unwrap_or_default(),
        ))?;
        Ok(OutboundCall::post("/lookup", body))
    }

    fn format(&self, args: &Self::Args, response: JsonValue) -> Result<String> {
        let parsed: SearchResponse = types::parse_response(response)?;
        if parsed.results.is_empty() {
            return Ok(format!("No results found for \"{}\"", args.search_term));
        }

        let mut out = format!(
            "Found {} result(s) for \"{}\":\n",
            parsed.results.len(),
            args.search_term
        );
        for result in &parsed.results {
            out.push_str(&format!(
                "- {} ({}) [{}]\n",
                result.title, result.id, result.structure_id
            ));
        }
        Ok(out.trim_end().to_string())
    }
}
