//! cap-tools: Capacities tools for the MCP gateway
//!
//! Four tools sharing one validate → resolve → invoke → format skeleton
//! (`adapter::ApiTool`). Each tool module contributes a declarative
//! `ApiCall`: argument shape, bounds, request mapping, and formatter.

use std::sync::Arc;

use cap_api::CapacitiesClient;
use cap_core::ToolManager;

pub mod adapter;
pub mod daily_note;
pub mod lookup;
pub mod spaces;
pub mod weblink;

pub use adapter::{ApiCall, ApiTool, SpaceUse};
pub use daily_note::DailyNoteCall;
pub use lookup::LookupCall;
pub use spaces::SpacesCall;
pub use weblink::WeblinkCall;

/// Register all Capacities tools with the tool manager
pub fn register_capacities_tools(
    manager: &mut ToolManager,
    client: Arc<CapacitiesClient>,
    default_space_id: Option<String>,
) {
    manager.register(Arc::new(ApiTool::new(
        DailyNoteCall,
        Arc::clone(&client),
        default_space_id.clone(),
    )));
    manager.register(Arc::new(ApiTool::new(
        WeblinkCall,
        Arc::clone(&client),
        default_space_id.clone(),
    )));
    manager.register(Arc::new(ApiTool::new(
        SpacesCall,
        Arc::clone(&client),
        default_space_id.clone(),
    )));
    manager.register(Arc::new(ApiTool::new(LookupCall, client, default_space_id)));
}
