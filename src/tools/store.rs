use crate::error::Result;
use crate::query::ComponentQuery;
use crate::sync::StoreTracker;
use crate::tools::{Tool, ToolContext, ToolResult, timeout_from_ms};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameters for the wait_for_store tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WaitForStoreParams {
    /// Component query of the component owning the store (grid, combobox, ...)
    pub store_holder_cq: String,

    /// Timeout in milliseconds (default: configured store load timeout)
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Also wait until no requests are in flight (default: false)
    #[serde(default)]
    pub quiet_period: bool,
}

#[derive(Default)]
pub struct WaitForStoreTool;

impl Tool for WaitForStoreTool {
    type Params = WaitForStoreParams;

    fn name(&self) -> &str {
        "wait_for_store"
    }

    fn description(&self) -> &str {
        "Wait until a store has loaded since its load count was last reset"
    }

    fn execute_typed(&self, params: WaitForStoreParams, context: &mut ToolContext) -> Result<ToolResult> {
        let store_holder_cq = ComponentQuery::new(params.store_holder_cq.as_str());
        let stores = StoreTracker::new(context.ctx);

        stores.wait_for_loaded(&store_holder_cq, timeout_from_ms(params.timeout_ms))?;
        if params.quiet_period {
            stores.wait_for_quiet_period()?;
        }

        Ok(ToolResult::success_with(serde_json::json!({
            "load_count": stores.load_count(&store_holder_cq)?,
        })))
    }
}

/// Parameters for the reload_store tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReloadStoreParams {
    /// Component query of the component owning the store
    pub store_holder_cq: String,

    /// Timeout in milliseconds (default: configured store load timeout)
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

#[derive(Default)]
pub struct ReloadStoreTool;

impl Tool for ReloadStoreTool {
    type Params = ReloadStoreParams;

    fn name(&self) -> &str {
        "reload_store"
    }

    fn description(&self) -> &str {
        "Reset a store's load count, reload it and wait for the reload to finish"
    }

    fn execute_typed(&self, params: ReloadStoreParams, context: &mut ToolContext) -> Result<ToolResult> {
        let store_holder_cq = ComponentQuery::new(params.store_holder_cq.as_str());

        StoreTracker::new(context.ctx).trigger_reload_and_wait(&store_holder_cq, timeout_from_ms(params.timeout_ms))?;

        Ok(ToolResult::success())
    }
}

/// Parameters for the check_store tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CheckStoreParams {
    /// Component query of the component owning the store
    pub store_holder_cq: String,

    /// Partial record data that must each match a record in the store
    pub data: Vec<Map<String, Value>>,

    /// Fail if the store holds records beyond the expected data (default: false)
    #[serde(default)]
    pub only: bool,
}

#[derive(Default)]
pub struct CheckStoreTool;

impl Tool for CheckStoreTool {
    type Params = CheckStoreParams;

    fn name(&self) -> &str {
        "check_store"
    }

    fn description(&self) -> &str {
        "Check that a store holds records matching the expected data"
    }

    fn execute_typed(&self, params: CheckStoreParams, context: &mut ToolContext) -> Result<ToolResult> {
        let store_holder_cq = ComponentQuery::new(params.store_holder_cq.as_str());

        StoreTracker::new(context.ctx).check_store_contains(&store_holder_cq, &params.data, params.only)?;

        Ok(ToolResult::success_with(serde_json::json!({ "checked": params.data.len() })))
    }
}
