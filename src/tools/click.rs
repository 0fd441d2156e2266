use crate::error::Result;
use crate::query::{ComponentQuery, QueryEvaluator};
use crate::sync::GridNavigator;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the click tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClickParams {
    /// Component query of the component to click
    pub cq: String,

    /// DOM id of a container to search within
    #[serde(default)]
    pub root_id: Option<String>,
}

/// Tool for clicking components
#[derive(Default)]
pub struct ClickTool;

impl Tool for ClickTool {
    type Params = ClickParams;

    fn name(&self) -> &str {
        "click"
    }

    fn description(&self) -> &str {
        "Wait for a single visible, enabled component and click it"
    }

    fn execute_typed(&self, params: ClickParams, context: &mut ToolContext) -> Result<ToolResult> {
        let cq = ComponentQuery::new(params.cq.as_str());

        QueryEvaluator::new(context.ctx).click_component(&cq, params.root_id.as_deref())?;

        Ok(ToolResult::success_with(serde_json::json!({ "cq": params.cq })))
    }
}

/// Parameters for the click_column_header tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClickColumnHeaderParams {
    /// Component query of the grid
    pub grid_cq: String,

    /// Header text or dataIndex of the column
    pub column: String,
}

#[derive(Default)]
pub struct ClickColumnHeaderTool;

impl Tool for ClickColumnHeaderTool {
    type Params = ClickColumnHeaderParams;

    fn name(&self) -> &str {
        "click_column_header"
    }

    fn description(&self) -> &str {
        "Click a grid column header, found by header text or dataIndex"
    }

    fn execute_typed(&self, params: ClickColumnHeaderParams, context: &mut ToolContext) -> Result<ToolResult> {
        let grid_cq = ComponentQuery::new(params.grid_cq.as_str());

        GridNavigator::new(context.ctx).click_column_header(&grid_cq, &params.column)?;

        Ok(ToolResult::success_with(serde_json::json!({ "column": params.column })))
    }
}
