use crate::error::Result;
use crate::query::{ComponentQuery, NodeKey};
use crate::sync::TreeNavigator;
use crate::tools::{Tool, ToolContext, ToolResult, timeout_from_ms};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the wait_for_node tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WaitForNodeParams {
    /// Component query of the tree
    pub tree_cq: String,

    /// Node text, or partial node data
    pub node: NodeKey,

    /// Parent node to reload while the node is missing
    pub parent: NodeKey,

    /// Timeout in milliseconds (default: configured node timeout)
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

#[derive(Default)]
pub struct WaitForNodeTool;

impl Tool for WaitForNodeTool {
    type Params = WaitForNodeParams;

    fn name(&self) -> &str {
        "wait_for_node"
    }

    fn description(&self) -> &str {
        "Wait for a tree node to appear, reloading its parent until it does"
    }

    fn execute_typed(&self, params: WaitForNodeParams, context: &mut ToolContext) -> Result<ToolResult> {
        let tree_cq = ComponentQuery::new(params.tree_cq.as_str());

        let icon = TreeNavigator::new(context.ctx).wait_for_node(
            &tree_cq,
            &params.node,
            &params.parent,
            timeout_from_ms(params.timeout_ms),
        )?;

        Ok(ToolResult::success_with(serde_json::json!({ "element_id": icon.dom_id() })))
    }
}

/// Parameters for the open_node_menu tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OpenNodeMenuParams {
    /// Component query of the tree
    pub tree_cq: String,

    /// Node text, or partial node data
    pub node: NodeKey,
}

#[derive(Default)]
pub struct OpenNodeMenuTool;

impl Tool for OpenNodeMenuTool {
    type Params = OpenNodeMenuParams;

    fn name(&self) -> &str {
        "open_node_menu"
    }

    fn description(&self) -> &str {
        "Open the context menu of a tree node"
    }

    fn execute_typed(&self, params: OpenNodeMenuParams, context: &mut ToolContext) -> Result<ToolResult> {
        let tree_cq = ComponentQuery::new(params.tree_cq.as_str());

        TreeNavigator::new(context.ctx).open_node_context_menu(&tree_cq, &params.node)?;

        Ok(ToolResult::success())
    }
}
