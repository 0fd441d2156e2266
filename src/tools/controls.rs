use crate::error::Result;
use crate::query::ComponentQuery;
use crate::sync::{Buttons, Menus};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the click_button tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClickButtonParams {
    /// Text on the button
    pub text: String,

    /// DOM id of a container to search within
    #[serde(default)]
    pub root_id: Option<String>,
}

#[derive(Default)]
pub struct ClickButtonTool;

impl Tool for ClickButtonTool {
    type Params = ClickButtonParams;

    fn name(&self) -> &str {
        "click_button"
    }

    fn description(&self) -> &str {
        "Click the visible, enabled button with the given text"
    }

    fn execute_typed(&self, params: ClickButtonParams, context: &mut ToolContext) -> Result<ToolResult> {
        Buttons::new(context.ctx).click_button_by_text(&params.text, params.root_id.as_deref())?;
        Ok(ToolResult::success_with(serde_json::json!({ "text": params.text })))
    }
}

/// Parameters for the click_messagebox_button tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClickMessageBoxButtonParams {
    /// Text on the button (default: "OK")
    #[serde(default = "default_ok")]
    pub text: String,
}

fn default_ok() -> String {
    "OK".to_string()
}

#[derive(Default)]
pub struct ClickMessageBoxButtonTool;

impl Tool for ClickMessageBoxButtonTool {
    type Params = ClickMessageBoxButtonParams;

    fn name(&self) -> &str {
        "click_messagebox_button"
    }

    fn description(&self) -> &str {
        "Click a button on the visible message box"
    }

    fn execute_typed(&self, params: ClickMessageBoxButtonParams, context: &mut ToolContext) -> Result<ToolResult> {
        Buttons::new(context.ctx).click_button_on_messagebox(&params.text)?;
        Ok(ToolResult::success_with(serde_json::json!({ "text": params.text })))
    }
}

/// Parameters for the check_button and check_menu_item tools
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CheckControlParams {
    /// Text on the button or menu item
    pub text: String,

    /// Expect the control to be enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// DOM id of a container to search within
    #[serde(default)]
    pub root_id: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Default)]
pub struct CheckButtonTool;

impl Tool for CheckButtonTool {
    type Params = CheckControlParams;

    fn name(&self) -> &str {
        "check_button"
    }

    fn description(&self) -> &str {
        "Check that a button with the given text is enabled, or disabled"
    }

    fn execute_typed(&self, params: CheckControlParams, context: &mut ToolContext) -> Result<ToolResult> {
        let buttons = Buttons::new(context.ctx);
        let root_id = params.root_id.as_deref();

        if params.enabled {
            buttons.check_button_enabled(&params.text, root_id)?;
        } else {
            buttons.check_button_disabled(&params.text, root_id)?;
        }

        Ok(ToolResult::success())
    }
}

/// Parameters for the click_menu_item tool; give either `text` or `cq`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClickMenuItemParams {
    /// Text on an enabled menu item
    #[serde(default)]
    pub text: Option<String>,

    /// Component query of the menu item
    #[serde(default)]
    pub cq: Option<String>,

    /// DOM id of a container to search within
    #[serde(default)]
    pub root_id: Option<String>,
}

#[derive(Default)]
pub struct ClickMenuItemTool;

impl Tool for ClickMenuItemTool {
    type Params = ClickMenuItemParams;

    fn name(&self) -> &str {
        "click_menu_item"
    }

    fn description(&self) -> &str {
        "Click a visible menu item, by text or by component query"
    }

    fn execute_typed(&self, params: ClickMenuItemParams, context: &mut ToolContext) -> Result<ToolResult> {
        let menus = Menus::new(context.ctx);
        let root_id = params.root_id.as_deref();

        match (&params.text, &params.cq) {
            (Some(text), None) => menus.click_menu_item_by_text(text, root_id)?,
            (None, Some(cq)) => menus.click_menu_item(&ComponentQuery::new(cq.as_str()), root_id)?,
            _ => return Ok(ToolResult::failure("Give exactly one of 'text' or 'cq'")),
        }

        Ok(ToolResult::success())
    }
}

#[derive(Default)]
pub struct CheckMenuItemTool;

impl Tool for CheckMenuItemTool {
    type Params = CheckControlParams;

    fn name(&self) -> &str {
        "check_menu_item"
    }

    fn description(&self) -> &str {
        "Check that a menu item with the given text is enabled, or disabled"
    }

    fn execute_typed(&self, params: CheckControlParams, context: &mut ToolContext) -> Result<ToolResult> {
        let menus = Menus::new(context.ctx);
        let root_id = params.root_id.as_deref();

        if params.enabled {
            menus.check_menu_item_enabled(&params.text, root_id)?;
        } else {
            menus.check_menu_item_disabled(&params.text, root_id)?;
        }

        Ok(ToolResult::success())
    }
}
