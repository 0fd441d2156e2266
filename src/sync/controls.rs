//! Buttons, message boxes and menu items, found by their text

use crate::error::Result;
use crate::query::{ComponentQuery, QueryEvaluator};
use crate::sync::Context;

/// Query for a component of `xtype` labelled `text`, with its disabled state pinned
fn labelled(xtype: &str, text: &str, disabled: bool) -> ComponentQuery {
    ComponentQuery::new(xtype).with_attribute("text", text).with_flag("disabled", disabled)
}

/// Clicks and checks buttons
pub struct Buttons<'a> {
    ctx: Context<'a>,
}

impl<'a> Buttons<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    fn query(&self) -> QueryEvaluator<'a> {
        QueryEvaluator::new(self.ctx)
    }

    /// Click the single visible, enabled button labelled `text`
    pub fn click_button_by_text(&self, text: &str, root_id: Option<&str>) -> Result<()> {
        self.query().click_component(&labelled("button", text, false), root_id)
    }

    /// Click a button on the visible message box, usually "OK"
    pub fn click_button_on_messagebox(&self, text: &str) -> Result<()> {
        let messagebox = ComponentQuery::new("messagebox").visible();
        let button = ComponentQuery::new("button").with_attribute("text", text).within(&messagebox);
        self.query().click_component(&button, None)
    }

    /// Fail with `ComponentNotFound` unless an enabled button labelled `text` shows up
    pub fn check_button_enabled(&self, text: &str, root_id: Option<&str>) -> Result<()> {
        self.query().require_single(&labelled("button", text, false), root_id, self.ctx.config.component_wait)?;
        Ok(())
    }

    pub fn check_button_disabled(&self, text: &str, root_id: Option<&str>) -> Result<()> {
        self.query().require_single(&labelled("button", text, true), root_id, self.ctx.config.component_wait)?;
        Ok(())
    }
}

/// Clicks and checks menu items
pub struct Menus<'a> {
    ctx: Context<'a>,
}

impl<'a> Menus<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    fn query(&self) -> QueryEvaluator<'a> {
        QueryEvaluator::new(self.ctx)
    }

    /// Click the single visible menu item matching `cq`
    pub fn click_menu_item(&self, cq: &ComponentQuery, root_id: Option<&str>) -> Result<()> {
        let item = self.query().wait_for_single_visible(cq, root_id, self.ctx.config.component_wait)?;

        log::info!("Clicking menu item with CQ '{}'", cq);
        self.ctx.input.move_to(&item)?;
        self.ctx.input.click(&item)
    }

    /// Click the visible, enabled menu item labelled `text`
    pub fn click_menu_item_by_text(&self, text: &str, root_id: Option<&str>) -> Result<()> {
        self.click_menu_item(&labelled("menuitem", text, false), root_id)
    }

    pub fn check_menu_item_enabled(&self, text: &str, root_id: Option<&str>) -> Result<()> {
        self.query().require_single(&labelled("menuitem", text, false), root_id, self.ctx.config.component_wait)?;
        Ok(())
    }

    pub fn check_menu_item_disabled(&self, text: &str, root_id: Option<&str>) -> Result<()> {
        self.query().require_single(&labelled("menuitem", text, true), root_id, self.ctx.config.component_wait)?;
        Ok(())
    }
}
