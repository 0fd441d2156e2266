use crate::error::{BrowserError, Result};
use crate::query::{ComponentQuery, QueryEvaluator};
use crate::rpc::HelperCall;
use crate::sync::Context;

/// Grid panel interactions
pub struct GridNavigator<'a> {
    ctx: Context<'a>,
}

impl<'a> GridNavigator<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    /// Click the header of the column whose text or dataIndex is `column`
    ///
    /// Waits for the grid to be the single visible match first.
    pub fn click_column_header(&self, grid_cq: &ComponentQuery, column: &str) -> Result<()> {
        QueryEvaluator::new(self.ctx).wait_for_single_visible(grid_cq, None, self.ctx.config.component_wait)?;

        let header = self
            .ctx
            .oracle
            .call_handle(&HelperCall::GetColumnHeader { grid_cq: grid_cq.to_string(), column: column.to_string() })?
            .ok_or_else(|| BrowserError::ColumnNotFound { grid_cq: grid_cq.to_string(), column: column.to_string() })?;

        log::info!("Clicking column header '{}' on grid with CQ '{}'", column, grid_cq);
        self.ctx.input.move_to(&header)?;
        self.ctx.input.click(&header)
    }
}
