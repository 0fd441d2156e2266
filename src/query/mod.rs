//! Component addressing and the query evaluator
//!
//! This module provides:
//! - ComponentQuery: builder for component query strings
//! - ElementHandle: short-lived reference to a rendered element
//! - NodeKey / FieldRef: keys for tree nodes and form fields
//! - QueryEvaluator: resolves queries through the page-side helpers, with waiting variants

pub mod address;
pub mod handle;
pub mod keys;

pub use address::ComponentQuery;
pub use handle::ElementHandle;
pub use keys::{FieldRef, NodeKey};

use crate::error::{BrowserError, Result};
use crate::rpc::HelperCall;
use crate::sync::Context;
use crate::sync::config::WaitOptions;
use crate::sync::poller;

/// Resolves component queries against the live UI
pub struct QueryEvaluator<'a> {
    ctx: Context<'a>,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    /// Evaluate `cq` once, optionally within the container whose DOM id is `root_id`
    pub fn find(&self, cq: &ComponentQuery, root_id: Option<&str>) -> Result<Vec<ElementHandle>> {
        self.ctx.oracle.call_handles(&HelperCall::Query {
            cq: cq.to_string(),
            root_id: root_id.map(str::to_string),
        })
    }

    /// Wait until `cq` matches exactly one component, returning its element
    pub fn wait_for_single(
        &self,
        cq: &ComponentQuery,
        root_id: Option<&str>,
        options: WaitOptions,
    ) -> Result<ElementHandle> {
        log::debug!("Waiting for single component matching '{}'", cq);

        poller::poll_for(&format!("a single component matching '{}'", cq), options, || {
            let mut found = self.find(cq, root_id)?;
            Ok(if found.len() == 1 { found.pop() } else { None })
        })
    }

    /// Wait until `cq` matches exactly one visible component
    pub fn wait_for_single_visible(
        &self,
        cq: &ComponentQuery,
        root_id: Option<&str>,
        options: WaitOptions,
    ) -> Result<ElementHandle> {
        self.wait_for_single(&cq.clone().visible(), root_id, options)
    }

    /// Wait until `cq` matches exactly one visible and enabled component
    pub fn find_single_visible_and_enabled(&self, cq: &ComponentQuery, options: WaitOptions) -> Result<ElementHandle> {
        self.wait_for_single(&cq.clone().visible().enabled(), None, options)
    }

    /// Like [`wait_for_single`](Self::wait_for_single), but running out of time means the
    /// component is not there
    pub fn require_single(
        &self,
        cq: &ComponentQuery,
        root_id: Option<&str>,
        options: WaitOptions,
    ) -> Result<ElementHandle> {
        self.wait_for_single(cq, root_id, options).map_err(|err| match err {
            BrowserError::ConditionTimeout { .. } => BrowserError::ComponentNotFound { cq: cq.to_string() },
            other => other,
        })
    }

    /// Check whether `cq` currently matches anything
    pub fn exists(&self, cq: &ComponentQuery, root_id: Option<&str>) -> Result<bool> {
        Ok(!self.find(cq, root_id)?.is_empty())
    }

    /// Find a single visible, enabled component and click it the way a user would
    pub fn click_component(&self, cq: &ComponentQuery, root_id: Option<&str>) -> Result<()> {
        let target = cq.clone().enabled();
        let element = self.wait_for_single_visible(&target, root_id, self.ctx.config.component_wait)?;

        log::info!("Clicking component with CQ '{}'", cq);
        self.ctx.input.move_to(&element)?;
        self.ctx.input.click(&element)
    }
}
