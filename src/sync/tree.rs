//! Tree node lookup and the lazy-load retry protocol
//!
//! Tree nodes load their children lazily and re-render on every reload, so nodes are
//! always found by key and every accessor first waits for the tree to stop loading.
//! [`TreeNavigator::wait_for_node`] handles nodes that appear only after the server has
//! caught up: each time the node is missing, its parent is reloaded before the next look.

use crate::error::{BrowserError, Result};
use crate::query::{ComponentQuery, ElementHandle, NodeKey};
use crate::rpc::HelperCall;
use crate::sync::Context;
use crate::sync::poller;
use std::time::Duration;

/// The part of a node's row to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodePart {
    Icon,
    Text,
    Expander,
    /// Any element of the row matching a CSS selector
    Css(String),
}

impl NodePart {
    pub fn css_query(&self) -> &str {
        match self {
            NodePart::Icon => ".x-tree-icon",
            NodePart::Text => ".x-tree-node-text",
            NodePart::Expander => ".x-tree-expander",
            NodePart::Css(css) => css,
        }
    }
}

/// Finds, reloads and right-clicks tree nodes
pub struct TreeNavigator<'a> {
    ctx: Context<'a>,
}

impl<'a> TreeNavigator<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    pub fn is_tree_loading(&self, tree_cq: &ComponentQuery) -> Result<bool> {
        self.ctx.oracle.call_bool(&HelperCall::IsTreeLoading { tree_cq: tree_cq.to_string() })
    }

    /// Block until the tree is idle, confirmed by a second look after the grace delay
    pub fn wait_until_tree_not_loading(&self, tree_cq: &ComponentQuery) -> Result<()> {
        let description = format!("tree '{}' to finish loading", tree_cq);
        poller::wait_until_idle(&description, self.ctx.config.tree_idle_wait, self.ctx.config.tree_recheck(), || {
            self.is_tree_loading(tree_cq)
        })
    }

    /// Resolve a part of the node's row, `None` if the node is not rendered
    pub fn get_node_element(&self, tree_cq: &ComponentQuery, node: &NodeKey, part: &NodePart) -> Result<Option<ElementHandle>> {
        self.wait_until_tree_not_loading(tree_cq)?;

        self.ctx.oracle.call_handle(&HelperCall::GetNodeElement {
            tree_cq: tree_cq.to_string(),
            node: node.clone(),
            css_query: part.css_query().to_string(),
        })
    }

    pub fn get_node_icon_element(&self, tree_cq: &ComponentQuery, node: &NodeKey) -> Result<Option<ElementHandle>> {
        self.get_node_element(tree_cq, node, &NodePart::Icon)
    }

    pub fn get_node_text_element(&self, tree_cq: &ComponentQuery, node: &NodeKey) -> Result<Option<ElementHandle>> {
        self.get_node_element(tree_cq, node, &NodePart::Text)
    }

    pub fn get_node_expander_element(&self, tree_cq: &ComponentQuery, node: &NodeKey) -> Result<Option<ElementHandle>> {
        self.get_node_element(tree_cq, node, &NodePart::Expander)
    }

    /// Reload a node and its children
    pub fn reload_node(&self, tree_cq: &ComponentQuery, node: &NodeKey) -> Result<()> {
        self.wait_until_tree_not_loading(tree_cq)?;
        self.request_reload(tree_cq, node)
    }

    /// Reload without waiting for the tree to be idle; the caller has just seen it idle
    fn request_reload(&self, tree_cq: &ComponentQuery, node: &NodeKey) -> Result<()> {
        log::info!("Reloading node '{}' on tree with CQ '{}'", node, tree_cq);
        let reloaded = self
            .ctx
            .oracle
            .call_bool(&HelperCall::ReloadNode { tree_cq: tree_cq.to_string(), node: node.clone() })?;

        if !reloaded {
            log::warn!("Node '{}' on tree with CQ '{}' was not found to reload", node, tree_cq);
        }

        Ok(())
    }

    /// Right-click the node's icon
    pub fn open_node_context_menu(&self, tree_cq: &ComponentQuery, node: &NodeKey) -> Result<()> {
        let icon = self.get_node_icon_element(tree_cq, node)?.ok_or_else(|| BrowserError::NodeNotFound {
            tree_cq: tree_cq.to_string(),
            node: node.to_string(),
        })?;

        log::info!("Opening context menu on node '{}' on tree with CQ '{}'", node, tree_cq);
        self.ctx.input.move_to(&icon)?;
        self.ctx.input.context_click(&icon)
    }

    /// Wait for `node` to appear under `parent`, reloading the parent each time it is missing
    ///
    /// The reload happens inside the same poll tick that saw the node missing, so the
    /// number of reloads is bounded by timeout / poll interval. Each tick waits for the
    /// tree to be idle once, before the lookup. Returns the node's icon.
    pub fn wait_for_node(
        &self,
        tree_cq: &ComponentQuery,
        node: &NodeKey,
        parent: &NodeKey,
        timeout: Option<Duration>,
    ) -> Result<ElementHandle> {
        let mut options = self.ctx.config.node_wait;
        if let Some(timeout) = timeout {
            options = options.timeout(timeout);
        }

        let description = format!("node '{}' under '{}' on tree with CQ '{}'", node, parent, tree_cq);
        poller::poll_for(&description, options, || {
            if let Some(icon) = self.get_node_icon_element(tree_cq, node)? {
                return Ok(Some(icon));
            }

            self.request_reload(tree_cq, parent)?;
            Ok(None)
        })
    }
}
