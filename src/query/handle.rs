use serde::{Deserialize, Serialize};

/// A live reference to exactly one rendered DOM element
///
/// Handles are identified by the element's DOM id as reported by the page-side helpers.
/// They are only valid until the next UI mutation, so they should be used straight away
/// and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle {
    dom_id: String,
}

impl ElementHandle {
    pub fn new(dom_id: impl Into<String>) -> Self {
        Self { dom_id: dom_id.into() }
    }

    /// The DOM id of the element
    pub fn dom_id(&self) -> &str {
        &self.dom_id
    }

    /// CSS selector matching exactly this element
    ///
    /// Uses an attribute selector since Ext generated ids may contain characters that
    /// are not valid in an `#id` selector.
    pub fn css_selector(&self) -> String {
        format!("[id=\"{}\"]", self.dom_id.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
