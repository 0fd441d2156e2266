use serde::{Deserialize, Serialize};
use std::fmt;

/// A component query identifying zero or more live UI components
///
/// The query is an opaque string in the page's component query language. It is never
/// cached against live components: every use re-evaluates it against the current UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentQuery(String);

impl ComponentQuery {
    /// Create a query from a raw selector (e.g. `"button"` or `"form#login"`)
    pub fn new(selector: impl Into<String>) -> Self {
        Self(selector.into())
    }

    /// Builder method: require an exact attribute match, `[name="value"]`
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.0.push_str(&format!("[{}=\"{}\"]", name, escape_value(value)));
        self
    }

    /// Builder method: require a boolean attribute, `[name=true]`
    pub fn with_flag(mut self, name: &str, value: bool) -> Self {
        self.0.push_str(&format!("[{}={}]", name, value));
        self
    }

    /// Builder method: only components that are currently visible
    pub fn visible(mut self) -> Self {
        self.0.push_str("{isVisible(true)}");
        self
    }

    /// Builder method: only components that are currently enabled
    pub fn enabled(mut self) -> Self {
        self.0.push_str("{isDisabled()===false}");
        self
    }

    /// Builder method: scope this query to descendants of `ancestor`
    pub fn within(self, ancestor: &ComponentQuery) -> Self {
        Self(format!("{} {}", ancestor.0, self.0))
    }

    /// Query for the component named `name` inside this container
    ///
    /// Uses `component` rather than `field` so radio and checkbox groups match too.
    pub fn named_component(&self, name: &str) -> Self {
        ComponentQuery::new("component").with_attribute("name", name).within(self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

impl fmt::Display for ComponentQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentQuery {
    fn from(selector: &str) -> Self {
        Self::new(selector)
    }
}

impl From<String> for ComponentQuery {
    fn from(selector: String) -> Self {
        Self(selector)
    }
}

impl AsRef<str> for ComponentQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
