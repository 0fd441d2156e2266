//! Engine operations exposed as named tools with JSON parameters
//!
//! Each tool deserializes its parameters into a typed struct with a JSON schema, runs
//! one engine operation and reports the outcome as a [`ToolResult`]. The registry is
//! what the `ext-driver` binary uses to run step scripts.

pub mod click;
pub mod controls;
pub mod field;
pub mod store;
pub mod tree;

pub use click::{ClickColumnHeaderTool, ClickTool};
pub use controls::{CheckButtonTool, CheckMenuItemTool, ClickButtonTool, ClickMenuItemTool, ClickMessageBoxButtonTool};
pub use field::{FillFormTool, FocusFieldTool, GetFieldTool, SetFieldTool};
pub use store::{CheckStoreTool, ReloadStoreTool, WaitForStoreTool};
pub use tree::{OpenNodeMenuTool, WaitForNodeTool};

use crate::error::{BrowserError, Result};
use crate::sync::Context;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// What a tool operates on
pub struct ToolContext<'a> {
    pub ctx: Context<'a>,
}

impl<'a> ToolContext<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }
}

/// Outcome of a tool execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success() -> Self {
        Self { success: true, data: None, error: None }
    }

    pub fn success_with(data: Value) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }
}

/// A single engine operation with typed parameters
pub trait Tool: Default {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// JSON schema of the parameters
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }
}

/// Object-safe view of a [`Tool`] so tools with different parameter types share a registry
pub trait DynTool {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameters_schema(&self) -> Value;

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn description(&self) -> &str {
        Tool::description(self)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let params: T::Params = serde_json::from_value(params).map_err(|e| BrowserError::ToolExecutionFailed {
            tool: Tool::name(self).to_string(),
            reason: format!("Invalid parameters: {}", e),
        })?;

        self.execute_typed(params, context)
    }
}

/// Tools by name, in registration order
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: IndexMap::new() }
    }

    /// A registry holding every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(SetFieldTool);
        registry.register(GetFieldTool);
        registry.register(FocusFieldTool);
        registry.register(FillFormTool);
        registry.register(WaitForStoreTool);
        registry.register(ReloadStoreTool);
        registry.register(CheckStoreTool);
        registry.register(WaitForNodeTool);
        registry.register(OpenNodeMenuTool);
        registry.register(ClickTool);
        registry.register(ClickButtonTool);
        registry.register(CheckButtonTool);
        registry.register(ClickMessageBoxButtonTool);
        registry.register(ClickMenuItemTool);
        registry.register(CheckMenuItemTool);
        registry.register(ClickColumnHeaderTool);

        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn list_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Name, description and parameter schema of every tool
    pub fn describe(&self) -> Value {
        Value::Array(
            self.tools
                .values()
                .map(|tool| {
                    serde_json::json!({
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters_schema(),
                    })
                })
                .collect(),
        )
    }

    /// Execute a tool by name
    pub fn execute(&self, name: &str, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let tool = self.get(name).ok_or_else(|| BrowserError::ToolExecutionFailed {
            tool: name.to_string(),
            reason: "No tool with this name is registered".to_string(),
        })?;

        log::debug!("Executing tool '{}'", name);
        tool.execute(params, context)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Optional millisecond timeout parameter as a duration
pub(crate) fn timeout_from_ms(timeout_ms: Option<u64>) -> Option<Duration> {
    timeout_ms.map(Duration::from_millis)
}
