use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

/// Identifies a tree node either by its display text or by a partial record match
///
/// Node keys are never live handles: trees destroy and recreate node elements on every
/// reload, so the key is re-resolved each time it is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum NodeKey {
    Text(String),
    Data(Map<String, Value>),
}

impl NodeKey {
    /// Encoding understood by the page-side tree helpers
    pub fn to_wire(&self) -> Value {
        match self {
            NodeKey::Text(text) => json!({ "text": text }),
            NodeKey::Data(data) => json!({ "data": data }),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Text(text) => f.write_str(text),
            NodeKey::Data(data) => write!(f, "{}", Value::Object(data.clone())),
        }
    }
}

impl From<&str> for NodeKey {
    fn from(text: &str) -> Self {
        NodeKey::Text(text.to_string())
    }
}

impl From<Map<String, Value>> for NodeKey {
    fn from(data: Map<String, Value>) -> Self {
        NodeKey::Data(data)
    }
}

/// A field on a form addressed by zero-based position or by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FieldRef {
    Index(usize),
    Name(String),
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Index(index) => write!(f, "{}", index),
            FieldRef::Name(name) => write!(f, "'{}'", name),
        }
    }
}

impl From<usize> for FieldRef {
    fn from(index: usize) -> Self {
        FieldRef::Index(index)
    }
}

impl From<&str> for FieldRef {
    fn from(name: &str) -> Self {
        FieldRef::Name(name.to_string())
    }
}
