//! # ext-driver
//!
//! A Rust library for driving asynchronously rendering Ext JS user interfaces via Chrome
//! DevTools Protocol (CDP) without racing the UI.
//!
//! ## Features
//!
//! - **Condition Poller**: every wait is a timeout-bounded poll of a live observation
//! - **Store Load Tracking**: reset a store's load counter, act, then wait for a fresh load
//! - **Field Assignment**: type, assign or select store records depending on the field kind
//! - **Tree Lazy Loading**: wait for tree nodes, reloading their parent until they appear
//! - **Controls**: buttons, message boxes, menu items and grid column headers
//! - **Tool System**: engine operations as named tools with JSON schemas, used by the CLI
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use ext_driver::{BrowserSession, ConnectionOptions, FieldDescriptor, SyncConfig, ValueSpec};
//! use serde_json::json;
//!
//! # fn main() -> ext_driver::Result<()> {
//! let options = ConnectionOptions::new("ws://127.0.0.1:9222/devtools/browser/abc").helper_script("js/helpers.js");
//! let session = BrowserSession::connect(options)?;
//! let driver = session.ext_driver(SyncConfig::default())?;
//!
//! // Typed character by character
//! driver.fields().set_field_value(&FieldDescriptor::new("form#pets", "age"), &ValueSpec::from(4_i64))?;
//!
//! // Filtered remotely, then the matching record is selected
//! let species = FieldDescriptor::new("form#pets", "species");
//! let stoat = ValueSpec::from_json(json!({"filterText": "Sto", "value": {"name": "Stoat"}}))?;
//! driver.fields().set_field_value(&species, &stoat)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser connection and the Chrome-backed UI backend
//! - [`query`]: Component queries, element handles and the query evaluator
//! - [`rpc`]: The page-side helper catalog and the [`UiOracle`] / [`InputDevice`] traits
//! - [`sync`]: The synchronization engine
//! - [`tools`]: Engine operations as tools
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod error;
pub mod query;
pub mod rpc;
pub mod sync;
pub mod tools;

pub use browser::{BrowserSession, ChromeBackend, ConnectionOptions};
pub use error::{BrowserError, ErrorKind, Result};
pub use query::{ComponentQuery, ElementHandle, FieldRef, NodeKey, QueryEvaluator};
pub use rpc::{HelperCall, HelperCatalog, InputDevice, Key, UiOracle};
pub use sync::{Context, ExtDriver, FieldDescriptor, SyncConfig, ValueSpec};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};
