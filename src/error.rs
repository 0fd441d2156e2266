use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Broad classification of a [`BrowserError`], used by callers that only care about
/// the family an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field, record, node or component could not be found
    NotFound,
    /// The target has no defined handling for the requested operation
    UnsupportedKind,
    /// A wait exceeded its budget
    Timeout,
    /// The call itself was malformed
    InvalidArgument,
    /// The browser, the page-side helpers or the input channel failed
    Driver,
}

/// Errors that can occur while driving the UI
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to connect to an existing browser
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Tab operation failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// JavaScript evaluation failed
    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    /// A page-side helper is missing or returned something it should not have
    #[error("Helper '{helper}' protocol error: {reason}")]
    HelperProtocol { helper: String, reason: String },

    /// Simulated input could not be delivered
    #[error("Input simulation failed: {0}")]
    InputFailed(String),

    #[error("Failed to find field named '{name}' on form with CQ '{form_cq}'.")]
    FieldNotFound { form_cq: String, name: String },

    #[error("Failed to find record with data {data} in combobox named '{name}' on form with CQ '{form_cq}'.")]
    RecordNotFound { form_cq: String, name: String, data: Value },

    #[error("Failed to find node with data (or text) '{node}' on tree with CQ '{tree_cq}'.")]
    NodeNotFound { tree_cq: String, node: String },

    #[error("Failed to find component with CQ '{cq}'.")]
    ComponentNotFound { cq: String },

    #[error("Failed to find column with text (or dataIndex) '{column}' on grid with CQ '{grid_cq}'.")]
    ColumnNotFound { grid_cq: String, column: String },

    #[error("Store owned by '{store_holder_cq}' does not contain the expected data: {reason}")]
    StoreContentsMismatch { store_holder_cq: String, reason: String },

    #[error(
        "The field named '{name}' on form with CQ '{form_cq}' is of an xtype '{xtype}' which is not supported for the requested operation."
    )]
    UnsupportedFieldKind { form_cq: String, name: String, xtype: String },

    /// A polled condition never became true
    #[error("Timed out after {elapsed:?} waiting for {condition}")]
    ConditionTimeout { condition: String, elapsed: Duration },

    /// A store never reported a fresh load
    #[error("Timed out after {elapsed:?} waiting for store owned by '{store_holder_cq}' to load")]
    LoadTimeout { store_holder_cq: String, elapsed: Duration },

    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// Tool execution failed
    #[error("Tool '{tool}' execution failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BrowserError {
    /// The family this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            BrowserError::FieldNotFound { .. }
            | BrowserError::RecordNotFound { .. }
            | BrowserError::NodeNotFound { .. }
            | BrowserError::ComponentNotFound { .. }
            | BrowserError::ColumnNotFound { .. }
            | BrowserError::StoreContentsMismatch { .. } => ErrorKind::NotFound,
            BrowserError::UnsupportedFieldKind { .. } => ErrorKind::UnsupportedKind,
            BrowserError::ConditionTimeout { .. } | BrowserError::LoadTimeout { .. } => ErrorKind::Timeout,
            BrowserError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            BrowserError::ConnectionFailed(_)
            | BrowserError::TabOperationFailed(_)
            | BrowserError::EvaluationFailed(_)
            | BrowserError::HelperProtocol { .. }
            | BrowserError::InputFailed(_)
            | BrowserError::ToolExecutionFailed { .. }
            | BrowserError::Config(_) => ErrorKind::Driver,
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub(crate) fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        BrowserError::InvalidArgument { argument: argument.into(), reason: reason.into() }
    }

    pub(crate) fn helper_protocol(helper: impl Into<String>, reason: impl Into<String>) -> Self {
        BrowserError::HelperProtocol { helper: helper.into(), reason: reason.into() }
    }
}

/// Result type alias for UI driving operations
pub type Result<T> = std::result::Result<T, BrowserError>;
