use std::path::PathBuf;

/// Options for connecting to a running browser
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// WebSocket debugger URL, e.g. `ws://127.0.0.1:9222/devtools/browser/<id>`
    pub ws_url: String,

    /// Idle timeout for the connection in milliseconds
    pub timeout: u64,

    /// Script installing the page-side helpers, injected when a page lacks them
    pub helper_script: Option<PathBuf>,
}

impl ConnectionOptions {
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self { ws_url: ws_url.into(), timeout: 30_000, helper_script: None }
    }

    /// Builder method: set the idle timeout in milliseconds
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder method: set the helper script to inject
    pub fn helper_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.helper_script = Some(path.into());
        self
    }
}
