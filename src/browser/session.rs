use crate::browser::backend::ChromeBackend;
use crate::browser::config::ConnectionOptions;
use crate::error::{BrowserError, Result};
use crate::sync::{ExtDriver, SyncConfig};
use headless_chrome::{Browser, Tab};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Connection to a running Chrome/Chromium instance hosting the application under test
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    helper_script: Option<PathBuf>,
}

impl BrowserSession {
    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        log::info!("Connecting to browser at {}", options.ws_url);

        let browser = Browser::connect_with_timeout(options.ws_url, Duration::from_millis(options.timeout))
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        Ok(Self { browser, helper_script: options.helper_script })
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking the document visibility and focus state
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        // visible and focused first, then merely visible
        for check in ["document.visibilityState === 'visible' && document.hasFocus()", "document.visibilityState === 'visible'"] {
            for tab in &tabs {
                match tab.evaluate(check, false) {
                    Ok(remote_object) => {
                        if remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                    Err(e) => log::debug!("Failed to check tab status: {}", e),
                }
            }
        }

        Err(BrowserError::TabOperationFailed("No active tab found".to_string()))
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// A backend bound to the active tab, without checking the page's helpers
    pub fn backend(&self) -> Result<ChromeBackend> {
        Ok(ChromeBackend::new(self.get_active_tab()?))
    }

    /// A driver for the active tab, with the page-side helpers loaded and verified
    pub fn ext_driver(&self, config: SyncConfig) -> Result<ExtDriver<ChromeBackend>> {
        let backend = self.backend()?;
        backend.ensure_helpers_loaded(self.helper_script.as_deref(), config.helper_load_wait)?;

        Ok(ExtDriver::new(backend, config))
    }
}
