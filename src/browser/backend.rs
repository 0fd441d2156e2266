use crate::error::{BrowserError, Result};
use crate::query::ElementHandle;
use crate::rpc::{HELPER_NAMESPACE, HELPER_PROTOCOL_VERSION, HelperCall, HelperCatalog, InputDevice, Key, UiOracle};
use crate::sync::config::WaitOptions;
use crate::sync::poller;
use headless_chrome::{Element, Tab};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

const CLEAR_JS: &str = r#"
    function() {
        this.value = '';
        this.dispatchEvent(new Event('input', { bubbles: true }));
        this.dispatchEvent(new Event('change', { bubbles: true }));
    }
"#;

const CONTEXT_MENU_JS: &str = r#"
    function() {
        const rect = this.getBoundingClientRect();
        const init = {
            bubbles: true,
            cancelable: true,
            view: window,
            button: 2,
            buttons: 2,
            clientX: rect.left + rect.width / 2,
            clientY: rect.top + rect.height / 2
        };
        this.dispatchEvent(new MouseEvent('mousedown', init));
        this.dispatchEvent(new MouseEvent('mouseup', init));
        this.dispatchEvent(new MouseEvent('contextmenu', init));
    }
"#;

/// Drives the UI in one Chrome tab: helper calls through `Runtime.evaluate`, input
/// through CDP input events
#[derive(Clone)]
pub struct ChromeBackend {
    tab: Arc<Tab>,
}

impl ChromeBackend {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }

    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Evaluate an expression that yields a JSON string and parse it
    fn evaluate_json(&self, script: &str) -> Result<Value> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| BrowserError::EvaluationFailed(e.to_string()))?;

        match result.value {
            Some(Value::String(json)) => serde_json::from_str(&json)
                .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to parse result JSON: {}", e))),
            Some(Value::Null) | None => Ok(Value::Null),
            Some(other) => Ok(other),
        }
    }

    fn element(&self, handle: &ElementHandle) -> Result<Element<'_>> {
        self.tab.find_element(&handle.css_selector()).map_err(|e| {
            BrowserError::InputFailed(format!("Element with id '{}' is no longer rendered: {}", handle.dom_id(), e))
        })
    }

    /// Protocol version of the helpers installed in the page, `None` if absent
    pub fn helpers_version(&self) -> Result<Option<u32>> {
        let script = format!(
            "JSON.stringify((globalThis.{ns} && globalThis.{ns}.version) || null)",
            ns = HELPER_NAMESPACE
        );

        Ok(self.evaluate_json(&script)?.as_u64().map(|v| v as u32))
    }

    /// Make sure the page has the helpers this crate speaks to, injecting `script` if not
    ///
    /// Fails if the installed helpers speak another protocol version or lack any
    /// procedure of the [`HelperCatalog`].
    pub fn ensure_helpers_loaded(&self, script: Option<&Path>, wait: WaitOptions) -> Result<()> {
        match self.helpers_version()? {
            Some(HELPER_PROTOCOL_VERSION) => {}
            Some(other) => {
                return Err(BrowserError::helper_protocol(
                    HELPER_NAMESPACE,
                    format!("Page has helpers version {}, expected {}", other, HELPER_PROTOCOL_VERSION),
                ));
            }
            None => {
                let path = script.ok_or_else(|| {
                    BrowserError::helper_protocol(HELPER_NAMESPACE, "Helpers are not loaded and no helper script is configured")
                })?;
                self.inject_helpers(path, wait)?;
            }
        }

        self.verify_catalog()
    }

    fn inject_helpers(&self, path: &Path, wait: WaitOptions) -> Result<()> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| BrowserError::Config(format!("Failed to read helper script {}: {}", path.display(), e)))?;

        log::info!("Injecting helper script {}", path.display());
        self.tab
            .evaluate(&source, false)
            .map_err(|e| BrowserError::EvaluationFailed(format!("Helper script failed: {}", e)))?;

        poller::wait_until("page-side helpers to load", wait, || {
            Ok(self.helpers_version()? == Some(HELPER_PROTOCOL_VERSION))
        })
    }

    fn verify_catalog(&self) -> Result<()> {
        let script = format!(
            "JSON.stringify(Object.keys(globalThis.{ns}).filter(k => typeof globalThis.{ns}[k] === 'function'))",
            ns = HELPER_NAMESPACE
        );
        let installed: Vec<String> = serde_json::from_value(self.evaluate_json(&script)?)
            .map_err(|e| BrowserError::helper_protocol(HELPER_NAMESPACE, format!("Failed to list helpers: {}", e)))?;

        let missing: Vec<&str> = HelperCatalog::current()
            .names()
            .filter(|name| !installed.iter().any(|installed| installed == name))
            .collect();

        if !missing.is_empty() {
            return Err(BrowserError::helper_protocol(
                HELPER_NAMESPACE,
                format!("Missing procedures: {}", missing.join(", ")),
            ));
        }

        log::debug!("All {} helper procedures present", installed.len());
        Ok(())
    }
}

/// Whether the US keyboard layout has a key for `character`
///
/// Those characters are typed with keydown/keyup events, anything else is inserted as text.
fn has_key_definition(character: char) -> bool {
    character == ' ' || character.is_ascii_graphic()
}

/// Script invoking one helper with JSON encoded arguments
///
/// The result comes back wrapped so a missing procedure is distinguishable from a
/// procedure that returned null.
pub(crate) fn helper_script(call: &HelperCall) -> String {
    let args = Value::Array(call.args());

    format!(
        r#"(function() {{
    const ns = globalThis.{ns};
    if (!ns || typeof ns.{name} !== 'function') {{
        return JSON.stringify({{ missing: true }});
    }}
    const result = ns.{name}.apply(ns, {args});
    return JSON.stringify({{ result: result === undefined ? null : result }});
}})()"#,
        ns = HELPER_NAMESPACE,
        name = call.name(),
        args = args,
    )
}

impl UiOracle for ChromeBackend {
    fn call(&self, call: &HelperCall) -> Result<Value> {
        if call.is_mutating() {
            log::debug!("Calling helper {} with {:?}", call.name(), call.args());
        } else {
            log::trace!("Calling helper {}", call.name());
        }

        let envelope = self.evaluate_json(&helper_script(call))?;

        if envelope.get("missing").and_then(Value::as_bool).unwrap_or(false) {
            return Err(BrowserError::helper_protocol(call.name(), "Procedure is not installed in the page"));
        }

        match envelope.as_object().and_then(|reply| reply.get("result")) {
            Some(result) => Ok(result.clone()),
            None => Err(BrowserError::helper_protocol(call.name(), format!("Malformed reply {}", envelope))),
        }
    }
}

impl InputDevice for ChromeBackend {
    fn move_to(&self, element: &ElementHandle) -> Result<()> {
        self.element(element)?
            .move_mouse_over()
            .map_err(|e| BrowserError::InputFailed(format!("Failed to move to '{}': {}", element.dom_id(), e)))?;
        Ok(())
    }

    fn click(&self, element: &ElementHandle) -> Result<()> {
        self.element(element)?
            .click()
            .map_err(|e| BrowserError::InputFailed(format!("Failed to click '{}': {}", element.dom_id(), e)))?;
        Ok(())
    }

    fn context_click(&self, element: &ElementHandle) -> Result<()> {
        self.element(element)?.call_js_fn(CONTEXT_MENU_JS, vec![], false).map_err(|e| {
            BrowserError::InputFailed(format!("Failed to open context menu on '{}': {}", element.dom_id(), e))
        })?;
        Ok(())
    }

    fn clear(&self, element: &ElementHandle) -> Result<()> {
        self.element(element)?
            .call_js_fn(CLEAR_JS, vec![], false)
            .map_err(|e| BrowserError::InputFailed(format!("Failed to clear '{}': {}", element.dom_id(), e)))?;
        Ok(())
    }

    fn send_char(&self, character: char) -> Result<()> {
        let text = character.to_string();

        let typed = if has_key_definition(character) {
            self.tab.press_key(&text)
        } else {
            self.tab.send_character(&text)
        };

        typed.map_err(|e| BrowserError::InputFailed(format!("Failed to type '{}': {}", character, e)))?;
        Ok(())
    }

    fn press_key(&self, key: Key) -> Result<()> {
        self.tab
            .press_key(key.name())
            .map_err(|e| BrowserError::InputFailed(format!("Failed to press {}: {}", key.name(), e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::NodeKey;

    #[test]
    fn test_helper_script_encodes_arguments_as_json() {
        let call = HelperCall::GetNodeElement {
            tree_cq: "treepanel#pets".to_string(),
            node: NodeKey::from("It's \"Bob\""),
            css_query: ".x-tree-icon".to_string(),
        };

        let script = helper_script(&call);
        assert!(script.contains("ns.getNodeElement.apply(ns, [\"treepanel#pets\",{\"text\":\"It's \\\"Bob\\\"\"},\".x-tree-icon\"])"));
        assert!(script.contains("globalThis.ExtDriverHelpers"));
    }

    #[test]
    fn test_key_definitions() {
        for character in ['a', 'Z', '7', ' ', '@', '~', '"'] {
            assert!(has_key_definition(character), "{:?}", character);
        }
        for character in ['é', 'ß', '€', '\t', '\n'] {
            assert!(!has_key_definition(character), "{:?}", character);
        }
    }

    #[test]
    fn test_helper_script_without_arguments() {
        let script = helper_script(&HelperCall::IsAjaxInProgress);
        assert!(script.contains("ns.isAjaxInProgress.apply(ns, [])"));
    }
}
