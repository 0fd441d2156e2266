//! Tests against a real browser
//!
//! Start Chrome with `--remote-debugging-port=9222`, export its browser WebSocket URL as
//! `EXT_DRIVER_WS_URL`, then run with `cargo test -- --ignored`.

use ext_driver::rpc::HelperCatalog;
use ext_driver::sync::WaitOptions;
use ext_driver::{BrowserSession, ConnectionOptions, ElementHandle, HelperCall, InputDevice, UiOracle};
use serde_json::json;

/// A page with one input and a stub helper namespace answering every catalog procedure
fn stub_page() -> String {
    let stubs: Vec<String> = HelperCatalog::current()
        .names()
        .map(|name| match name {
            "query" => format!("{}: function() {{ return ['name-input']; }}", name),
            "getFieldValue" => format!("{}: function() {{ return document.getElementById('name-input').value; }}", name),
            _ => format!("{}: function() {{ return null; }}", name),
        })
        .collect();

    let html = format!(
        "<html><body><input id='name-input'><script>globalThis.ExtDriverHelpers = {{ version: 1, {} }};</script></body></html>",
        stubs.join(", ")
    );

    format!("data:text/html,{}", urlencoding::encode(&html))
}

fn session() -> BrowserSession {
    let ws_url = std::env::var("EXT_DRIVER_WS_URL").expect("EXT_DRIVER_WS_URL not set");
    BrowserSession::connect(ConnectionOptions::new(ws_url)).expect("Failed to connect to browser")
}

#[test]
#[ignore] // Requires a running Chrome
fn test_helpers_verified_and_called() {
    let session = session();
    let backend = session.backend().expect("No active tab");

    backend.tab().navigate_to(&stub_page()).expect("Failed to navigate");
    backend.tab().wait_until_navigated().expect("Navigation timeout");

    backend.ensure_helpers_loaded(None, WaitOptions::new(2_000, 100)).expect("Helpers not verified");

    let handles = backend
        .call_handles(&HelperCall::Query { cq: "textfield".to_string(), root_id: None })
        .expect("Query failed");
    assert_eq!(handles, vec![ElementHandle::new("name-input")]);
}

#[test]
#[ignore]
fn test_typing_reaches_the_input() {
    let session = session();
    let backend = session.backend().expect("No active tab");

    backend.tab().navigate_to(&stub_page()).expect("Failed to navigate");
    backend.tab().wait_until_navigated().expect("Navigation timeout");

    let input = ElementHandle::new("name-input");
    backend.click(&input).expect("Click failed");
    for character in "Stoat 42".chars() {
        backend.send_char(character).expect("Typing failed");
    }

    let value = backend
        .call(&HelperCall::GetFieldValue { form_cq: "form".to_string(), name: "name".to_string() })
        .expect("Helper call failed");
    assert_eq!(value, json!("Stoat 42"));
}

#[test]
#[ignore]
fn test_missing_helpers_without_script() {
    let session = session();
    let backend = session.backend().expect("No active tab");

    backend.tab().navigate_to("about:blank").expect("Failed to navigate");
    backend.tab().wait_until_navigated().expect("Navigation timeout");

    let err = backend.ensure_helpers_loaded(None, WaitOptions::new(200, 50)).unwrap_err();
    assert!(err.to_string().contains("not loaded"));
}
