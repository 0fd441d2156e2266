mod common;

use common::{Event, FakeUi, driver};
use ext_driver::sync::TypeOptions;
use ext_driver::{BrowserError, ElementHandle, HelperCall, Key, ToolContext, ToolRegistry};
use serde_json::{Value, json};
use std::time::{Duration, Instant};

#[test]
fn test_type_into_element_event_order() {
    let driver = driver(FakeUi::new(|_, _| Value::Null));
    let input = ElementHandle::new("textfield-1-inputEl");

    let start = Instant::now();
    driver
        .keyboard()
        .type_into_element(&input, "Hi", TypeOptions::new().delay(Duration::from_millis(20)).tab_off(true))
        .unwrap();

    assert!(start.elapsed() >= Duration::from_millis(20));
    assert_eq!(
        driver.backend().input_events(),
        vec![
            Event::Clear("textfield-1-inputEl".to_string()),
            Event::Move("textfield-1-inputEl".to_string()),
            Event::Click("textfield-1-inputEl".to_string()),
            Event::Char('H'),
            Event::Char('i'),
            Event::Key(Key::Tab),
        ]
    );
}

#[test]
fn test_type_without_clearing() {
    let driver = driver(FakeUi::new(|_, _| Value::Null));

    driver
        .keyboard()
        .type_into_element(&ElementHandle::new("a"), "x", TypeOptions::new().clear_first(false))
        .unwrap();

    assert_eq!(
        driver.backend().input_events(),
        vec![Event::Move("a".to_string()), Event::Click("a".to_string()), Event::Char('x')]
    );
}

#[test]
fn test_special_keys() {
    let driver = driver(FakeUi::new(|_, _| Value::Null));
    let keyboard = driver.keyboard();

    keyboard.type_return(None).unwrap();
    keyboard.type_escape(None).unwrap();
    keyboard.type_delete(Some(Duration::from_millis(1))).unwrap();

    assert_eq!(
        driver.backend().input_events(),
        vec![Event::Key(Key::Return), Event::Key(Key::Escape), Event::Key(Key::Delete)]
    );
}

#[test]
fn test_registry_runs_set_field() {
    let driver = driver(FakeUi::new(|call, _| match call {
        HelperCall::GetFieldKind { .. } => json!({"xtype": "radiogroup", "kind": "radiogroup"}),
        _ => Value::Null,
    }));
    let registry = ToolRegistry::with_defaults();
    let mut context = ToolContext::new(driver.context());

    let result = registry
        .execute("set_field", json!({"form_cq": "form#pets", "name": "size", "value": {"size": "large"}}), &mut context)
        .unwrap_err();

    // radio groups take no records
    assert!(matches!(result, BrowserError::InvalidArgument { .. }));

    let result = registry
        .execute("set_field", json!({"form_cq": "form#pets", "name": "size", "value": "large"}), &mut context)
        .unwrap();
    assert!(result.success);
    assert_eq!(result.data, Some(json!({"form_cq": "form#pets", "name": "size"})));
}

#[test]
fn test_registry_rejects_bad_params_and_unknown_tools() {
    let driver = driver(FakeUi::new(|_, _| Value::Null));
    let registry = ToolRegistry::with_defaults();
    let mut context = ToolContext::new(driver.context());

    let err = registry.execute("click", json!({"selector": 3}), &mut context).unwrap_err();
    assert!(matches!(err, BrowserError::ToolExecutionFailed { ref tool, .. } if tool == "click"));

    let err = registry.execute("navigate", json!({}), &mut context).unwrap_err();
    assert!(matches!(err, BrowserError::ToolExecutionFailed { ref tool, .. } if tool == "navigate"));
}

#[test]
fn test_registry_wait_for_store_reports_count() {
    let driver = driver(FakeUi::new(|call, _| match call {
        HelperCall::GetStoreLoadCount { .. } => json!(2),
        HelperCall::IsAjaxInProgress => json!(false),
        _ => Value::Null,
    }));
    let registry = ToolRegistry::with_defaults();
    let mut context = ToolContext::new(driver.context());

    let result = registry
        .execute("wait_for_store", json!({"store_holder_cq": "grid", "quiet_period": true}), &mut context)
        .unwrap();

    assert_eq!(result.data, Some(json!({"load_count": 2})));
    assert_eq!(driver.backend().count("isAjaxInProgress"), 2);
}

#[test]
fn test_registry_fill_form_keeps_script_order() {
    let driver = driver(FakeUi::new(|call, _| match call {
        HelperCall::GetFieldKind { .. } => json!({"xtype": "textfield", "kind": "text"}),
        HelperCall::Query { .. } => json!(["field-1"]),
        HelperCall::FindFieldInputElement { .. } => json!("field-1-inputEl"),
        _ => Value::Null,
    }));
    let registry = ToolRegistry::with_defaults();
    let mut context = ToolContext::new(driver.context());

    let params: Value =
        serde_json::from_str(r#"{"form_cq": "form#pets", "values": {"species": "Stoat", "age": 4, "name": "Bob"}}"#)
            .unwrap();
    let result = registry.execute("fill_form", params, &mut context).unwrap();
    assert_eq!(result.data, Some(json!({"fields": 3})));

    let order: Vec<String> = driver
        .backend()
        .helper_calls()
        .into_iter()
        .filter_map(|call| match call {
            HelperCall::GetFieldKind { name, .. } => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(order, vec!["species", "age", "name"]);
    assert_eq!(driver.backend().typed(), "Stoat4Bob");
}
