mod common;

use common::{Event, FakeUi, calls_to, driver, fast_config};
use ext_driver::sync::{ExtDriver, WaitOptions};
use ext_driver::{BrowserError, ComponentQuery, FieldRef, HelperCall, Key};
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::time::{Duration, Instant};

#[test]
fn test_wait_for_single_waits_for_exactly_one() {
    let driver = driver(FakeUi::new(|call, events| match call {
        HelperCall::Query { .. } => match calls_to(events, "query") {
            0 => json!([]),
            1 => json!(["window-1", "window-2"]),
            _ => json!(["window-2"]),
        },
        _ => Value::Null,
    }));

    let cq = ComponentQuery::new("window");
    let handle = driver.query().wait_for_single(&cq, None, WaitOptions::new(500, 5)).unwrap();

    assert_eq!(handle.dom_id(), "window-2");
    assert_eq!(driver.backend().count("query"), 3);
}

#[test]
fn test_timeout_fires_within_one_interval() {
    let driver = driver(FakeUi::new(|_, _| json!([])));
    let timeout = Duration::from_millis(200);
    let interval = Duration::from_millis(50);

    let start = Instant::now();
    let err = driver
        .query()
        .wait_for_single(&ComponentQuery::new("messagebox"), None, WaitOptions::new(200, 50))
        .unwrap_err();
    let waited = start.elapsed();

    assert!(matches!(err, BrowserError::ConditionTimeout { ref condition, .. } if condition.contains("messagebox")));
    assert!(waited >= timeout);
    assert!(waited < timeout + interval);
}

#[test]
fn test_visible_and_enabled_predicates() {
    let driver = driver(FakeUi::new(|_, _| json!(["button-1"])));

    let cq = ComponentQuery::new("button").with_attribute("text", "Save");
    driver.query().find_single_visible_and_enabled(&cq, WaitOptions::new(100, 5)).unwrap();

    assert_eq!(
        driver.backend().helper_calls(),
        vec![HelperCall::Query {
            cq: "button[text=\"Save\"]{isVisible(true)}{isDisabled()===false}".to_string(),
            root_id: None,
        }]
    );
}

#[test]
fn test_click_component() {
    let driver = driver(FakeUi::new(|_, _| json!(["button-7"])));

    driver.query().click_component(&ComponentQuery::new("button#ok"), Some("window-1")).unwrap();

    let ui = driver.backend();
    assert!(matches!(
        ui.helper_calls().first(),
        Some(HelperCall::Query { root_id: Some(root), .. }) if root == "window-1"
    ));
    assert_eq!(ui.input_events(), vec![Event::Move("button-7".to_string()), Event::Click("button-7".to_string())]);
}

#[test]
fn test_exists() {
    let driver = driver(FakeUi::new(|_, _| Value::Null));
    assert!(!driver.query().exists(&ComponentQuery::new("toast"), None).unwrap());
}

#[test]
fn test_submit_by_button() {
    let driver = driver(FakeUi::new(|call, _| match call {
        HelperCall::Query { root_id: None, .. } => json!(["form-3"]),
        HelperCall::Query { root_id: Some(_), .. } => json!(["button-9"]),
        _ => Value::Null,
    }));

    driver.forms().submit_by_button(&ComponentQuery::new("form#pets"), "Ok").unwrap();

    let calls = driver.backend().helper_calls();
    assert_eq!(
        calls.last(),
        Some(&HelperCall::Query {
            cq: "button[text=\"Ok\"]{isDisabled()===false}{isVisible(true)}".to_string(),
            root_id: Some("form-3".to_string()),
        })
    );
    assert_eq!(driver.backend().input_events().last(), Some(&Event::Click("button-9".to_string())));
}

#[test]
fn test_type_form_values_tabs_between_fields() {
    let driver = ExtDriver::new(
        FakeUi::new(|call, events| match call {
            HelperCall::DoesFieldHaveFocus { .. } => json!(calls_to(events, "focusField") > 0),
            _ => Value::Null,
        }),
        fast_config(),
    );

    let values = vec![json!("Bob"), Value::Null, json!(42)];
    driver
        .forms()
        .type_form_values(&ComponentQuery::new("form#pets"), &values, Some(&FieldRef::from("name")))
        .unwrap();

    let ui = driver.backend();
    assert_eq!(ui.count("focusField"), 1);
    assert_eq!(ui.typed(), "Bob42");

    let keys: Vec<Event> = ui.input_events().into_iter().filter(|e| matches!(e, Event::Key(_))).collect();
    assert_eq!(keys, vec![Event::Key(Key::Tab); 3]);
}

#[test]
fn test_set_form_values_in_order() {
    let driver = driver(FakeUi::new(|call, _| match call {
        HelperCall::GetFieldKind { .. } => json!({"xtype": "checkboxfield", "kind": "checkbox"}),
        _ => Value::Null,
    }));

    let mut values = IndexMap::new();
    values.insert("vaccinated".to_string(), true.into());
    values.insert("neutered".to_string(), false.into());
    driver.forms().set_form_values(&ComponentQuery::new("form#pets"), &values).unwrap();

    let assigned: Vec<String> = driver
        .backend()
        .helper_calls()
        .into_iter()
        .filter_map(|call| match call {
            HelperCall::SetFieldValue { name, .. } => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(assigned, vec!["vaccinated", "neutered"]);
}
