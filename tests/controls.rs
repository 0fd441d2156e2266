mod common;

use common::{Event, FakeUi, driver, fast_config};
use ext_driver::sync::{ExtDriver, WaitOptions};
use ext_driver::{BrowserError, ComponentQuery, ErrorKind, HelperCall, ToolContext, ToolRegistry};
use serde_json::{Value, json};

fn queries(ui: &FakeUi) -> Vec<String> {
    ui.helper_calls()
        .into_iter()
        .filter_map(|call| match call {
            HelperCall::Query { cq, .. } => Some(cq),
            _ => None,
        })
        .collect()
}

#[test]
fn test_click_button_by_text() {
    let driver = driver(FakeUi::new(|_, _| json!(["button-3"])));

    driver.buttons().click_button_by_text("Save", Some("window-1")).unwrap();

    let ui = driver.backend();
    assert_eq!(
        queries(ui),
        vec!["button[text=\"Save\"][disabled=false]{isDisabled()===false}{isVisible(true)}".to_string()]
    );
    assert_eq!(ui.input_events(), vec![Event::Move("button-3".to_string()), Event::Click("button-3".to_string())]);
}

#[test]
fn test_click_button_on_messagebox() {
    let driver = driver(FakeUi::new(|_, _| json!(["button-ok"])));

    driver.buttons().click_button_on_messagebox("OK").unwrap();

    let cq = queries(driver.backend()).remove(0);
    assert!(cq.starts_with("messagebox{isVisible(true)} button[text=\"OK\"]"));
    assert_eq!(driver.backend().input_events().len(), 2);
}

#[test]
fn test_check_button_states() {
    let driver = driver(FakeUi::new(|call, _| match call {
        HelperCall::Query { cq, .. } if cq.contains("[disabled=true]") => json!(["button-9"]),
        _ => json!([]),
    }));
    let mut config = fast_config();
    config.component_wait = WaitOptions::new(30, 5);
    let driver = driver.with_config(config);

    driver.buttons().check_button_disabled("Delete", None).unwrap();

    let err = driver.buttons().check_button_enabled("Delete", None).unwrap_err();
    assert!(matches!(err, BrowserError::ComponentNotFound { ref cq } if cq == "button[text=\"Delete\"][disabled=false]"));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(driver.backend().input_events().is_empty());
}

#[test]
fn test_menu_items() {
    let driver = driver(FakeUi::new(|call, _| match call {
        HelperCall::Query { cq, .. } if cq.starts_with("menuitem[text=\"Rename\"][disabled=false]") => {
            json!(["menuitem-2"])
        }
        _ => json!([]),
    }));
    let mut config = fast_config();
    config.component_wait = WaitOptions::new(30, 5);
    let driver = driver.with_config(config);

    driver.menus().click_menu_item_by_text("Rename", None).unwrap();
    driver.menus().check_menu_item_enabled("Rename", None).unwrap();

    let err = driver.menus().check_menu_item_disabled("Rename", None).unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(
        driver.backend().input_events(),
        vec![Event::Move("menuitem-2".to_string()), Event::Click("menuitem-2".to_string())]
    );
}

#[test]
fn test_click_menu_item_by_query_waits_for_visible() {
    let driver = driver(FakeUi::new(|_, _| json!(["menuitem-5"])));

    driver.menus().click_menu_item(&ComponentQuery::new("menuitem#export"), Some("menu-1")).unwrap();

    let ui = driver.backend();
    assert_eq!(
        ui.helper_calls(),
        vec![HelperCall::Query { cq: "menuitem#export{isVisible(true)}".to_string(), root_id: Some("menu-1".to_string()) }]
    );
    assert_eq!(ui.input_events().last(), Some(&Event::Click("menuitem-5".to_string())));
}

#[test]
fn test_click_column_header() {
    let driver = ExtDriver::new(
        FakeUi::new(|call, _| match call {
            HelperCall::Query { .. } => json!(["grid-1"]),
            HelperCall::GetColumnHeader { column, .. } if column == "age" => json!("gridcolumn-4"),
            _ => Value::Null,
        }),
        fast_config(),
    );
    let grid = ComponentQuery::new("grid#pets");

    driver.grids().click_column_header(&grid, "age").unwrap();

    let ui = driver.backend();
    assert_eq!(ui.helper_names(), vec!["query", "getColumnHeader"]);
    assert_eq!(
        ui.input_events(),
        vec![Event::Move("gridcolumn-4".to_string()), Event::Click("gridcolumn-4".to_string())]
    );

    let err = driver.grids().click_column_header(&grid, "Colour").unwrap_err();
    match err {
        BrowserError::ColumnNotFound { ref grid_cq, ref column } => {
            assert_eq!(grid_cq, "grid#pets");
            assert_eq!(column, "Colour");
        }
        ref other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(driver.backend().input_events().len(), 2);
}

#[test]
fn test_registry_control_tools() {
    let driver = driver(FakeUi::new(|call, _| match call {
        HelperCall::Query { .. } => json!(["component-1"]),
        HelperCall::GetColumnHeader { .. } => json!("gridcolumn-1"),
        _ => Value::Null,
    }));
    let registry = ToolRegistry::with_defaults();
    let mut context = ToolContext::new(driver.context());

    assert!(registry.execute("click_button", json!({"text": "Save"}), &mut context).unwrap().success);
    assert!(registry.execute("click_messagebox_button", json!({}), &mut context).unwrap().success);
    assert!(registry.execute("check_button", json!({"text": "Save", "enabled": false}), &mut context).unwrap().success);
    assert!(registry.execute("click_menu_item", json!({"text": "Rename"}), &mut context).unwrap().success);
    assert!(registry.execute("check_menu_item", json!({"text": "Rename"}), &mut context).unwrap().success);
    assert!(
        registry
            .execute("click_column_header", json!({"grid_cq": "grid", "column": "name"}), &mut context)
            .unwrap()
            .success
    );

    let result = registry.execute("click_menu_item", json!({}), &mut context).unwrap();
    assert!(!result.success);

    assert_eq!(driver.backend().count("getColumnHeader"), 1);
}
