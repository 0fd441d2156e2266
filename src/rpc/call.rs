use crate::query::{FieldRef, NodeKey};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};

/// Version of the page-side helper protocol this crate speaks
pub const HELPER_PROTOCOL_VERSION: u32 = 1;

/// Global namespace the page-side helpers are installed under
pub const HELPER_NAMESPACE: &str = "ExtDriverHelpers";

/// What a helper procedure hands back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    Nothing,
    Boolean,
    Count,
    /// A DOM element id, or null when not found
    Handle,
    /// An array of DOM element ids
    HandleList,
    /// An object, or null when not found
    Record,
    /// An array of objects
    Records,
    /// Any JSON value
    Value,
}

/// Declared shape of one helper procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelperSignature {
    pub params: &'static [&'static str],
    pub returns: ReturnKind,
}

const SIGNATURES: &[(&str, &[&str], ReturnKind)] = &[
    ("query", &["cq", "rootId"], ReturnKind::HandleList),
    ("findFieldInputElement", &["formCq", "name"], ReturnKind::Handle),
    ("getFieldKind", &["formCq", "name"], ReturnKind::Record),
    ("getFieldValue", &["formCq", "name"], ReturnKind::Value),
    ("getFieldDisplayValue", &["formCq", "name"], ReturnKind::Value),
    ("getFieldRawValue", &["formCq", "name"], ReturnKind::Value),
    ("setFieldValue", &["formCq", "name", "value"], ReturnKind::Nothing),
    ("selectComboBoxRecord", &["formCq", "name", "index"], ReturnKind::Boolean),
    ("focusField", &["formCq", "indexOrName"], ReturnKind::Nothing),
    ("doesFieldHaveFocus", &["formCq", "indexOrName"], ReturnKind::Boolean),
    ("resetStoreLoadCount", &["storeHolderCq"], ReturnKind::Boolean),
    ("getStoreLoadCount", &["storeHolderCq"], ReturnKind::Count),
    ("reloadStore", &["storeHolderCq"], ReturnKind::Nothing),
    ("getStoreRecords", &["storeHolderCq"], ReturnKind::Records),
    ("isAjaxInProgress", &[], ReturnKind::Boolean),
    ("isTreeLoading", &["treeCq"], ReturnKind::Boolean),
    ("getNodeElement", &["treeCq", "node", "cssQuery"], ReturnKind::Handle),
    ("reloadNode", &["treeCq", "node"], ReturnKind::Boolean),
    ("getColumnHeader", &["gridCq", "columnTextOrDataIndex"], ReturnKind::Handle),
];

/// The table of helper procedures the page must provide, in call-surface order
#[derive(Debug, Clone)]
pub struct HelperCatalog {
    version: u32,
    procedures: IndexMap<&'static str, HelperSignature>,
}

impl HelperCatalog {
    /// The catalog for [`HELPER_PROTOCOL_VERSION`]
    pub fn current() -> Self {
        let procedures = SIGNATURES
            .iter()
            .map(|&(name, params, returns)| (name, HelperSignature { params, returns }))
            .collect();

        Self { version: HELPER_PROTOCOL_VERSION, procedures }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn signature(&self, name: &str) -> Option<&HelperSignature> {
        self.procedures.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.procedures.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

/// One call into the page-side helpers
#[derive(Debug, Clone, PartialEq)]
pub enum HelperCall {
    Query { cq: String, root_id: Option<String> },
    FindFieldInputElement { form_cq: String, name: String },
    GetFieldKind { form_cq: String, name: String },
    GetFieldValue { form_cq: String, name: String },
    GetFieldDisplayValue { form_cq: String, name: String },
    GetFieldRawValue { form_cq: String, name: String },
    SetFieldValue { form_cq: String, name: String, value: Value },
    SelectComboBoxRecord { form_cq: String, name: String, index: usize },
    FocusField { form_cq: String, field: FieldRef },
    DoesFieldHaveFocus { form_cq: String, field: FieldRef },
    ResetStoreLoadCount { store_holder_cq: String },
    GetStoreLoadCount { store_holder_cq: String },
    ReloadStore { store_holder_cq: String },
    GetStoreRecords { store_holder_cq: String },
    IsAjaxInProgress,
    IsTreeLoading { tree_cq: String },
    GetNodeElement { tree_cq: String, node: NodeKey, css_query: String },
    ReloadNode { tree_cq: String, node: NodeKey },
    GetColumnHeader { grid_cq: String, column: String },
}

impl HelperCall {
    /// Procedure name in the [`HelperCatalog`]
    pub fn name(&self) -> &'static str {
        match self {
            HelperCall::Query { .. } => "query",
            HelperCall::FindFieldInputElement { .. } => "findFieldInputElement",
            HelperCall::GetFieldKind { .. } => "getFieldKind",
            HelperCall::GetFieldValue { .. } => "getFieldValue",
            HelperCall::GetFieldDisplayValue { .. } => "getFieldDisplayValue",
            HelperCall::GetFieldRawValue { .. } => "getFieldRawValue",
            HelperCall::SetFieldValue { .. } => "setFieldValue",
            HelperCall::SelectComboBoxRecord { .. } => "selectComboBoxRecord",
            HelperCall::FocusField { .. } => "focusField",
            HelperCall::DoesFieldHaveFocus { .. } => "doesFieldHaveFocus",
            HelperCall::ResetStoreLoadCount { .. } => "resetStoreLoadCount",
            HelperCall::GetStoreLoadCount { .. } => "getStoreLoadCount",
            HelperCall::ReloadStore { .. } => "reloadStore",
            HelperCall::GetStoreRecords { .. } => "getStoreRecords",
            HelperCall::IsAjaxInProgress => "isAjaxInProgress",
            HelperCall::IsTreeLoading { .. } => "isTreeLoading",
            HelperCall::GetNodeElement { .. } => "getNodeElement",
            HelperCall::ReloadNode { .. } => "reloadNode",
            HelperCall::GetColumnHeader { .. } => "getColumnHeader",
        }
    }

    /// Positional arguments, in the order declared by the catalog
    pub fn args(&self) -> Vec<Value> {
        match self {
            HelperCall::Query { cq, root_id } => vec![json!(cq), json!(root_id)],
            HelperCall::FindFieldInputElement { form_cq, name }
            | HelperCall::GetFieldKind { form_cq, name }
            | HelperCall::GetFieldValue { form_cq, name }
            | HelperCall::GetFieldDisplayValue { form_cq, name }
            | HelperCall::GetFieldRawValue { form_cq, name } => vec![json!(form_cq), json!(name)],
            HelperCall::SetFieldValue { form_cq, name, value } => vec![json!(form_cq), json!(name), value.clone()],
            HelperCall::SelectComboBoxRecord { form_cq, name, index } => {
                vec![json!(form_cq), json!(name), json!(index)]
            }
            HelperCall::FocusField { form_cq, field } | HelperCall::DoesFieldHaveFocus { form_cq, field } => {
                vec![json!(form_cq), json!(field)]
            }
            HelperCall::ResetStoreLoadCount { store_holder_cq }
            | HelperCall::GetStoreLoadCount { store_holder_cq }
            | HelperCall::ReloadStore { store_holder_cq }
            | HelperCall::GetStoreRecords { store_holder_cq } => vec![json!(store_holder_cq)],
            HelperCall::IsAjaxInProgress => Vec::new(),
            HelperCall::IsTreeLoading { tree_cq } => vec![json!(tree_cq)],
            HelperCall::GetNodeElement { tree_cq, node, css_query } => {
                vec![json!(tree_cq), node.to_wire(), json!(css_query)]
            }
            HelperCall::ReloadNode { tree_cq, node } => vec![json!(tree_cq), node.to_wire()],
            HelperCall::GetColumnHeader { grid_cq, column } => vec![json!(grid_cq), json!(column)],
        }
    }

    /// Whether the call changes UI state rather than only observing it
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            HelperCall::SetFieldValue { .. }
                | HelperCall::SelectComboBoxRecord { .. }
                | HelperCall::FocusField { .. }
                | HelperCall::ResetStoreLoadCount { .. }
                | HelperCall::ReloadStore { .. }
                | HelperCall::ReloadNode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_call() -> Vec<HelperCall> {
        let form_cq = "form".to_string();
        let name = "field".to_string();
        let store = "combobox".to_string();
        let tree = "treepanel".to_string();

        vec![
            HelperCall::Query { cq: "button".to_string(), root_id: None },
            HelperCall::FindFieldInputElement { form_cq: form_cq.clone(), name: name.clone() },
            HelperCall::GetFieldKind { form_cq: form_cq.clone(), name: name.clone() },
            HelperCall::GetFieldValue { form_cq: form_cq.clone(), name: name.clone() },
            HelperCall::GetFieldDisplayValue { form_cq: form_cq.clone(), name: name.clone() },
            HelperCall::GetFieldRawValue { form_cq: form_cq.clone(), name: name.clone() },
            HelperCall::SetFieldValue { form_cq: form_cq.clone(), name: name.clone(), value: json!(true) },
            HelperCall::SelectComboBoxRecord { form_cq: form_cq.clone(), name: name.clone(), index: 0 },
            HelperCall::FocusField { form_cq: form_cq.clone(), field: FieldRef::Index(0) },
            HelperCall::DoesFieldHaveFocus { form_cq, field: FieldRef::Name(name) },
            HelperCall::ResetStoreLoadCount { store_holder_cq: store.clone() },
            HelperCall::GetStoreLoadCount { store_holder_cq: store.clone() },
            HelperCall::ReloadStore { store_holder_cq: store.clone() },
            HelperCall::GetStoreRecords { store_holder_cq: store },
            HelperCall::IsAjaxInProgress,
            HelperCall::IsTreeLoading { tree_cq: tree.clone() },
            HelperCall::GetNodeElement {
                tree_cq: tree.clone(),
                node: NodeKey::from("Root"),
                css_query: ".x-tree-icon".to_string(),
            },
            HelperCall::ReloadNode { tree_cq: tree, node: NodeKey::from("Root") },
            HelperCall::GetColumnHeader { grid_cq: "grid".to_string(), column: "name".to_string() },
        ]
    }

    #[test]
    fn test_every_call_matches_its_catalog_signature() {
        let catalog = HelperCatalog::current();
        let calls = every_call();
        assert_eq!(calls.len(), catalog.len());

        for call in calls {
            let signature = catalog.signature(call.name()).expect("call missing from catalog");
            assert_eq!(signature.params.len(), call.args().len(), "arity mismatch for {}", call.name());
        }
    }

    #[test]
    fn test_catalog_order_and_version() {
        let catalog = HelperCatalog::current();
        assert_eq!(catalog.version(), HELPER_PROTOCOL_VERSION);
        assert_eq!(catalog.names().next(), Some("query"));
        assert_eq!(catalog.signature("isAjaxInProgress").map(|s| s.returns), Some(ReturnKind::Boolean));
        assert!(catalog.signature("missing").is_none());
    }

    #[test]
    fn test_args_encode_node_keys() {
        let call = HelperCall::ReloadNode { tree_cq: "treepanel".to_string(), node: NodeKey::from("Pets") };
        assert_eq!(call.args(), vec![json!("treepanel"), json!({"text": "Pets"})]);
        assert!(call.is_mutating());
        assert!(!HelperCall::IsAjaxInProgress.is_mutating());
    }
}
