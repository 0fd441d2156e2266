//! Setting and reading form field values
//!
//! How a value gets into a field depends on what kind of field it is. Text-like fields
//! are typed into, boolean fields are assigned directly, and comboboxes either take typed
//! display text or have a record selected from their store. Remotely filtered comboboxes
//! add a round trip: the filter text is typed, the store reloads, and only then is the
//! value committed or the record selected.

use crate::error::{BrowserError, Result};
use crate::query::{ComponentQuery, ElementHandle, FieldRef, QueryEvaluator};
use crate::rpc::{HelperCall, decode};
use crate::sync::Context;
use crate::sync::keyboard::{Keyboard, TypeOptions};
use crate::sync::poller;
use crate::sync::store::StoreTracker;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Classification of a field, reported by the page-side helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "textarea")]
    TextArea,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "checkbox")]
    Checkbox,
    #[serde(rename = "radio")]
    Radio,
    #[serde(rename = "radiogroup")]
    RadioGroup,
    #[serde(rename = "combobox")]
    ComboBox,
    #[serde(rename = "remote_combobox")]
    RemoteComboBox,
    /// Anything else, such as sliders or html editors
    #[serde(other)]
    Unknown,
}

/// How a value is applied to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignStrategy {
    /// Clear the input and type the value
    Type,
    /// Set the field's value property directly, no typing
    Assign,
    /// Type display text or select a record from the bound store
    ComboBox { remote: bool },
}

impl FieldKind {
    /// The assignment path for this kind, `None` when there is none
    pub fn strategy(self) -> Option<AssignStrategy> {
        match self {
            FieldKind::Text | FieldKind::TextArea | FieldKind::Number | FieldKind::Date => Some(AssignStrategy::Type),
            FieldKind::Checkbox | FieldKind::Radio | FieldKind::RadioGroup => Some(AssignStrategy::Assign),
            FieldKind::ComboBox => Some(AssignStrategy::ComboBox { remote: false }),
            FieldKind::RemoteComboBox => Some(AssignStrategy::ComboBox { remote: true }),
            FieldKind::Unknown => None,
        }
    }
}

/// Result of the field classification helper
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldInfo {
    pub xtype: String,
    pub kind: FieldKind,
}

/// A named field on a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub form_cq: ComponentQuery,
    pub name: String,
}

impl FieldDescriptor {
    pub fn new(form_cq: impl Into<ComponentQuery>, name: impl Into<String>) -> Self {
        Self { form_cq: form_cq.into(), name: name.into() }
    }

    /// Component query addressing this field; also addresses its store for comboboxes
    pub fn component_query(&self) -> ComponentQuery {
        self.form_cq.named_component(&self.name)
    }

    fn not_found(&self) -> BrowserError {
        BrowserError::FieldNotFound { form_cq: self.form_cq.to_string(), name: self.name.clone() }
    }
}

/// The value to put into a field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ValueSpec {
    /// A string, number, boolean or null; typed or assigned depending on the field
    Scalar(Value),

    /// Partial record data to select from the field's store
    Record {
        /// Text typed into a remotely filtered combobox to load candidate records
        filter_text: Option<String>,
        data: Map<String, Value>,
    },
}

impl ValueSpec {
    pub fn record(data: Map<String, Value>) -> Self {
        ValueSpec::Record { filter_text: None, data }
    }

    pub fn filtered(filter_text: impl Into<String>, data: Map<String, Value>) -> Self {
        ValueSpec::Record { filter_text: Some(filter_text.into()), data }
    }

    /// Build a value from JSON
    ///
    /// Objects with a `value` member take it as the value and an optional `filterText`
    /// member as filter text; other objects are record data themselves. A `filterText`
    /// without a `value` is rejected, and empty filter text counts as none.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(mut object) => {
                let filter_member = object.remove("filterText");
                let filter_text = match &filter_member {
                    None | Some(Value::Null) => None,
                    Some(Value::String(text)) => Some(text.clone()),
                    Some(other) => Some(scalar_text(other)),
                }
                .filter(|text| !text.is_empty());

                match object.remove("value") {
                    Some(Value::Object(data)) => Ok(ValueSpec::Record { filter_text, data }),
                    Some(Value::Array(_)) => Err(BrowserError::invalid_argument("value", "a list is not a field value")),
                    Some(scalar) => Ok(ValueSpec::Scalar(scalar)),
                    None if filter_member.is_some() => {
                        Err(BrowserError::invalid_argument("value", "filterText was given without a value member"))
                    }
                    None => Ok(ValueSpec::Record { filter_text, data: object }),
                }
            }
            Value::Array(_) => Err(BrowserError::invalid_argument("value", "a list is not a field value")),
            scalar => Ok(ValueSpec::Scalar(scalar)),
        }
    }
}

impl TryFrom<Value> for ValueSpec {
    type Error = BrowserError;

    fn try_from(value: Value) -> Result<Self> {
        ValueSpec::from_json(value)
    }
}

impl From<&str> for ValueSpec {
    fn from(text: &str) -> Self {
        ValueSpec::Scalar(Value::String(text.to_string()))
    }
}

impl From<i64> for ValueSpec {
    fn from(number: i64) -> Self {
        ValueSpec::Scalar(Value::from(number))
    }
}

impl From<f64> for ValueSpec {
    fn from(number: f64) -> Self {
        ValueSpec::Scalar(Value::from(number))
    }
}

impl From<bool> for ValueSpec {
    fn from(flag: bool) -> Self {
        ValueSpec::Scalar(Value::Bool(flag))
    }
}

/// Text typed for a scalar; input is character based whatever the value's type
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Reads and writes form fields
pub struct FieldController<'a> {
    ctx: Context<'a>,
}

impl<'a> FieldController<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    fn stores(&self) -> StoreTracker<'a> {
        StoreTracker::new(self.ctx)
    }

    fn keyboard(&self) -> Keyboard<'a> {
        Keyboard::new(self.ctx)
    }

    /// Classify the field, `None` if it does not exist
    pub fn field_info(&self, field: &FieldDescriptor) -> Result<Option<FieldInfo>> {
        let call = HelperCall::GetFieldKind { form_cq: field.form_cq.to_string(), name: field.name.clone() };
        let value = self.ctx.oracle.call(&call)?;
        decode(&call, value)
    }

    /// Wait for the field to be enabled, then return its input element
    pub fn find_field_input_element(&self, field: &FieldDescriptor) -> Result<ElementHandle> {
        let enabled = field.component_query().enabled();
        QueryEvaluator::new(self.ctx).wait_for_single(&enabled, None, self.ctx.config.component_wait)?;

        self.ctx
            .oracle
            .call_handle(&HelperCall::FindFieldInputElement {
                form_cq: field.form_cq.to_string(),
                name: field.name.clone(),
            })?
            .ok_or_else(|| field.not_found())
    }

    /// Set a field's value the way its kind requires
    pub fn set_field_value(&self, field: &FieldDescriptor, value: &ValueSpec) -> Result<()> {
        let info = self.field_info(field)?.ok_or_else(|| field.not_found())?;
        let strategy = info.kind.strategy().ok_or_else(|| BrowserError::UnsupportedFieldKind {
            form_cq: field.form_cq.to_string(),
            name: field.name.clone(),
            xtype: info.xtype.clone(),
        })?;

        // an empty payload would match any record
        if matches!(value, ValueSpec::Record { data, .. } if data.is_empty()) {
            return Err(BrowserError::invalid_argument(
                "value",
                format!("record for field '{}' on form '{}' has no data to match", field.name, field.form_cq),
            ));
        }

        log::info!("Setting field '{}' on form '{}' ({}) to {:?}", field.name, field.form_cq, info.xtype, value);

        match (strategy, value) {
            (AssignStrategy::Type, ValueSpec::Scalar(scalar)) => {
                let input = self.find_field_input_element(field)?;
                self.keyboard().type_into_element(&input, &scalar_text(scalar), TypeOptions::default())
            }
            (AssignStrategy::Assign, ValueSpec::Scalar(scalar)) => self.set_field_value_directly(field, scalar),
            (AssignStrategy::ComboBox { remote: false }, ValueSpec::Scalar(scalar)) => {
                let input = self.find_field_input_element(field)?;
                // the typed value does not always stick unless focus moves away
                self.keyboard().type_into_element(&input, &scalar_text(scalar), TypeOptions::new().tab_off(true))
            }
            (AssignStrategy::ComboBox { remote: false }, ValueSpec::Record { data, .. }) => {
                self.select_or_fail(field, data)
            }
            (AssignStrategy::ComboBox { remote: true }, ValueSpec::Scalar(scalar)) => {
                self.filter_remote_combobox(field, &scalar_text(scalar))?;
                self.keyboard().type_tab(None)
            }
            (AssignStrategy::ComboBox { remote: true }, ValueSpec::Record { filter_text: Some(filter_text), data }) => {
                self.filter_remote_combobox(field, filter_text)?;
                self.select_or_fail(field, data)
            }
            (AssignStrategy::ComboBox { remote: true }, ValueSpec::Record { filter_text: None, .. }) => {
                Err(BrowserError::invalid_argument(
                    "value",
                    format!(
                        "combobox '{}' on form '{}' is remotely filtered, so the record needs non-empty filter text",
                        field.name, field.form_cq
                    ),
                ))
            }
            (_, ValueSpec::Record { .. }) => Err(BrowserError::invalid_argument(
                "value",
                format!(
                    "field '{}' on form '{}' is a {} without a store, so a record cannot be selected",
                    field.name, field.form_cq, info.xtype
                ),
            )),
        }
    }

    /// Type filter text into a remotely filtered combobox and wait for its store to settle
    fn filter_remote_combobox(&self, field: &FieldDescriptor, filter_text: &str) -> Result<()> {
        let stores = self.stores();
        let store_cq = field.component_query();

        stores.reset_load_count(&store_cq)?;

        let input = self.find_field_input_element(field)?;
        self.keyboard().type_into_element(&input, filter_text, TypeOptions::new().realistic(false))?;

        stores.wait_for_loaded(&store_cq, None)?;
        stores.wait_for_quiet_period()
    }

    fn select_or_fail(&self, field: &FieldDescriptor, data: &Map<String, Value>) -> Result<()> {
        if self.select_combobox_value(field, data)? {
            Ok(())
        } else {
            Err(BrowserError::RecordNotFound {
                form_cq: field.form_cq.to_string(),
                name: field.name.clone(),
                data: Value::Object(data.clone()),
            })
        }
    }

    /// Select the first record in the field's store whose data contains `payload`
    ///
    /// Waits for the store to be loaded first. The select event is fired when a record
    /// is applied. Returns whether a record was found.
    pub fn select_combobox_value(&self, field: &FieldDescriptor, payload: &Map<String, Value>) -> Result<bool> {
        let stores = self.stores();
        let store_cq = field.component_query();

        stores.wait_for_loaded(&store_cq, None)?;

        let Some(index) = stores.find_record(&store_cq, payload)? else {
            log::debug!("No record matching {:?} in combobox '{}'", payload, field.name);
            return Ok(false);
        };

        self.ctx.oracle.call_bool(&HelperCall::SelectComboBoxRecord {
            form_cq: field.form_cq.to_string(),
            name: field.name.clone(),
            index,
        })
    }

    /// Set the field's value property without simulating input
    pub fn set_field_value_directly(&self, field: &FieldDescriptor, value: &Value) -> Result<()> {
        self.ctx.oracle.call_unit(&HelperCall::SetFieldValue {
            form_cq: field.form_cq.to_string(),
            name: field.name.clone(),
            value: value.clone(),
        })
    }

    pub fn get_field_value(&self, field: &FieldDescriptor) -> Result<Value> {
        self.ctx
            .oracle
            .call(&HelperCall::GetFieldValue { form_cq: field.form_cq.to_string(), name: field.name.clone() })
    }

    /// Display value of comboboxes and display fields, null for other kinds
    pub fn get_field_display_value(&self, field: &FieldDescriptor) -> Result<Value> {
        self.ctx
            .oracle
            .call(&HelperCall::GetFieldDisplayValue { form_cq: field.form_cq.to_string(), name: field.name.clone() })
    }

    /// Raw (unparsed) value, e.g. the text of a date field
    pub fn get_field_raw_value(&self, field: &FieldDescriptor) -> Result<Value> {
        self.ctx
            .oracle
            .call(&HelperCall::GetFieldRawValue { form_cq: field.form_cq.to_string(), name: field.name.clone() })
    }

    pub fn check_field_value(&self, field: &FieldDescriptor, expected: &Value) -> Result<bool> {
        Ok(self.get_field_value(field)? == *expected)
    }

    /// Focus a field by index or name, optionally checking it took and trying once more
    pub fn focus_field(&self, form_cq: &ComponentQuery, field: &FieldRef, check_after: bool) -> Result<()> {
        let call = HelperCall::FocusField { form_cq: form_cq.to_string(), field: field.clone() };

        log::info!("Focusing field {} on form '{}'", field, form_cq);
        self.ctx.oracle.call_unit(&call)?;

        if check_after {
            if self.does_field_have_focus(form_cq, field)? {
                log::debug!("Field {} on form '{}' has focus", field, form_cq);
            } else {
                log::debug!("Field {} on form '{}' does not have focus, trying again", field, form_cq);
                self.ctx.oracle.call_unit(&call)?;
            }
        }

        Ok(())
    }

    pub fn does_field_have_focus(&self, form_cq: &ComponentQuery, field: &FieldRef) -> Result<bool> {
        self.ctx.oracle.call_bool(&HelperCall::DoesFieldHaveFocus { form_cq: form_cq.to_string(), field: field.clone() })
    }

    pub fn wait_until_field_has_focus(&self, form_cq: &ComponentQuery, field: &FieldRef) -> Result<()> {
        let description = format!("field {} on form '{}' to have focus", field, form_cq);
        poller::wait_until(&description, self.ctx.config.focus_wait, || self.does_field_have_focus(form_cq, field))
    }
}
