use crate::error::Result;
use crate::query::{ComponentQuery, FieldRef};
use crate::sync::{FieldController, FieldDescriptor, FormFiller, ValueSpec};
use crate::tools::{Tool, ToolContext, ToolResult};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for the set_field tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SetFieldParams {
    /// Component query of the form holding the field
    pub form_cq: String,

    /// Field name
    pub name: String,

    /// A scalar, record data to select, or `{"filterText": ..., "value": {...}}` for
    /// remotely filtered comboboxes
    pub value: Value,
}

#[derive(Default)]
pub struct SetFieldTool;

impl Tool for SetFieldTool {
    type Params = SetFieldParams;

    fn name(&self) -> &str {
        "set_field"
    }

    fn description(&self) -> &str {
        "Set a form field's value by typing, assigning or selecting a store record as its kind requires"
    }

    fn execute_typed(&self, params: SetFieldParams, context: &mut ToolContext) -> Result<ToolResult> {
        let field = FieldDescriptor::new(params.form_cq.as_str(), params.name.as_str());
        let value = ValueSpec::from_json(params.value)?;

        FieldController::new(context.ctx).set_field_value(&field, &value)?;

        Ok(ToolResult::success_with(serde_json::json!({
            "form_cq": params.form_cq,
            "name": params.name,
        })))
    }
}

/// Parameters for the get_field tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetFieldParams {
    /// Component query of the form holding the field
    pub form_cq: String,

    /// Field name
    pub name: String,
}

#[derive(Default)]
pub struct GetFieldTool;

impl Tool for GetFieldTool {
    type Params = GetFieldParams;

    fn name(&self) -> &str {
        "get_field"
    }

    fn description(&self) -> &str {
        "Read a form field's value, display value and raw value"
    }

    fn execute_typed(&self, params: GetFieldParams, context: &mut ToolContext) -> Result<ToolResult> {
        let field = FieldDescriptor::new(params.form_cq.as_str(), params.name.as_str());
        let fields = FieldController::new(context.ctx);

        Ok(ToolResult::success_with(serde_json::json!({
            "value": fields.get_field_value(&field)?,
            "display_value": fields.get_field_display_value(&field)?,
            "raw_value": fields.get_field_raw_value(&field)?,
        })))
    }
}

/// Parameters for the focus_field tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FocusFieldParams {
    /// Component query of the form holding the field
    pub form_cq: String,

    /// Zero-based field index or field name
    pub field: FieldRef,

    /// Check focus took and try once more if not (default: true)
    #[serde(default = "default_true")]
    pub check_after: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Default)]
pub struct FocusFieldTool;

impl Tool for FocusFieldTool {
    type Params = FocusFieldParams;

    fn name(&self) -> &str {
        "focus_field"
    }

    fn description(&self) -> &str {
        "Move focus to a form field by index or name"
    }

    fn execute_typed(&self, params: FocusFieldParams, context: &mut ToolContext) -> Result<ToolResult> {
        let form_cq = ComponentQuery::new(params.form_cq.as_str());
        let fields = FieldController::new(context.ctx);

        fields.focus_field(&form_cq, &params.field, params.check_after)?;
        let focused = fields.does_field_have_focus(&form_cq, &params.field)?;

        Ok(ToolResult::success_with(serde_json::json!({ "focused": focused })))
    }
}

/// Values for the fill_form tool: named fields, or values to type field after field
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FormValues {
    Named(IndexMap<String, Value>),
    Sequence(Vec<Value>),
}

/// Parameters for the fill_form tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FillFormParams {
    /// Component query of the form
    pub form_cq: String,

    pub values: FormValues,

    /// Field to start typing from when `values` is a list (default: the first field)
    #[serde(default)]
    pub start: Option<FieldRef>,
}

#[derive(Default)]
pub struct FillFormTool;

impl Tool for FillFormTool {
    type Params = FillFormParams;

    fn name(&self) -> &str {
        "fill_form"
    }

    fn description(&self) -> &str {
        "Set several form fields in order, by name or by tabbing through the form"
    }

    fn execute_typed(&self, params: FillFormParams, context: &mut ToolContext) -> Result<ToolResult> {
        let form_cq = ComponentQuery::new(params.form_cq.as_str());
        let forms = FormFiller::new(context.ctx);

        let count = match params.values {
            FormValues::Named(values) => {
                let values = values
                    .into_iter()
                    .map(|(name, value)| ValueSpec::from_json(value).map(|spec| (name, spec)))
                    .collect::<Result<IndexMap<_, _>>>()?;
                forms.set_form_values(&form_cq, &values)?;
                values.len()
            }
            FormValues::Sequence(values) => {
                let start = params.start.unwrap_or(FieldRef::Index(0));
                forms.type_form_values(&form_cq, &values, Some(&start))?;
                values.len()
            }
        };

        Ok(ToolResult::success_with(serde_json::json!({ "fields": count })))
    }
}
