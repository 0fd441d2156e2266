use crate::error::Result;
use crate::query::{ComponentQuery, FieldRef, QueryEvaluator};
use crate::sync::Context;
use crate::sync::field::{FieldController, FieldDescriptor, ValueSpec, scalar_text};
use crate::sync::keyboard::Keyboard;
use indexmap::IndexMap;
use serde_json::Value;
use std::time::Duration;

/// Pause after each Tab when typing a list of values through a form
const TAB_PAUSE: Duration = Duration::from_millis(100);

/// Fills in and submits whole forms
pub struct FormFiller<'a> {
    ctx: Context<'a>,
}

impl<'a> FormFiller<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    fn fields(&self) -> FieldController<'a> {
        FieldController::new(self.ctx)
    }

    /// Set each named field in map order
    pub fn set_form_values(&self, form_cq: &ComponentQuery, values: &IndexMap<String, ValueSpec>) -> Result<()> {
        log::info!("Populating form '{}' with {} value(s)", form_cq, values.len());

        let fields = self.fields();
        for (name, value) in values {
            fields.set_field_value(&FieldDescriptor::new(form_cq.clone(), name.clone()), value)?;
        }

        Ok(())
    }

    /// Type `values` into consecutive fields, tabbing on after each one
    ///
    /// Focus is first moved to `start` unless it is `None`. A null or empty value leaves
    /// its field untouched. Only fields that accept typing behave as expected.
    pub fn type_form_values(&self, form_cq: &ComponentQuery, values: &[Value], start: Option<&FieldRef>) -> Result<()> {
        log::info!("Typing {} value(s) into form '{}'", values.len(), form_cq);

        if let Some(start) = start {
            let fields = self.fields();
            if !fields.does_field_have_focus(form_cq, start)? {
                fields.focus_field(form_cq, start, false)?;
            }
            fields.wait_until_field_has_focus(form_cq, start)?;
        }

        let keyboard = Keyboard::new(self.ctx);
        for value in values {
            let text = scalar_text(value);
            if !text.is_empty() {
                keyboard.type_text(&text, self.ctx.config.typing.realistic)?;
            }

            keyboard.type_tab(Some(TAB_PAUSE))?;
        }

        Ok(())
    }

    /// Click the button labelled `text` inside the form
    pub fn submit_by_button(&self, form_cq: &ComponentQuery, text: &str) -> Result<()> {
        let query = QueryEvaluator::new(self.ctx);
        let form = query.wait_for_single_visible(form_cq, None, self.ctx.config.component_wait)?;

        log::info!("Submitting form '{}' with button '{}'", form_cq, text);
        let button = ComponentQuery::new("button").with_attribute("text", text);
        query.click_component(&button, Some(form.dom_id()))
    }
}
