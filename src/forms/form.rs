//! The form aggregate

use super::action::Action;
use super::attributes::{AttributeBag, BasicAttributes};
use super::context::FormContext;
use super::element::{StateKind, SubmittedData};
use super::factory::FormFactory;
use super::html::{escape_html, escape_js_string};
use super::layout::{Row, Trigger};
use super::view::FormRenderer;
use crate::error::FormError;
use crate::locale::{Locale, PassthroughLocale};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A name/value pair rendered as `<input type="hidden">`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenValue {
    pub name: String,
    pub value: String,
}

impl HiddenValue {
    pub fn output(&self) -> String {
        format!(
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            escape_html(&self.name),
            escape_html(&self.value)
        )
    }
}

/// A renderable form: rows of elements, triggers, hidden values and header
/// actions, turned into markup by its renderer.
///
/// Built once per request, rendered, then dropped.
pub struct Form {
    attributes: AttributeBag,
    title: String,
    description: String,
    factory: Arc<dyn FormFactory>,
    renderer: Arc<dyn FormRenderer>,
    locale: Arc<dyn Locale>,
    rows: Vec<Row>,
    triggers: Vec<(String, Trigger)>,
    values: Vec<HiddenValue>,
    header: Vec<Action>,
    steps: Vec<String>,
    step: Option<usize>,
}

impl Form {
    /// Create a form with a specific factory and renderer
    pub fn new(
        factory: Arc<dyn FormFactory>,
        renderer: Arc<dyn FormRenderer>,
        action: &str,
        method: &str,
    ) -> Self {
        let mut form = Self {
            attributes: AttributeBag::new(),
            title: String::new(),
            description: String::new(),
            factory,
            renderer,
            locale: Arc::new(PassthroughLocale::default()),
            rows: Vec::new(),
            triggers: Vec::new(),
            values: Vec::new(),
            header: Vec::new(),
            steps: Vec::new(),
            step: None,
        };
        form.set_action(action)
            .set_method(method)
            .set_autocomplete(true)
            .set_attribute("enctype", "multipart/form-data");
        form
    }

    /// Create a standard `post` form using the context's factory and renderer
    pub fn create(ctx: &FormContext, id: &str, action: &str) -> Self {
        Self::create_with(ctx, id, action, "post", ctx.form_class())
    }

    pub fn create_with(
        ctx: &FormContext,
        id: &str,
        action: &str,
        method: &str,
        class: &str,
    ) -> Self {
        let mut form = Self::new(ctx.factory(), ctx.renderer(), action, method);
        form.locale = ctx.locale();
        form.set_id(id).set_class(class).set_autocomplete(ctx.autocomplete());
        form
    }

    /// Create a form laid out as a table
    pub fn create_table(ctx: &FormContext, id: &str, action: &str) -> Self {
        Self::create_table_with(ctx, id, action, "post", ctx.table_class())
    }

    pub fn create_table_with(
        ctx: &FormContext,
        id: &str,
        action: &str,
        method: &str,
        class: &str,
    ) -> Self {
        let mut form = Self::create_with(ctx, id, action, method, class);
        form.set_renderer(ctx.table_renderer());
        form
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) -> &mut Self {
        self.description = description.to_string();
        self
    }

    pub fn factory(&self) -> &Arc<dyn FormFactory> {
        &self.factory
    }

    pub fn set_factory(&mut self, factory: Arc<dyn FormFactory>) -> &mut Self {
        self.factory = factory;
        self
    }

    pub fn renderer(&self) -> &Arc<dyn FormRenderer> {
        &self.renderer
    }

    pub fn set_renderer(&mut self, renderer: Arc<dyn FormRenderer>) -> &mut Self {
        tracing::debug!(form = %self.id(), "form renderer replaced");
        self.renderer = renderer;
        self
    }

    pub fn locale(&self) -> &Arc<dyn Locale> {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: Arc<dyn Locale>) -> &mut Self {
        self.locale = locale;
        self
    }

    /// HTTP method, `post` unless changed
    pub fn method(&self) -> &str {
        self.attribute("method")
    }

    pub fn set_method(&mut self, method: &str) -> &mut Self {
        self.set_attribute("method", method)
    }

    pub fn action(&self) -> &str {
        self.attribute("action")
    }

    /// Set the submission URL; a leading `/` is dropped
    pub fn set_action(&mut self, action: &str) -> &mut Self {
        self.set_attribute("action", action.trim_start_matches('/'))
    }

    pub fn autocomplete(&self) -> &str {
        self.attribute("autocomplete")
    }

    pub fn set_autocomplete(&mut self, enabled: bool) -> &mut Self {
        self.set_attribute("autocomplete", if enabled { "on" } else { "off" })
    }

    /// Set a raw autocomplete value such as `new-password`
    pub fn set_autocomplete_value(&mut self, value: &str) -> &mut Self {
        self.set_attribute("autocomplete", value)
    }

    /// Add a row. It starts under the heading the previous row has at the
    /// time of the call, so a heading set on a row after adding it carries on.
    pub fn add_row(&mut self, id: &str) -> &mut Row {
        let heading = self
            .rows
            .last()
            .map(|previous| previous.heading().to_string())
            .unwrap_or_default();
        let mut row = self.factory.create_row(id);
        row.set_heading(&heading);
        self.rows.push(row);
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Add a row that starts a new section; rows after it inherit `heading`
    pub fn add_section(&mut self, heading: &str, id: &str) -> &mut Row {
        let row = self.add_row(id);
        row.set_heading(heading);
        row
    }

    /// The most recently added row
    pub fn row(&self) -> Option<&Row> {
        self.rows.last()
    }

    pub fn row_mut(&mut self) -> Option<&mut Row> {
        self.rows.last_mut()
    }

    /// Rows holding at least one element, in order
    pub fn rows(&self) -> Vec<&Row> {
        self.rows.iter().filter(|row| !row.is_empty()).collect()
    }

    /// All rows, empty ones included, grouped by heading in first-seen order
    pub fn rows_by_heading(&self) -> Vec<(&str, Vec<&Row>)> {
        let mut groups: Vec<(&str, Vec<&Row>)> = Vec::new();
        for row in &self.rows {
            match groups.iter_mut().find(|(heading, _)| *heading == row.heading()) {
                Some((_, rows)) => rows.push(row),
                None => groups.push((row.heading(), vec![row])),
            }
        }
        groups
    }

    /// Number of rows, empty or not, under exactly `heading`
    pub fn has_heading(&self, heading: &str) -> usize {
        self.rows.iter().filter(|row| row.heading() == heading).count()
    }

    /// Append a hidden value; names may repeat
    pub fn add_hidden_value(&mut self, name: &str, value: &str) -> &mut Self {
        self.values.push(HiddenValue {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn add_hidden_values<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in values {
            self.add_hidden_value(name.as_ref(), value.as_ref());
        }
        self
    }

    pub fn hidden_values(&self) -> &[HiddenValue] {
        &self.values
    }

    /// Store a trigger under `selector`, replacing any trigger already there
    pub fn add_trigger(&mut self, selector: &str, trigger: Trigger) -> &mut Trigger {
        let index = match self.triggers.iter().position(|(key, _)| key == selector) {
            Some(index) => {
                tracing::debug!(selector, "replacing existing trigger");
                self.triggers[index].1 = trigger;
                index
            }
            None => {
                self.triggers.push((selector.to_string(), trigger));
                self.triggers.len() - 1
            }
        };
        &mut self.triggers[index].1
    }

    /// Triggers with their selectors, in the order first added
    pub fn triggers(&self) -> impl Iterator<Item = (&str, &Trigger)> {
        self.triggers.iter().map(|(key, trigger)| (key.as_str(), trigger))
    }

    pub fn trigger(&self, selector: &str) -> Option<&Trigger> {
        self.triggers
            .iter()
            .find(|(key, _)| key == selector)
            .map(|(_, trigger)| trigger)
    }

    /// Show/hide everything with CSS class `class`
    pub fn toggle_visibility_by_class(&mut self, class: &str) -> &mut Trigger {
        let selector = format!(".{class}");
        let trigger = self.factory.create_trigger(&selector);
        self.add_trigger(&selector, trigger)
    }

    /// Show/hide the element with HTML id `id`
    pub fn toggle_visibility_by_id(&mut self, id: &str) -> &mut Trigger {
        let selector = format!("#{id}");
        let trigger = self.factory.create_trigger(&selector);
        self.add_trigger(&selector, trigger)
    }

    /// Mark this as step `current_step` (1-based) of a multi-part form.
    /// Out-of-range steps are rejected and leave the form unchanged.
    pub fn set_multi_part_form<I, S>(
        &mut self,
        steps: I,
        current_step: usize,
    ) -> Result<&mut Self, FormError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let steps: Vec<String> = steps.into_iter().map(Into::into).collect();
        if current_step == 0 || current_step > steps.len() {
            return Err(FormError::StepOutOfRange {
                step: current_step,
                steps: steps.len(),
            });
        }
        self.steps = steps;
        self.step = Some(current_step);
        Ok(self)
    }

    pub fn multi_part_steps(&self) -> &[String] {
        &self.steps
    }

    /// Current step, `None` unless this is a multi-part form
    pub fn current_step(&self) -> Option<usize> {
        self.step
    }

    /// Load values into elements of every non-empty row by matching names.
    /// An element that rejects its value is logged and skipped.
    pub fn load_all_values_from(&mut self, data: &SubmittedData) -> &mut Self {
        for row in self.rows.iter_mut().filter(|row| !row.is_empty()) {
            for err in row.load_from(data) {
                tracing::warn!(
                    form = %self.attributes.get("id").unwrap_or(""),
                    "skipping value: {err}"
                );
            }
        }
        self
    }

    /// Load `kind` state into every element of every non-empty row that
    /// supports it
    pub fn load_state_from(&mut self, kind: StateKind, data: &SubmittedData) -> &mut Self {
        for row in self.rows.iter_mut().filter(|row| !row.is_empty()) {
            for err in row.load_state(kind, data) {
                tracing::warn!(
                    form = %self.attributes.get("id").unwrap_or(""),
                    %kind,
                    "skipping state: {err}"
                );
            }
        }
        self
    }

    /// Add a header action; an action with the same name is replaced in place
    pub fn add_header_action(&mut self, name: &str, label: &str) -> &mut Action {
        let action = Action::new(name, label);
        let index = match self.header.iter().position(|a| a.name() == name) {
            Some(index) => {
                self.header[index] = action;
                index
            }
            None => {
                self.header.push(action);
                self.header.len() - 1
            }
        };
        &mut self.header[index]
    }

    pub fn header(&self) -> &[Action] {
        &self.header
    }

    /// Ask the user to confirm before the form submits
    pub fn add_confirmation(&mut self, message: &str) -> &mut Self {
        let message = self.locale.translate(message, &[]);
        let onsubmit = format!("return confirm(\"{}\")", escape_js_string(&message));
        self.set_attribute("onsubmit", &onsubmit)
    }

    /// Render the form with its current renderer
    pub fn output(&self) -> String {
        self.renderer.render_form(self)
    }
}

impl BasicAttributes for Form {
    fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("attributes", &self.attributes)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("rows", &self.rows)
            .field("triggers", &self.triggers)
            .field("values", &self.values)
            .field("header", &self.header)
            .field("steps", &self.steps)
            .field("step", &self.step)
            .finish_non_exhaustive()
    }
}
