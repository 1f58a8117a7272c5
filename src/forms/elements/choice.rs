//! Checkbox and select elements

use crate::error::FormError;
use crate::forms::attributes::{AttributeBag, BasicAttributes};
use crate::forms::element::{
    data_key, load_flag_state, Element, StateKind, StatefulElement, SubmittedData,
};
use crate::forms::html::escape_html;

/// A single checkbox with an inline description
#[derive(Debug, Clone)]
pub struct Checkbox {
    attributes: AttributeBag,
    description: String,
}

impl Checkbox {
    pub fn new(name: &str) -> Self {
        let mut attributes = AttributeBag::new();
        attributes.set("type", "checkbox");
        attributes.set("name", name);
        attributes.set("id", name);
        attributes.set("value", "on");
        Self {
            attributes,
            description: String::new(),
        }
    }

    /// The value submitted when checked (default `on`)
    pub fn with_value(mut self, value: &str) -> Self {
        self.attributes.set("value", value);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.set_checked(checked);
        self
    }

    pub fn set_checked(&mut self, checked: bool) {
        if checked {
            self.attributes.set("checked", "");
        } else {
            self.attributes.remove("checked");
        }
    }

    pub fn is_checked(&self) -> bool {
        self.attributes.contains("checked")
    }

    fn field_name(&self) -> &str {
        self.attribute("name")
    }

    fn check_from(&mut self, data: &SubmittedData) {
        if let Some(submitted) = data.get(data_key(self.field_name())) {
            let checked = submitted.contains(self.attribute("value"));
            self.set_checked(checked);
        }
    }
}

impl BasicAttributes for Checkbox {
    fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }
}

impl Element for Checkbox {
    fn name(&self) -> Option<&str> {
        Some(self.field_name())
    }

    fn output(&self) -> String {
        let mut out = format!("<input{}>", self.attributes.to_html());
        if !self.description.is_empty() {
            out.push_str(&format!(
                " <label for=\"{}\">{}</label>",
                escape_html(self.id()),
                escape_html(&self.description)
            ));
        }
        out
    }

    fn load_from(&mut self, data: &SubmittedData) -> Result<(), FormError> {
        self.check_from(data);
        Ok(())
    }

    fn as_stateful_mut(&mut self) -> Option<&mut dyn StatefulElement> {
        Some(self)
    }
}

impl StatefulElement for Checkbox {
    fn supports_state(&self, kind: StateKind) -> bool {
        matches!(
            kind,
            StateKind::Checked | StateKind::Disabled | StateKind::Required
        )
    }

    fn load_state(&mut self, kind: StateKind, data: &SubmittedData) -> Result<(), FormError> {
        match kind {
            StateKind::Checked => self.check_from(data),
            _ => {
                let name = self.field_name().to_string();
                load_flag_state(&mut self.attributes, kind, &name, data);
            }
        }
        Ok(())
    }
}

/// Drop-down list of value/label options
#[derive(Debug, Clone)]
pub struct Select {
    attributes: AttributeBag,
    options: Vec<(String, String)>,
    placeholder: Option<String>,
    selected: Option<String>,
}

impl Select {
    pub fn new(name: &str) -> Self {
        let mut attributes = AttributeBag::new();
        attributes.set("name", name);
        attributes.set("id", name);
        Self {
            attributes,
            options: Vec::new(),
            placeholder: None,
            selected: None,
        }
    }

    pub fn from_array<I, V, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.options
            .extend(options.into_iter().map(|(v, l)| (v.into(), l.into())));
        self
    }

    /// Empty first option shown before anything is chosen
    pub fn placeholder(mut self, label: &str) -> Self {
        self.placeholder = Some(label.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.attributes.set("required", "");
        self
    }

    pub fn selected(mut self, value: &str) -> Self {
        self.selected = Some(value.to_string());
        self
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|(v, _)| v == value)
    }

    fn field_name(&self) -> &str {
        self.attribute("name")
    }
}

impl BasicAttributes for Select {
    fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }
}

impl Element for Select {
    fn name(&self) -> Option<&str> {
        Some(self.field_name())
    }

    fn output(&self) -> String {
        let mut out = format!("<select{}>", self.attributes.to_html());
        if let Some(placeholder) = &self.placeholder {
            out.push_str(&format!(
                "<option value=\"\">{}</option>",
                escape_html(placeholder)
            ));
        }
        for (value, label) in &self.options {
            let selected = if self.selected.as_deref() == Some(value.as_str()) {
                " selected"
            } else {
                ""
            };
            out.push_str(&format!(
                "<option value=\"{}\"{}>{}</option>",
                escape_html(value),
                selected,
                escape_html(label)
            ));
        }
        out.push_str("</select>");
        out
    }

    fn load_from(&mut self, data: &SubmittedData) -> Result<(), FormError> {
        let Some(value) = data.get(data_key(self.field_name())).and_then(|v| v.as_single()) else {
            return Ok(());
        };
        if value.is_empty() {
            self.selected = None;
            return Ok(());
        }
        if !self.has_option(value) {
            return Err(FormError::UnknownOption {
                name: self.field_name().to_string(),
                value: value.to_string(),
            });
        }
        self.selected = Some(value.to_string());
        Ok(())
    }

    fn as_stateful_mut(&mut self) -> Option<&mut dyn StatefulElement> {
        Some(self)
    }
}

impl StatefulElement for Select {
    fn supports_state(&self, kind: StateKind) -> bool {
        matches!(kind, StateKind::Disabled | StateKind::Required)
    }

    fn load_state(&mut self, kind: StateKind, data: &SubmittedData) -> Result<(), FormError> {
        let name = self.field_name().to_string();
        load_flag_state(&mut self.attributes, kind, &name, data);
        Ok(())
    }
}
