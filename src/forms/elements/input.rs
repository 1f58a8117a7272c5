//! Text, password and number inputs

use crate::error::FormError;
use crate::forms::attributes::{AttributeBag, BasicAttributes};
use crate::forms::element::{
    data_key, load_flag_state, Element, StateKind, StatefulElement, SubmittedData,
};

/// Single-line text input
#[derive(Debug, Clone)]
pub struct TextField {
    attributes: AttributeBag,
}

impl TextField {
    pub fn new(name: &str) -> Self {
        Self::with_type(name, "text")
    }

    fn with_type(name: &str, input_type: &str) -> Self {
        let mut attributes = AttributeBag::new();
        attributes.set("type", input_type);
        attributes.set("name", name);
        attributes.set("id", name);
        Self { attributes }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn max_length(mut self, length: usize) -> Self {
        self.attributes.set("maxlength", length.to_string());
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.attributes.set("placeholder", placeholder);
        self
    }

    pub fn required(mut self) -> Self {
        self.attributes.set("required", "");
        self
    }

    pub fn value(&self) -> &str {
        self.attribute("value")
    }

    pub fn set_value(&mut self, value: &str) {
        self.attributes.set("value", value);
    }

    pub fn is_required(&self) -> bool {
        self.attributes.contains("required")
    }

    fn field_name(&self) -> &str {
        self.attribute("name")
    }
}

impl BasicAttributes for TextField {
    fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }
}

impl Element for TextField {
    fn name(&self) -> Option<&str> {
        Some(self.field_name())
    }

    fn output(&self) -> String {
        format!("<input{}>", self.attributes.to_html())
    }

    fn load_from(&mut self, data: &SubmittedData) -> Result<(), FormError> {
        if let Some(value) = data.get(data_key(self.field_name())).and_then(|v| v.as_single()) {
            let value = value.to_string();
            self.set_value(&value);
        }
        Ok(())
    }

    fn as_stateful_mut(&mut self) -> Option<&mut dyn StatefulElement> {
        Some(self)
    }
}

impl StatefulElement for TextField {
    fn supports_state(&self, kind: StateKind) -> bool {
        matches!(
            kind,
            StateKind::Disabled | StateKind::Required | StateKind::ReadOnly
        )
    }

    fn load_state(&mut self, kind: StateKind, data: &SubmittedData) -> Result<(), FormError> {
        let name = self.field_name().to_string();
        load_flag_state(&mut self.attributes, kind, &name, data);
        Ok(())
    }
}

/// Password input. Loaded data never populates its value.
#[derive(Debug, Clone)]
pub struct Password {
    inner: TextField,
}

impl Password {
    pub fn new(name: &str) -> Self {
        Self {
            inner: TextField::with_type(name, "password"),
        }
    }

    pub fn max_length(mut self, length: usize) -> Self {
        self.inner = self.inner.max_length(length);
        self
    }

    pub fn required(mut self) -> Self {
        self.inner = self.inner.required();
        self
    }

    /// Browser autocomplete hint, e.g. `current-password` or `new-password`
    pub fn autocomplete(mut self, hint: &str) -> Self {
        self.inner.attributes.set("autocomplete", hint);
        self
    }
}

impl BasicAttributes for Password {
    fn attributes(&self) -> &AttributeBag {
        &self.inner.attributes
    }
    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.inner.attributes
    }
}

impl Element for Password {
    fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    fn output(&self) -> String {
        self.inner.output()
    }

    fn load_from(&mut self, _data: &SubmittedData) -> Result<(), FormError> {
        Ok(())
    }

    fn as_stateful_mut(&mut self) -> Option<&mut dyn StatefulElement> {
        Some(&mut self.inner)
    }
}

/// Numeric input; submitted values must parse as numbers
#[derive(Debug, Clone)]
pub struct NumberField {
    inner: TextField,
}

impl NumberField {
    pub fn new(name: &str) -> Self {
        Self {
            inner: TextField::with_type(name, "number"),
        }
    }

    pub fn min(mut self, min: f64) -> Self {
        self.inner.attributes.set("min", min.to_string());
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.inner.attributes.set("max", max.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.inner = self.inner.required();
        self
    }

    pub fn value(&self) -> Option<f64> {
        self.inner.value().parse().ok()
    }
}

impl BasicAttributes for NumberField {
    fn attributes(&self) -> &AttributeBag {
        &self.inner.attributes
    }
    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.inner.attributes
    }
}

impl Element for NumberField {
    fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    fn output(&self) -> String {
        self.inner.output()
    }

    fn load_from(&mut self, data: &SubmittedData) -> Result<(), FormError> {
        let Some(raw) = data
            .get(data_key(self.inner.field_name()))
            .and_then(|v| v.as_single())
        else {
            return Ok(());
        };
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.parse::<f64>().is_err() {
            return Err(FormError::InvalidValue {
                name: self.inner.field_name().to_string(),
                value: raw.to_string(),
                reason: "not a number".to_string(),
            });
        }
        let trimmed = trimmed.to_string();
        self.inner.set_value(&trimmed);
        Ok(())
    }

    fn as_stateful_mut(&mut self) -> Option<&mut dyn StatefulElement> {
        Some(&mut self.inner)
    }
}
