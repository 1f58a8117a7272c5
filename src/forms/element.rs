//! Element contract and submitted-data types
//!
//! Elements are the individual fields a [`Row`](super::Row) holds. The form
//! only needs three things from them: a name, markup, and a way to take a
//! value from submitted data. Elements that track extra state (checked,
//! disabled, ...) expose it through the [`StatefulElement`] capability.

use super::attributes::AttributeBag;
use crate::error::FormError;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Submitted field name to value(s)
pub type SubmittedData = HashMap<String, SubmittedValue>;

/// A submitted value: one string, or several for multi-valued fields.
///
/// JSON numbers and booleans are read as their text, `null` as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmittedValue {
    Single(String),
    Multiple(Vec<String>),
}

impl SubmittedValue {
    /// The value as a single string; multi-valued fields yield their last entry
    pub fn as_single(&self) -> Option<&str> {
        match self {
            SubmittedValue::Single(s) => Some(s),
            SubmittedValue::Multiple(values) => values.last().map(String::as_str),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            SubmittedValue::Single(s) => s == value,
            SubmittedValue::Multiple(values) => values.iter().any(|v| v == value),
        }
    }

    /// Whether the value reads as a yes/on flag
    pub fn is_truthy(&self) -> bool {
        self.as_single().is_some_and(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "y" | "yes" | "on" | "1" | "true"
            )
        })
    }
}

impl<'de> Deserialize<'de> for SubmittedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(values) => values
                .into_iter()
                .map(scalar_text)
                .collect::<Option<Vec<_>>>()
                .map(SubmittedValue::Multiple)
                .ok_or_else(|| {
                    de::Error::custom("list entries must be strings, numbers or booleans")
                }),
            value => scalar_text(value)
                .map(SubmittedValue::Single)
                .ok_or_else(|| {
                    de::Error::custom("expected a string, number, boolean, null or list")
                }),
        }
    }
}

/// Text form of a JSON scalar; `None` for lists and objects
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

impl From<&str> for SubmittedValue {
    fn from(value: &str) -> Self {
        SubmittedValue::Single(value.to_string())
    }
}

impl From<String> for SubmittedValue {
    fn from(value: String) -> Self {
        SubmittedValue::Single(value)
    }
}

impl From<Vec<String>> for SubmittedValue {
    fn from(values: Vec<String>) -> Self {
        SubmittedValue::Multiple(values)
    }
}

/// Kinds of element state that can be loaded separately from values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Checked,
    Disabled,
    Required,
    ReadOnly,
}

impl StateKind {
    /// The boolean HTML attribute carrying this state
    pub fn attribute_name(self) -> &'static str {
        match self {
            StateKind::Checked => "checked",
            StateKind::Disabled => "disabled",
            StateKind::Required => "required",
            StateKind::ReadOnly => "readonly",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_name())
    }
}

/// A single form field
pub trait Element: fmt::Debug {
    /// Field name matched against submitted data; `None` for static content
    fn name(&self) -> Option<&str>;

    /// Render the element to markup
    fn output(&self) -> String;

    /// Take this element's value from `data`. Missing keys leave it unchanged.
    fn load_from(&mut self, _data: &SubmittedData) -> Result<(), FormError> {
        Ok(())
    }

    /// The state-loading capability, when the element has one
    fn as_stateful_mut(&mut self) -> Option<&mut dyn StatefulElement> {
        None
    }
}

/// Capability for elements with state beyond their value
pub trait StatefulElement {
    fn supports_state(&self, kind: StateKind) -> bool;

    fn load_state(&mut self, kind: StateKind, data: &SubmittedData) -> Result<(), FormError>;
}

/// Submitted-data key for a field name: `days[]` is submitted as `days`
pub fn data_key(name: &str) -> &str {
    name.strip_suffix("[]").unwrap_or(name)
}

/// Set or clear the boolean attribute for `kind` from the flag submitted under `name`
pub(crate) fn load_flag_state(
    attributes: &mut AttributeBag,
    kind: StateKind,
    name: &str,
    data: &SubmittedData,
) {
    let Some(value) = data.get(data_key(name)) else {
        return;
    };
    if value.is_truthy() {
        attributes.set(kind.attribute_name(), "");
    } else {
        attributes.remove(kind.attribute_name());
    }
}
