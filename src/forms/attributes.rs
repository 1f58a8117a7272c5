//! Attribute store shared by every renderable form piece

use super::html::escape_html;
use std::collections::BTreeMap;

/// Name/value HTML attributes, rendered in sorted key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeBag {
    values: BTreeMap<String, String>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as ` name="value"` pairs, ready to splice into an opening tag.
    /// Empty values render as bare attributes (`required`, `disabled`).
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.values {
            out.push(' ');
            out.push_str(&escape_html(name));
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&escape_html(value));
                out.push('"');
            }
        }
        out
    }
}

/// Common accessors for anything carrying an [`AttributeBag`]
pub trait BasicAttributes {
    fn attributes(&self) -> &AttributeBag;
    fn attributes_mut(&mut self) -> &mut AttributeBag;

    /// Get an attribute value, `""` when never set
    fn attribute(&self, name: &str) -> &str {
        self.attributes().get(name).unwrap_or("")
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.attributes_mut().set(name, value);
        self
    }

    fn id(&self) -> &str {
        self.attribute("id")
    }

    fn set_id(&mut self, id: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.set_attribute("id", id)
    }

    fn class(&self) -> &str {
        self.attribute("class")
    }

    fn set_class(&mut self, class: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.set_attribute("class", class)
    }

    /// Append a class name unless it is already present
    fn add_class(&mut self, class: &str) -> &mut Self
    where
        Self: Sized,
    {
        let current = self.class();
        if current.split_whitespace().any(|c| c == class) {
            return self;
        }
        let combined = if current.is_empty() {
            class.to_string()
        } else {
            format!("{current} {class}")
        };
        self.set_attribute("class", &combined)
    }
}
