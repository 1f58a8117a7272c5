//! Static content and field labels

use crate::forms::attributes::{AttributeBag, BasicAttributes};
use crate::forms::element::Element;
use crate::forms::html::escape_html;

/// Pre-built markup placed in a row as-is
#[derive(Debug, Clone, Default)]
pub struct Content {
    content: String,
    attributes: AttributeBag,
}

impl Content {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            attributes: AttributeBag::new(),
        }
    }

    /// Plain text, escaped before it is stored
    pub fn text(text: &str) -> Self {
        Self::new(escape_html(text))
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl BasicAttributes for Content {
    fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }
}

impl Element for Content {
    fn name(&self) -> Option<&str> {
        None
    }

    fn output(&self) -> String {
        if self.attributes.is_empty() {
            self.content.clone()
        } else {
            format!("<div{}>{}</div>", self.attributes.to_html(), self.content)
        }
    }
}

/// Label for a named field, with an optional description line
#[derive(Debug, Clone)]
pub struct Label {
    for_field: String,
    label: String,
    description: String,
}

impl Label {
    pub fn new(for_field: &str, label: &str) -> Self {
        Self {
            for_field: for_field.to_string(),
            label: label.to_string(),
            description: String::new(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn for_field(&self) -> &str {
        &self.for_field
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Element for Label {
    fn name(&self) -> Option<&str> {
        None
    }

    fn output(&self) -> String {
        let mut out = format!(
            "<label for=\"{}\"><b>{}</b></label>",
            escape_html(&self.for_field),
            escape_html(&self.label)
        );
        if !self.description.is_empty() {
            out.push_str(&format!(
                "<br/><span class=\"emphasis small\">{}</span>",
                escape_html(&self.description)
            ));
        }
        out
    }
}
