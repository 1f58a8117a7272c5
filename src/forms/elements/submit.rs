//! Submit button

use crate::forms::attributes::{AttributeBag, BasicAttributes};
use crate::forms::element::Element;

/// Form submit button
#[derive(Debug, Clone)]
pub struct Submit {
    attributes: AttributeBag,
}

impl Submit {
    pub fn new(label: &str) -> Self {
        let mut attributes = AttributeBag::new();
        attributes.set("type", "submit");
        attributes.set("value", label);
        Self { attributes }
    }

    pub fn label(&self) -> &str {
        self.attribute("value")
    }
}

impl Default for Submit {
    fn default() -> Self {
        Self::new("Submit")
    }
}

impl BasicAttributes for Submit {
    fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }
}

impl Element for Submit {
    fn name(&self) -> Option<&str> {
        None
    }

    fn output(&self) -> String {
        format!("<input{}>", self.attributes.to_html())
    }
}
