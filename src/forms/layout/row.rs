//! Form rows

use crate::error::FormError;
use crate::forms::attributes::{AttributeBag, BasicAttributes};
use crate::forms::element::{data_key, Element, StateKind, SubmittedData};
use crate::forms::elements::{Content, Label};

/// One line of form elements under a section heading.
///
/// Rows are shown or hidden as a unit: give the row a class and point a
/// [`Trigger`](super::Trigger) at it.
#[derive(Debug, Default)]
pub struct Row {
    attributes: AttributeBag,
    heading: String,
    elements: Vec<Box<dyn Element>>,
}

impl Row {
    pub fn new(id: &str) -> Self {
        let mut row = Self::default();
        if !id.is_empty() {
            row.attributes.set("id", id);
        }
        row
    }

    /// Section heading; empty means ungrouped
    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn set_heading(&mut self, heading: &str) -> &mut Self {
        self.heading = heading.to_string();
        self
    }

    pub fn add_element<E: Element + 'static>(&mut self, element: E) -> &mut Self {
        self.elements.push(Box::new(element));
        self
    }

    pub fn add_content(&mut self, content: &str) -> &mut Self {
        self.add_element(Content::new(content))
    }

    pub fn add_label(&mut self, for_field: &str, label: &str) -> &mut Self {
        self.add_element(Label::new(for_field, label))
    }

    pub fn elements(&self) -> &[Box<dyn Element>] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Load element values by name. Every element is attempted; failures are
    /// returned rather than stopping the rest of the row.
    pub fn load_from(&mut self, data: &SubmittedData) -> Vec<FormError> {
        self.elements
            .iter_mut()
            .filter(|element| {
                element
                    .name()
                    .is_some_and(|name| data.contains_key(data_key(name)))
            })
            .filter_map(|element| element.load_from(data).err())
            .collect()
    }

    /// Load `kind` state into every element that supports it
    pub fn load_state(&mut self, kind: StateKind, data: &SubmittedData) -> Vec<FormError> {
        self.elements
            .iter_mut()
            .filter_map(|element| element.as_stateful_mut())
            .filter(|stateful| stateful.supports_state(kind))
            .filter_map(|stateful| stateful.load_state(kind, data).err())
            .collect()
    }
}

impl BasicAttributes for Row {
    fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::element::SubmittedValue;
    use crate::forms::elements::{Checkbox, NumberField, TextField};

    fn data(pairs: &[(&str, &str)]) -> SubmittedData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), SubmittedValue::from(*v)))
            .collect()
    }

    fn text_value(row: &Row, index: usize) -> String {
        let output = row.elements()[index].output();
        output
            .split("value=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap_or("")
            .to_string()
    }

    mod structure {
        use super::*;

        #[test]
        fn test_new_row_is_empty_and_ungrouped() {
            let row = Row::new("");
            assert!(row.is_empty());
            assert_eq!(row.heading(), "");
            assert_eq!(row.id(), "");
        }

        #[test]
        fn test_new_row_with_id() {
            let row = Row::new("statusRow");
            assert_eq!(row.id(), "statusRow");
        }

        #[test]
        fn test_add_elements_in_order() {
            let mut row = Row::new("");
            row.add_label("surname", "Surname")
                .add_element(TextField::new("surname"));
            assert_eq!(row.elements().len(), 2);
            assert!(row.elements()[0].name().is_none());
            assert_eq!(row.elements()[1].name(), Some("surname"));
        }

        #[test]
        fn test_set_heading() {
            let mut row = Row::new("");
            row.set_heading("Contact");
            assert_eq!(row.heading(), "Contact");
        }
    }

    mod loading {
        use super::*;

        #[test]
        fn test_load_from_matches_names() {
            let mut row = Row::new("");
            row.add_element(TextField::new("first"))
                .add_element(TextField::new("second"));
            let errors = row.load_from(&data(&[("second", "B")]));
            assert!(errors.is_empty());
            assert_eq!(text_value(&row, 0), "");
            assert_eq!(text_value(&row, 1), "B");
        }

        #[test]
        fn test_load_from_isolates_failures() {
            let mut row = Row::new("");
            row.add_element(NumberField::new("age"))
                .add_element(TextField::new("name"));
            let errors = row.load_from(&data(&[("age", "old"), ("name", "Ann")]));
            assert_eq!(errors.len(), 1);
            assert_eq!(text_value(&row, 1), "Ann");
        }

        #[test]
        fn test_load_state_only_supported_elements() {
            let mut row = Row::new("");
            row.add_content("Static")
                .add_element(Checkbox::new("active"))
                .add_element(TextField::new("name"));
            let submitted = data(&[("active", "on"), ("name", "on")]);
            let errors = row.load_state(StateKind::Checked, &submitted);
            assert!(errors.is_empty());
            assert!(row.elements()[1].output().contains(" checked"));
            assert!(!row.elements()[2].output().contains("checked"));
        }
    }
}
