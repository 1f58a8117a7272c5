//! Factory seam for the pieces a form creates

use super::layout::{Row, Trigger, TriggerAction};

/// Creates rows and triggers for a [`Form`](super::Form), so alternate element
/// sets can be swapped in without touching the form itself
#[cfg_attr(test, mockall::automock)]
pub trait FormFactory: Send + Sync {
    fn create_row(&self, id: &str) -> Row;

    /// Create a trigger preset to toggle the visibility of `selector`
    fn create_trigger(&self, selector: &str) -> Trigger;
}

/// The standard row and trigger implementations
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormFactory;

impl DefaultFormFactory {
    pub fn new() -> Self {
        Self
    }
}

impl FormFactory for DefaultFormFactory {
    fn create_row(&self, id: &str) -> Row {
        Row::new(id)
    }

    fn create_trigger(&self, selector: &str) -> Trigger {
        Trigger::new(selector, TriggerAction::ToggleVisibility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::attributes::BasicAttributes;

    #[test]
    fn test_create_row_uses_id() {
        let row = DefaultFormFactory::new().create_row("contactRow");
        assert_eq!(row.id(), "contactRow");
        assert!(row.is_empty());
    }

    #[test]
    fn test_create_trigger_toggles_visibility() {
        let trigger = DefaultFormFactory::new().create_trigger("#otherRow");
        assert_eq!(trigger.selector(), "#otherRow");
        assert_eq!(trigger.action(), TriggerAction::ToggleVisibility);
    }
}
