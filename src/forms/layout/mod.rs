//! Form layout: rows and triggers

mod row;
mod trigger;

pub use row::Row;
pub use trigger::{Trigger, TriggerAction, TriggerCondition, TriggerRule, TriggerSource};
