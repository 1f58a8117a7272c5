//! Form construction and rendering
//!
//! A [`Form`] is assembled from rows of elements, visibility triggers,
//! hidden values and header actions, then handed to a [`FormRenderer`].
//! Everything a form needs from the host comes in through a [`FormContext`].

pub mod action;
pub mod attributes;
pub mod context;
pub mod element;
pub mod elements;
pub mod factory;
pub mod form;
pub mod html;
pub mod layout;
pub mod submission;
pub mod view;

pub use action::Action;
pub use attributes::{AttributeBag, BasicAttributes};
pub use context::FormContext;
pub use element::{Element, StateKind, StatefulElement, SubmittedData, SubmittedValue};
pub use factory::{DefaultFormFactory, FormFactory};
pub use form::{Form, HiddenValue};
pub use layout::{Row, Trigger, TriggerAction};
pub use submission::parse_urlencoded;
pub use view::{FormRenderer, FormTableView, StandardFormView};
