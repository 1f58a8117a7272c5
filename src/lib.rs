//! Campus Forms - declarative HTML forms for school administration pages
//!
//! Pages build a [`forms::Form`] from rows of elements, add visibility
//! triggers and hidden values, optionally load previously submitted data,
//! and render it with a swappable renderer.

pub mod config;
pub mod error;
pub mod forms;
pub mod locale;
pub mod workflows;

pub use error::FormError;
