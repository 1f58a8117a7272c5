//! Error types for the form model

use thiserror::Error;

/// Errors raised while configuring a form or loading data into its elements
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A multi-part form was given a current step outside `1..=steps`
    #[error("step {step} is out of range for a form with {steps} step(s)")]
    StepOutOfRange { step: usize, steps: usize },

    /// A submitted value could not be converted for the named element
    #[error("invalid value {value:?} for field '{name}': {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    /// A select received a value that is not one of its options
    #[error("value {value:?} is not an option of select '{name}'")]
    UnknownOption { name: String, value: String },
}
