//! Concrete form elements

mod choice;
mod content;
mod input;
mod submit;

pub use choice::{Checkbox, Select};
pub use content::{Content, Label};
pub use input::{NumberField, Password, TextField};
pub use submit::Submit;
