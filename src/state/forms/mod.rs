//! Form domain layer
//!
//! Field registration with rule objects, value coercion, validation timing,
//! field arrays and the profile form built from them.

mod coerce;
mod field;
mod field_array;
mod form_state;
mod mode;
mod rules;
mod values;

pub use field::{FieldKind, FormField};
pub use form_state::{FieldId, FocusTarget, Form, ProfileForm, SubmitError};
pub use mode::{RevalidateMode, ValidationMode, ValidationTiming};
pub use values::FormValues;

#[cfg(test)]
pub use rules::Rules;
#[cfg(test)]
pub use values::{Address, Gender, MobileNumbers};
