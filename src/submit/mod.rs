//! Submission of collected form values

mod simulated;
mod traits;

pub use simulated::{SimulatedSubmit, DEFAULT_DELAY};
pub use traits::SubmitHandler;

#[cfg(test)]
pub use traits::MockSubmitHandler;
