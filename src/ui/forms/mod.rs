//! Form rendering module
//!
//! - `field_renderer`: row rendering for fields, hobby rows and inline buttons
//! - `profile_form`: the scrollable profile form

mod field_renderer;
mod profile_form;

pub use profile_form::draw as draw_profile_form;
