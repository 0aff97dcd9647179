//! Form rendering module
//!
//! - `field_renderer`: one question block with its answer
//! - `survey_form`: the scrolling question list and submit button

mod field_renderer;
mod survey_form;

pub use survey_form::draw_survey;
