//! Form domain layer
//!
//! Answers keyed by field name, focus navigation across the visible
//! questions, and per-kind editing of a single answer.

mod field;
mod form_state;

pub use field::{apply_edit, selected_position, FieldEdit};
pub use form_state::{Form, FormState, SurveyForm};
