//! Reusable UI components

mod button;
mod dialog;
mod hint;

pub use button::{render_button, BUTTON_HEIGHT};
pub use dialog::{render_error_dialog, render_locale_dialog, render_message_dialog};
pub use hint::hint_spans;
