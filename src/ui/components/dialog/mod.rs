//! Dialog components for TUI

mod base;
mod error_dialog;
mod locale_dialog;
mod message_dialog;

pub use error_dialog::render_error_dialog;
pub use locale_dialog::render_locale_dialog;
pub use message_dialog::render_message_dialog;
