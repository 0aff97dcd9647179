//! Error dialog component

use super::base::{render_dialog, DialogConfig};
use crate::ui::components::hint_spans;
use ratatui::{style::Color, text::Line, Frame};

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, title: &str, error_message: &str, hint: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title,
            color: Color::Red,
            message: error_message,
            hint: Some(Line::from(hint_spans(hint))),
            max_width: 60,
        },
    );
}
