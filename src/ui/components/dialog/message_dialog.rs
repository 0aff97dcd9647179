//! Dialog showing the server's reply to a submission

use super::base::{render_dialog, DialogConfig};
use crate::ui::components::hint_spans;
use ratatui::{style::Color, text::Line, Frame};

/// Render the response message; the text is shown exactly as received
pub fn render_message_dialog(frame: &mut Frame, title: &str, message: &str, hint: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title,
            color: Color::Green,
            message,
            hint: Some(Line::from(hint_spans(hint))),
            max_width: 64,
        },
    );
}
