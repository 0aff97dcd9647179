//! Key hint rendering

use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Style a hint string such as `Tab:move  Esc:quit`.
///
/// Segments are separated by two spaces; the part before the first `:` of a
/// segment is the key and is highlighted. Segments without a `:` render as
/// plain text.
pub fn hint_spans(hint: &str) -> Vec<Span<'_>> {
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::Gray);

    let mut spans = Vec::new();
    for (i, segment) in hint.split("  ").filter(|s| !s.is_empty()).enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        match segment.split_once(':') {
            Some((key, action)) => {
                spans.push(Span::styled(key, key_style));
                spans.push(Span::styled(format!(" {action}"), text_style));
            }
            None => spans.push(Span::styled(segment, text_style)),
        }
    }
    spans
}
