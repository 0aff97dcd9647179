//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    /// Dialog title
    pub title: &'a str,
    /// Title and border color
    pub color: Color,
    /// Message content (can be multi-line with \n)
    pub message: &'a str,
    /// Hint shown at the bottom (e.g., "Press Enter to dismiss")
    pub hint: Option<Line<'a>>,
    /// Maximum width of the dialog
    pub max_width: u16,
}

impl Default for DialogConfig<'_> {
    fn default() -> Self {
        Self {
            title: "Dialog",
            color: Color::White,
            message: "",
            hint: None,
            max_width: 60,
        }
    }
}

/// A `width` x `height` rectangle centered in `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let area = frame.area();
    let padding = 4u16; // 2 chars padding on each side
    let max_line_width = config.max_width.saturating_sub(padding + 2) as usize;

    let wrapped_lines = wrap_text(config.message, max_line_width);
    let hint_width = config.hint.as_ref().map_or(0, Line::width);

    let content_width = wrapped_lines
        .iter()
        .map(|l| l.chars().count())
        .chain([config.title.chars().count(), hint_width])
        .max()
        .unwrap_or(0) as u16;
    let dialog_width = (content_width + padding + 2).min(config.max_width);

    // Height: title + blank + message lines + blank + hint + borders
    let hint_lines = if config.hint.is_some() { 2 } else { 0 };
    let dialog_height = (2 + wrapped_lines.len() as u16 + hint_lines + 2).max(5);

    let dialog_area = centered_rect(area, dialog_width, dialog_height);
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped_lines.into_iter().map(Line::from));
    if let Some(hint) = config.hint {
        content.push(Line::from(""));
        content.push(hint);
    }

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.color))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}

/// Wrap text to fit within a maximum width, counted in characters.
///
/// Runs of spaces are kept as written; only the run at a line break is
/// dropped.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_width = 0;
        for token in whitespace_runs(paragraph) {
            let token_width = token.chars().count();
            let is_word = !token.starts_with(char::is_whitespace);
            if is_word
                && current_width + token_width > max_width
                && !current_line.trim().is_empty()
            {
                current_line.truncate(current_line.trim_end().len());
                lines.push(std::mem::take(&mut current_line));
                current_width = 0;
            }
            current_line.push_str(token);
            current_width += token_width;
        }
        lines.push(current_line);
    }

    lines
}

/// Split into alternating runs of whitespace and non-whitespace
fn whitespace_runs(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != first.is_whitespace())
            .map_or(rest.len(), |(i, _)| i);
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(run)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap_text("Thanks!", 20), vec!["Thanks!"]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("one two three four", 9),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn test_wrap_counts_accented_chars_once() {
        // 10 chars, 12 bytes
        assert_eq!(wrap_text("añadió más", 10), vec!["añadió más"]);
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        assert_eq!(wrap_text("first\n\nsecond", 20), vec!["first", "", "second"]);
    }

    #[test]
    fn test_wrap_overlong_word_is_not_split() {
        assert_eq!(wrap_text("supercalifragilistic", 5), vec!["supercalifragilistic"]);
    }

    #[test]
    fn test_wrap_keeps_surrounding_and_repeated_spaces() {
        assert_eq!(wrap_text("  ¡Gracias!  ", 20), vec!["  ¡Gracias!  "]);
        assert_eq!(wrap_text("a  b", 20), vec!["a  b"]);
    }

    #[test]
    fn test_wrap_drops_only_the_run_at_the_break() {
        assert_eq!(wrap_text("  one   two", 8), vec!["  one", "two"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_centered_rect_in_middle() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(area, 40, 10), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamped_to_area() {
        let area = Rect::new(5, 5, 20, 4);
        assert_eq!(centered_rect(area, 40, 10), Rect::new(5, 5, 20, 4));
    }
}
