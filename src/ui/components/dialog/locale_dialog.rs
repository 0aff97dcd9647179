//! Language picker dialog

use super::base::centered_rect;
use crate::catalog::Locale;
use crate::state::LocalePicker;
use crate::ui::components::hint_spans;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the language picker. `active` is marked so the user can see
/// what they would switch away from.
pub fn render_locale_dialog(
    frame: &mut Frame,
    title: &str,
    hint: &str,
    picker: LocalePicker,
    active: Locale,
) {
    let mut content = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (idx, locale) in Locale::ALL.iter().enumerate() {
        let is_selected = idx == picker.selected;
        let prefix = if is_selected { " ▸ " } else { "   " };
        let style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let mut spans = vec![Span::styled(
            format!("{prefix}{} ({})", locale.native_name(), locale.code()),
            style,
        )];
        if *locale == active {
            spans.push(Span::styled(" ●", Style::default().fg(Color::Green)));
        }
        content.push(Line::from(spans));
    }

    content.push(Line::from(""));
    content.push(Line::from(hint_spans(hint)));

    let width = content
        .iter()
        .map(Line::width)
        .max()
        .unwrap_or(0)
        .max(30) as u16
        + 4;
    let height = content.len() as u16 + 2;
    let dialog_area = centered_rect(frame.area(), width, height);

    frame.render_widget(Clear, dialog_area);
    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::new().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}
