//! Layout components (header, status bar)

use super::components::hint_spans;
use crate::state::{AppState, SubmissionStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by the header: title, description, borders
const HEADER_HEIGHT: u16 = 5;

/// Split the screen into header, content and the status bar line
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(0),                // Survey
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the survey title, description and active language
pub fn draw_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let active = state.locale.active();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("{}: {}", state.t("survey.language"), active.native_name()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(" "),
        ]));

    let content = vec![
        Line::from(Span::styled(
            state.t("survey.title"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            state.t("survey.description"),
            Style::default().fg(Color::Gray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::raw(" ")];

    let hint = if state.locale_picker.is_some() {
        state.t("hint.picker")
    } else {
        state.t("hint.form")
    };
    spans.extend(hint_spans(hint));

    if state.submission == SubmissionStatus::InFlight {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            state.t("survey.submitting"),
            Style::default().fg(Color::Yellow),
        ));
    } else if state.show_validation && !state.validation.is_valid {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            state.t("survey.incomplete"),
            Style::default().fg(Color::Red),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
