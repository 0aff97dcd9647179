//! Survey form rendering: the visible questions and the submit button

use super::field_renderer::{draw_question, FieldLook, FIELD_HEIGHT};
use crate::state::{AppState, SubmissionStatus};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// First question to draw so that `active` is on screen when `per_page`
/// questions fit. The active question sticks to the bottom edge while
/// scrolling down.
pub fn scroll_offset(active: usize, per_page: usize) -> usize {
    if per_page == 0 {
        active
    } else {
        (active + 1).saturating_sub(per_page)
    }
}

/// Draw the survey form
pub fn draw_survey(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Questions
            Constraint::Length(BUTTON_HEIGHT), // Submit
        ])
        .split(area);

    draw_questions(frame, chunks[0], state);
    draw_submit(frame, chunks[1], state);
}

fn draw_questions(frame: &mut Frame, area: Rect, state: &AppState) {
    let form_focused = !state.form.is_buttons_row_active();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if form_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.visible.is_empty() {
        let empty = Paragraph::new(state.t("survey.no_questions"))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let per_page = (inner.height / FIELD_HEIGHT) as usize;
    // Keep the last question in view while the submit row is focused
    let focus = state
        .form
        .active_question()
        .unwrap_or(state.visible.len() - 1);
    let first = scroll_offset(focus, per_page);

    let label = state.t("survey.question");
    let placeholder = state.t("survey.select_placeholder");
    let required = state.t("survey.required");

    for (row, (idx, question)) in state
        .visible
        .iter()
        .enumerate()
        .skip(first)
        .take(per_page)
        .enumerate()
    {
        let field_area = Rect {
            x: inner.x,
            y: inner.y + row as u16 * FIELD_HEIGHT,
            width: inner.width,
            height: FIELD_HEIGHT,
        };
        let title = format!("{label} {}", idx + 1);
        let look = FieldLook {
            label: &title,
            is_active: state.form.active_question() == Some(idx),
            is_invalid: state.show_validation && state.validation.is_invalid(&question.field_name),
            placeholder,
            required,
        };
        draw_question(
            frame,
            field_area,
            question,
            state.answers.answer(&question.field_name),
            look,
        );
    }
}

fn draw_submit(frame: &mut Frame, area: Rect, state: &AppState) {
    let label = match state.submission {
        SubmissionStatus::InFlight => state.t("survey.submitting"),
        SubmissionStatus::Idle => state.t("survey.submit"),
    };
    render_button(
        frame,
        area,
        label,
        state.form.is_buttons_row_active(),
        state.can_submit(),
    );
}
