//! Field rendering utilities for forms

use crate::catalog::{Question, QuestionKind};
use crate::state::selected_position;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows one question takes: borders, question text and answer line
pub const FIELD_HEIGHT: u16 = 4;

/// How a question block is drawn
#[derive(Debug, Clone, Copy)]
pub struct FieldLook<'a> {
    /// Block title, e.g. "Question 3"
    pub label: &'a str,
    pub is_active: bool,
    /// Draw the block as needing an answer
    pub is_invalid: bool,
    /// Shown in an empty select
    pub placeholder: &'a str,
    /// Appended to the title of an invalid block
    pub required: &'a str,
}

/// Text shown on the answer line.
///
/// Selects show the chosen option with its position, or the placeholder;
/// text answers are shown as typed.
pub fn display_answer(question: &Question, answer: &str, placeholder: &str) -> String {
    match question.kind {
        QuestionKind::Text => answer.to_string(),
        QuestionKind::Select => match selected_position(question, answer) {
            Some(pos) => format!("‹ {answer} ›  {pos}/{}", question.options.len()),
            None => placeholder.to_string(),
        },
    }
}

/// Draw one question with its current answer
pub fn draw_question(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    answer: &str,
    look: FieldLook,
) {
    let border_style = if look.is_invalid {
        Style::default().fg(Color::Red)
    } else if look.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value_style = if look.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };

    let shown = display_answer(question, answer, look.placeholder);
    let answer_style = if answer.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        value_style
    };

    let mut answer_line = vec![Span::styled(shown, answer_style)];
    if look.is_active && question.kind == QuestionKind::Text {
        answer_line.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let content = vec![
        Line::from(Span::styled(
            question.text.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(answer_line),
    ];

    let mut title = vec![Span::raw(format!(" {} ", look.label))];
    if look.is_invalid {
        title.push(Span::styled(
            format!("· {} ", look.required),
            Style::default().fg(Color::Red),
        ));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
