//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::catalog::Locale;
use crate::i18n;
use crate::state::AppState;
use ratatui::Frame;

/// Terminal window title for `locale`
pub fn window_title(locale: Locale) -> &'static str {
    i18n::t(locale, "survey.title")
}

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    draw_state(frame, &app.state);
}

fn draw_state(frame: &mut Frame, state: &AppState) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, state);
    forms::draw_survey(frame, main_area, state);
    layout::draw_status_bar(frame, status_area, state);

    // Overlays, most urgent last so it ends up on top
    if let Some(picker) = state.locale_picker {
        components::render_locale_dialog(
            frame,
            state.t("picker.title"),
            state.t("hint.picker"),
            picker,
            state.locale.active(),
        );
    }
    if let Some(message) = &state.response_message {
        components::render_message_dialog(
            frame,
            state.t("survey.response_title"),
            message,
            state.t("hint.dismiss"),
        );
    }
    if let Some(error) = state.current_error() {
        components::render_error_dialog(
            frame,
            state.t("dialog.error"),
            error,
            state.t("hint.dismiss"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::session;
    use crate::state::{FieldEdit, SelectionMode};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw_state(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_first_question_in_locale() {
        let state = session(SelectionMode::Full, Locale::En);
        let screen = render(&state, 100, 30);
        assert!(screen.contains("Question 1"));
        assert!(screen.contains("Which symptom have you experienced most recently?"));
        assert!(screen.contains("Submit"));
    }

    #[test]
    fn test_renders_spanish_chrome() {
        let state = session(SelectionMode::Full, Locale::Es);
        let screen = render(&state, 100, 30);
        assert!(screen.contains("Pregunta 1"));
        assert!(screen.contains("Enviar"));
    }

    #[test]
    fn test_invalid_field_is_flagged_after_interaction() {
        let mut state = session(SelectionMode::Full, Locale::En);
        assert!(!render(&state, 100, 30).contains("This question needs an answer"));

        state.edit_active(FieldEdit::NextOption).unwrap();
        state.next_field();
        let screen = render(&state, 100, 30);
        assert!(screen.contains("This question needs an answer"));
    }

    #[test]
    fn test_error_overlay_is_drawn() {
        let mut state = session(SelectionMode::Full, Locale::En);
        state.push_error("network down");
        assert!(render(&state, 100, 30).contains("network down"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut state = session(SelectionMode::Full, Locale::En);
        state.open_locale_picker();
        state.push_error("x");
        render(&state, 10, 4);
    }
}
