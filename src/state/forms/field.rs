//! Editing a single answer according to its question kind

use crate::catalog::{Question, QuestionKind};

/// One user edit aimed at the active field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    /// Typed character. Appends to text; jumps to a matching option on selects.
    Input(char),
    /// Delete the last character, or clear the selection
    Backspace,
    NextOption,
    PrevOption,
}

/// Apply `edit` to `current`, returning the new answer, or `None` when the
/// edit does not apply to this kind of question.
pub fn apply_edit(question: &Question, current: &str, edit: FieldEdit) -> Option<String> {
    match question.kind {
        QuestionKind::Text => match edit {
            FieldEdit::Input(c) => {
                let mut value = current.to_string();
                value.push(c);
                Some(value)
            }
            FieldEdit::Backspace => {
                let mut value = current.to_string();
                value.pop().map(|_| value)
            }
            FieldEdit::NextOption | FieldEdit::PrevOption => None,
        },
        QuestionKind::Select => {
            let options = &question.options;
            let selected = options.iter().position(|o| o == current);
            let next = match edit {
                // The empty placeholder sits before the first option
                FieldEdit::NextOption => match selected {
                    None => options.first(),
                    Some(i) => options.get(i + 1),
                },
                FieldEdit::PrevOption => match selected {
                    None => options.last(),
                    Some(0) => None,
                    Some(i) => options.get(i - 1),
                },
                FieldEdit::Backspace => {
                    return selected.map(|_| String::new());
                }
                FieldEdit::Input(c) => {
                    return option_starting_with(options, selected, c).cloned();
                }
            };
            Some(next.cloned().unwrap_or_default())
        }
    }
}

/// First option after `selected` whose initial matches `c`, wrapping around.
fn option_starting_with(options: &[String], selected: Option<usize>, c: char) -> Option<&String> {
    let needle = c.to_lowercase().to_string();
    let start = selected.map_or(0, |i| i + 1);
    (0..options.len())
        .map(|offset| &options[(start + offset) % options.len()])
        .find(|o| o.to_lowercase().starts_with(&needle))
}

/// 1-based position of the current answer among the options, for display
pub fn selected_position(question: &Question, current: &str) -> Option<usize> {
    question
        .options
        .iter()
        .position(|o| o == current)
        .map(|i| i + 1)
}
