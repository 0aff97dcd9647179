//! Session state: everything one form-filling session owns

use super::forms::{apply_edit, FieldEdit, Form, FormState, SurveyForm};
use super::locale::LocaleController;
use super::selection::QuestionSelector;
use super::validation::{validate, ValidationResult};
use crate::catalog::{Catalog, Locale, Question};
use crate::error::ConfigError;
use crate::i18n;
use crate::submission::SubmissionOutcome;
use std::collections::VecDeque;
use std::sync::Arc;

/// Whether a submission is waiting for the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    InFlight,
}

/// Open language picker and its highlighted entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalePicker {
    pub selected: usize,
}

impl LocalePicker {
    fn for_locale(locale: Locale) -> Self {
        Self {
            selected: Locale::ALL.iter().position(|l| *l == locale).unwrap_or(0),
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % Locale::ALL.len();
    }

    pub fn prev(&mut self) {
        if self.selected == 0 {
            self.selected = Locale::ALL.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn locale(&self) -> Locale {
        Locale::ALL[self.selected]
    }
}

/// Main survey state, mutated only from the event loop
pub struct AppState {
    catalog: Arc<Catalog>,
    pub locale: LocaleController,
    selector: QuestionSelector,
    /// Locale the visible questions were taken from
    pub question_locale: Locale,
    pub visible: Vec<Question>,
    pub answers: FormState,
    pub form: SurveyForm,
    pub validation: ValidationResult,
    /// Outline invalid fields once the user has interacted with the form
    pub show_validation: bool,
    pub submission: SubmissionStatus,
    /// The in-flight submission was sent from a form the user has since
    /// replaced by switching locale
    stale_submission: bool,
    pub locale_picker: Option<LocalePicker>,
    /// Server reply to the last successful submission
    pub response_message: Option<String>,
    error_queue: VecDeque<String>,
}

impl AppState {
    /// Start a session in the controller's active locale
    pub fn new(
        catalog: Arc<Catalog>,
        locale: LocaleController,
        selector: QuestionSelector,
    ) -> Result<Self, ConfigError> {
        let mut state = Self {
            catalog,
            question_locale: locale.active(),
            locale,
            selector,
            visible: Vec::new(),
            answers: FormState::new(),
            form: SurveyForm::new(0),
            validation: validate(&[], &FormState::new()),
            show_validation: false,
            submission: SubmissionStatus::Idle,
            stale_submission: false,
            locale_picker: None,
            response_message: None,
            error_queue: VecDeque::new(),
        };
        state.restart()?;
        Ok(state)
    }

    /// Translate a UI string into the active locale
    pub fn t(&self, key: &'static str) -> &'static str {
        i18n::t(self.locale.active(), key)
    }

    /// Re-run question selection for the active locale
    fn reselect(&mut self) -> Result<(), ConfigError> {
        let (used, visible) =
            self.selector
                .apply(self.locale.active(), &self.catalog, &mut self.answers)?;
        self.show_selection(used, visible);
        Ok(())
    }

    fn show_selection(&mut self, used: Locale, visible: Vec<Question>) {
        self.question_locale = used;
        self.visible = visible;
        self.form.set_question_count(self.visible.len());
        self.revalidate();
    }

    /// Discard all answers and draw a fresh question set
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.start_over(self.locale.active())
    }

    /// Draw a fresh question set for `locale`. Nothing in the session
    /// changes unless the selection succeeds.
    fn start_over(&mut self, locale: Locale) -> Result<(), ConfigError> {
        let mut answers = FormState::new();
        let (used, visible) = self.selector.apply(locale, &self.catalog, &mut answers)?;
        self.answers = answers;
        self.show_validation = false;
        self.form.focus_first();
        self.show_selection(used, visible);
        Ok(())
    }

    /// Change the active locale. Unsupported codes fall back silently. The
    /// question set is re-selected and every answer starts empty again.
    /// On error the previous locale and answers are kept.
    pub fn set_locale(&mut self, code: &str) -> Result<Locale, ConfigError> {
        let locale = self.locale.resolve(code);
        self.start_over(locale)?;
        self.locale.set(locale);
        if self.submission == SubmissionStatus::InFlight {
            self.stale_submission = true;
        }
        Ok(locale)
    }

    /// Recompute validation for the current answers
    pub fn revalidate(&mut self) {
        self.validation = validate(&self.visible, &self.answers);
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.form.active_question().and_then(|i| self.visible.get(i))
    }

    /// Apply an edit to the focused question. Returns whether anything changed.
    pub fn edit_active(&mut self, edit: FieldEdit) -> Result<bool, ConfigError> {
        let Some(question) = self.active_question() else {
            return Ok(false);
        };
        let current = self.answers.answer(&question.field_name);
        let Some(updated) = apply_edit(question, current, edit) else {
            return Ok(false);
        };

        let field_name = question.field_name.clone();
        let triggers_reselect = self.selector.mode().is_trigger(question);
        self.answers.set(&field_name, updated);
        self.show_validation = true;

        if triggers_reselect {
            // Follow-up answers belong to the previous root answer
            for follow_up in self.visible.iter().filter(|q| q.is_follow_up_of(&field_name)) {
                self.answers.set(&follow_up.field_name, "");
            }
            self.reselect()?;
        } else {
            self.revalidate();
        }
        Ok(true)
    }

    pub fn next_field(&mut self) {
        self.form.next_field();
    }

    pub fn prev_field(&mut self) {
        self.form.prev_field();
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.validation.is_valid && self.submission == SubmissionStatus::Idle
    }

    /// Validate once more and, if the form is complete and nothing is in
    /// flight, mark a submission as started and return the answers to send.
    pub fn begin_submission(&mut self) -> Option<FormState> {
        if self.submission == SubmissionStatus::InFlight {
            tracing::debug!("Ignoring submit while a submission is in flight");
            return None;
        }
        self.revalidate();
        if !self.validation.is_valid {
            self.show_validation = true;
            tracing::debug!(
                "Submit blocked, unanswered: {:?}",
                self.validation.invalid_field_names
            );
            return None;
        }
        self.submission = SubmissionStatus::InFlight;
        Some(self.answers.clone())
    }

    /// Handle the result of a submission started with `begin_submission`.
    ///
    /// A success resets the form, unless the locale was switched while the
    /// request was out: the form on screen then holds newer answers.
    pub fn finish_submission(&mut self, outcome: SubmissionOutcome) -> Result<(), ConfigError> {
        self.submission = SubmissionStatus::Idle;
        let stale = std::mem::take(&mut self.stale_submission);
        match outcome {
            Ok(response) => {
                self.response_message = Some(response.message);
                if stale {
                    tracing::debug!("Submission finished after a locale switch, keeping the form");
                    Ok(())
                } else {
                    self.restart()
                }
            }
            Err(err) => {
                tracing::error!("Submission failed: {err}");
                self.push_error(self.t("survey.submit_failed"));
                Ok(())
            }
        }
    }

    pub fn open_locale_picker(&mut self) {
        self.locale_picker = Some(LocalePicker::for_locale(self.locale.active()));
    }

    pub fn close_locale_picker(&mut self) {
        self.locale_picker = None;
    }

    /// Apply the picker's highlighted locale and close it
    pub fn apply_locale_picker(&mut self) -> Result<(), ConfigError> {
        if let Some(picker) = self.locale_picker.take() {
            let locale = picker.locale();
            if locale != self.locale.active() {
                self.set_locale(locale.code())?;
            }
        }
        Ok(())
    }

    pub fn dismiss_response(&mut self) {
        self.response_message = None;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.error_queue.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}
