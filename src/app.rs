//! Application state and core logic

use crate::catalog::Locale;
use crate::state::{AppState, FieldEdit};
use crate::submission::{SubmissionOutcome, SubmitClientTrait};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Client the answers are posted with
    client: Arc<dyn SubmitClientTrait>,
    /// Finished submissions, delivered back to the event loop
    outcome_tx: mpsc::UnboundedSender<SubmissionOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SubmissionOutcome>,
    /// Observes locale changes for the terminal title
    locale_rx: watch::Receiver<Locale>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(state: AppState, client: Arc<dyn SubmitClientTrait>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let locale_rx = state.locale.subscribe();
        Self {
            state,
            client,
            outcome_tx,
            outcome_rx,
            locale_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.response_message.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_response();
            }
            return Ok(());
        }

        if self.state.locale_picker.is_some() {
            return self.handle_picker_key(key);
        }

        self.handle_form_key(key)
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(picker) = self.state.locale_picker.as_mut() {
                    picker.prev();
                }
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                if let Some(picker) = self.state.locale_picker.as_mut() {
                    picker.next();
                }
            }
            KeyCode::Enter => self.state.apply_locale_picker()?,
            KeyCode::Esc => self.state.close_locale_picker(),
            _ => {}
        }
        Ok(())
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let on_submit_row = self.state.form.is_buttons_row_active();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.quit = true,
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('l') if ctrl => self.state.open_locale_picker(),
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Tab | KeyCode::Down => self.state.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_field(),
            KeyCode::Enter if on_submit_row => self.submit(),
            KeyCode::Enter => self.state.next_field(),
            KeyCode::Left => {
                self.state.edit_active(FieldEdit::PrevOption)?;
            }
            KeyCode::Right => {
                self.state.edit_active(FieldEdit::NextOption)?;
            }
            KeyCode::Backspace => {
                self.state.edit_active(FieldEdit::Backspace)?;
            }
            KeyCode::Char(c) if !ctrl => {
                self.state.edit_active(FieldEdit::Input(c))?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Start submitting the current answers in the background.
    ///
    /// Does nothing if the form is incomplete or a submission is already in
    /// flight. The outcome arrives through [`App::poll_submission`].
    pub fn submit(&mut self) {
        let Some(answers) = self.state.begin_submission() else {
            return;
        };
        let client = Arc::clone(&self.client);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = client.submit(&answers).await;
            if tx.send(outcome).is_err() {
                tracing::debug!("Submission finished after the app closed");
            }
        });
    }

    /// Apply any submission outcomes that have arrived
    pub fn poll_submission(&mut self) -> Result<()> {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.state.finish_submission(outcome)?;
        }
        Ok(())
    }

    /// The new locale, if it changed since the last call
    pub fn take_locale_change(&mut self) -> Option<Locale> {
        if self.locale_rx.has_changed().unwrap_or(false) {
            Some(*self.locale_rx.borrow_and_update())
        } else {
            None
        }
    }
}
