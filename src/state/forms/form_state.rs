//! Form state management: the answers map and field navigation

use crate::catalog::Question;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Current answer per field name.
///
/// Serializes as a flat JSON object, which is exactly the submission body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormState {
    answers: BTreeMap<String, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form state from literal pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            answers: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, field_name: &str) -> Option<&str> {
        self.answers.get(field_name).map(String::as_str)
    }

    /// Answer for `field_name`, or `""` if there is none
    pub fn answer(&self, field_name: &str) -> &str {
        self.get(field_name).unwrap_or_default()
    }

    pub fn set(&mut self, field_name: &str, value: impl Into<String>) {
        self.answers.insert(field_name.to_string(), value.into());
    }

    /// Make the entries match `visible`: new fields start empty, fields no
    /// longer visible are dropped, answers to fields still visible are kept.
    pub fn sync_visible(&mut self, visible: &[Question]) {
        let names: HashSet<&str> = visible.iter().map(|q| q.field_name.as_str()).collect();
        self.answers.retain(|name, _| names.contains(name.as_str()));
        for question in visible {
            self.answers
                .entry(question.field_name.clone())
                .or_default();
        }
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Field focus for the survey form.
///
/// One position per visible question plus a final position for the
/// submit button row.
#[derive(Debug, Clone, Default)]
pub struct SurveyForm {
    question_count: usize,
    pub active_field_index: usize,
}

impl SurveyForm {
    pub fn new(question_count: usize) -> Self {
        Self {
            question_count,
            active_field_index: 0,
        }
    }

    /// Adjust to a new visible set, keeping focus in range
    pub fn set_question_count(&mut self, count: usize) {
        self.question_count = count;
        self.set_active_field(self.active_field_index);
    }

    /// Index of the focused question, or `None` on the submit row
    pub fn active_question(&self) -> Option<usize> {
        (self.active_field_index < self.question_count).then_some(self.active_field_index)
    }

    /// Returns true if the submit button row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.question_count
    }

    /// Move focus to the first question
    pub fn focus_first(&mut self) {
        self.active_field_index = 0;
    }
}

impl Form for SurveyForm {
    fn field_count(&self) -> usize {
        self.question_count + 1 // questions + submit row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.question_count);
    }
}
