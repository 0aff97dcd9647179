//! Field-level validation of the visible questions

use crate::catalog::Question;
use crate::state::FormState;
use std::collections::BTreeSet;

/// Outcome of validating a form against its visible questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub invalid_field_names: BTreeSet<String>,
    pub is_valid: bool,
}

impl ValidationResult {
    pub fn is_invalid(&self, field_name: &str) -> bool {
        self.invalid_field_names.contains(field_name)
    }
}

/// A visible field is invalid when it has no answer or only whitespace.
/// Answers to fields that are not visible are ignored.
pub fn validate(visible: &[Question], answers: &FormState) -> ValidationResult {
    let invalid_field_names: BTreeSet<String> = visible
        .iter()
        .filter(|q| {
            answers
                .get(&q.field_name)
                .map_or(true, |answer| answer.trim().is_empty())
        })
        .map(|q| q.field_name.clone())
        .collect();

    ValidationResult {
        is_valid: invalid_field_names.is_empty(),
        invalid_field_names,
    }
}
