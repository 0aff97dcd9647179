//! Question records as they appear in the catalog file

use serde::{Deserialize, Serialize};

/// How a question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Pick one entry of `options`
    Select,
    /// Free text
    Text,
}

/// A single survey question.
///
/// Field names in the catalog file follow the API's naming (`uuid`,
/// `question`, `type`, `name`, `parent`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "uuid")]
    pub id: u32,
    #[serde(rename = "question")]
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(rename = "name")]
    pub field_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(rename = "parent", default, skip_serializing_if = "Option::is_none")]
    pub parent_field_name: Option<String>,
}

impl Question {
    /// Create a free-text question
    pub fn text(id: u32, field_name: &str, text: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            kind: QuestionKind::Text,
            field_name: field_name.to_string(),
            options: Vec::new(),
            parent_field_name: None,
        }
    }

    /// Create a select question
    pub fn select(id: u32, field_name: &str, text: &str, options: &[&str]) -> Self {
        Self {
            id,
            text: text.to_string(),
            kind: QuestionKind::Select,
            field_name: field_name.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            parent_field_name: None,
        }
    }

    /// Mark this question as a follow-up of `parent`
    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent_field_name = Some(parent.to_string());
        self
    }

    pub fn is_follow_up(&self) -> bool {
        self.parent_field_name.is_some()
    }

    pub fn is_follow_up_of(&self, parent_field_name: &str) -> bool {
        self.parent_field_name.as_deref() == Some(parent_field_name)
    }

    /// Check the record is well formed: select questions carry options,
    /// text questions carry none.
    pub fn check(&self) -> Result<(), String> {
        if self.field_name.trim().is_empty() {
            return Err(format!("question {} has an empty name", self.id));
        }
        match self.kind {
            QuestionKind::Select if self.options.is_empty() => Err(format!(
                "select question `{}` has no options",
                self.field_name
            )),
            QuestionKind::Text if !self.options.is_empty() => Err(format!(
                "text question `{}` must not define options",
                self.field_name
            )),
            _ => Ok(()),
        }
    }
}
