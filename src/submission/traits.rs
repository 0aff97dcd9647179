//! Trait abstraction for the submission client to enable mocking in tests

use crate::error::TransportError;
use crate::state::FormState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body the API answers with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Human-readable text shown to the user as-is
    pub message: String,
}

/// Result of one submission attempt, as delivered back to the event loop
pub type SubmissionOutcome = Result<SubmitResponse, TransportError>;

/// Trait for submission client operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitClientTrait: Send + Sync {
    /// Send the answers once. The caller is responsible for validating them
    /// first; no retry is attempted on failure.
    async fn submit(&self, answers: &FormState) -> SubmissionOutcome;
}
