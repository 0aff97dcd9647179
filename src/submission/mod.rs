//! Submission client module for posting answers to the survey API

mod client;
mod traits;

pub use client::HttpSubmitClient;
pub use traits::{SubmitClientTrait, SubmitResponse, SubmissionOutcome};

#[cfg(test)]
pub use traits::MockSubmitClientTrait;
