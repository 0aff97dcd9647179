//! Error types shared across the survey

use crate::catalog::Locale;
use std::path::PathBuf;
use thiserror::Error;

/// Problems with the static setup. Raised at start-up and never recovered from.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API base URL is not configured (set SURVEY_API_URL or `api_base_url` in config.json)")]
    MissingApiUrl,

    #[error("API base URL `{url}` is not a valid http(s) URL")]
    InvalidApiUrl { url: String },

    #[error("no questions configured for locale `{requested}` nor for fallback `{fallback}`")]
    MissingCatalog { requested: Locale, fallback: Locale },

    #[error("invalid question catalog: {0}")]
    InvalidCatalog(String),

    #[error("invalid selection mode `{0}` (expected full, parent-followup or random-sample:<n>)")]
    InvalidSelectionMode(String),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while talking to the survey API. Always recovered locally.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server answered {status}")]
    Status { status: u16 },

    #[error("unexpected response body: {0}")]
    Decode(String),
}
