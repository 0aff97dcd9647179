//! Question catalog: the static, locale-keyed list of every question
//!
//! The catalog is loaded once at start-up, either from the copy embedded in
//! the binary or from a file named in the configuration, and is read-only
//! afterwards.

mod locale;
mod question;

pub use locale::Locale;
pub use question::{Question, QuestionKind};

use crate::error::ConfigError;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Catalog shipped with the binary
const EMBEDDED_CATALOG: &str = include_str!("../../config/questions.json");

/// Locale-keyed questions, in file order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locales: BTreeMap<Locale, Vec<Question>>,
}

impl Catalog {
    /// Build a catalog from already parsed questions, checking invariants
    pub fn new(locales: BTreeMap<Locale, Vec<Question>>) -> Result<Self, ConfigError> {
        for (locale, questions) in &locales {
            let mut seen = HashSet::new();
            for question in questions {
                question.check().map_err(ConfigError::InvalidCatalog)?;
                if !seen.insert(question.field_name.as_str()) {
                    return Err(ConfigError::InvalidCatalog(format!(
                        "duplicate field name `{}` in locale `{locale}`",
                        question.field_name
                    )));
                }
            }
        }
        Ok(Self { locales })
    }

    /// The catalog compiled into the binary
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED_CATALOG, "embedded question catalog")
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, &path.display().to_string())
    }

    /// Parse `{ "<locale>": [question, ...], ... }`.
    ///
    /// Keys that are not a supported locale are skipped.
    pub fn from_json(content: &str, what: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, Vec<Question>> =
            serde_json::from_str(content).map_err(|source| ConfigError::Parse {
                what: what.to_string(),
                source,
            })?;

        let mut locales = BTreeMap::new();
        for (key, questions) in raw {
            match Locale::parse(&key) {
                Some(locale) => {
                    locales.insert(locale, questions);
                }
                None => tracing::warn!("Skipping unsupported locale `{key}` in {what}"),
            }
        }

        let catalog = Self::new(locales)?;
        tracing::debug!(
            "Loaded {what}: {}",
            catalog
                .locales
                .iter()
                .map(|(l, q)| format!("{l}={}", q.len()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(catalog)
    }

    /// Questions for exactly this locale, if configured
    pub fn get(&self, locale: Locale) -> Option<&[Question]> {
        self.locales.get(&locale).map(Vec::as_slice)
    }

    /// Questions for `requested`, or for `fallback` when `requested` has none.
    ///
    /// Returns the locale actually used alongside its questions.
    pub fn questions_for(
        &self,
        requested: Locale,
        fallback: Locale,
    ) -> Result<(Locale, &[Question]), ConfigError> {
        if let Some(questions) = self.get(requested) {
            return Ok((requested, questions));
        }
        if let Some(questions) = self.get(fallback) {
            tracing::info!("No questions for `{requested}`, using `{fallback}`");
            return Ok((fallback, questions));
        }
        Err(ConfigError::MissingCatalog {
            requested,
            fallback,
        })
    }

    /// Fail unless `locale` has at least one question; used for the
    /// fallback locale every other lookup ends up relying on
    pub fn require(&self, locale: Locale) -> Result<(), ConfigError> {
        match self.get(locale) {
            Some(questions) if !questions.is_empty() => Ok(()),
            _ => Err(ConfigError::MissingCatalog {
                requested: locale,
                fallback: locale,
            }),
        }
    }

    /// Locales that have questions configured
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.locales.keys().copied()
    }
}
