//! Supported survey locales

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the survey is offered in.
///
/// `En` is the fallback whenever a requested language is unknown or has no
/// questions configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Every supported locale, in picker order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Es];

    /// ISO 639-1 code
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Name of the language written in that language, for the picker
    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
        }
    }

    /// Parse a locale tag such as `es`, `ES`, `es-MX` or `en_US.UTF-8`.
    pub fn parse(value: &str) -> Option<Self> {
        let lang = value
            .trim()
            .split(['.', '_', '-', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Resolve a requested tag, falling back when it is not supported.
    pub fn resolve(requested: &str, fallback: Locale) -> Locale {
        Self::parse(requested).unwrap_or(fallback)
    }

    /// Locale reported by the operating system, if it is one we support.
    pub fn detect_system() -> Option<Self> {
        sys_locale::get_locale()
            .as_deref()
            .and_then(Self::parse)
            .or_else(|| std::env::var("LANG").ok().as_deref().and_then(Self::parse))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
