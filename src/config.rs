//! Configuration handling for the survey
//!
//! Values come from `config.json` in the platform config directory and can be
//! overridden through environment variables. [`SurveyConfig::resolve`] turns
//! the raw values into [`Settings`], failing fast when the API base URL is
//! missing or malformed.

use crate::catalog::{Catalog, Locale};
use crate::error::ConfigError;
use crate::state::SelectionMode;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables, in override order (first set wins)
const ENV_API_URL: [&str; 2] = ["SURVEY_API_URL", "API_URL"];
const ENV_LOCALE: &str = "SURVEY_LOCALE";
const ENV_SELECTION_MODE: &str = "SURVEY_SELECTION_MODE";
const ENV_CATALOG: &str = "SURVEY_CATALOG";

/// Locale used whenever the requested one is unavailable
pub const FALLBACK_LOCALE: Locale = Locale::En;

/// Platform directories for config and logs
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "symptom-survey", "symptom-survey")
}

/// Raw user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SurveyConfig {
    /// Host the answers are submitted to
    pub api_base_url: Option<String>,
    /// Locale to start in, e.g. `es`
    pub default_locale: Option<String>,
    /// Which questions to show
    pub selection_mode: Option<SelectionMode>,
    /// Replacement for the embedded question catalog
    pub catalog_path: Option<PathBuf>,
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub default_locale: Option<Locale>,
    pub selection_mode: SelectionMode,
    pub catalog_path: Option<PathBuf>,
}

impl SurveyConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config file, if there is one
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            what: path.display().to_string(),
            source,
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; blank values are ignored
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = ENV_API_URL.iter().find_map(|key| get(*key)) {
            self.api_base_url = Some(url);
        }
        if let Some(locale) = get(ENV_LOCALE) {
            self.default_locale = Some(locale);
        }
        if let Some(mode) = get(ENV_SELECTION_MODE) {
            self.selection_mode = Some(mode.parse()?);
        }
        if let Some(path) = get(ENV_CATALOG) {
            self.catalog_path = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    /// Validate into [`Settings`]
    pub fn resolve(self) -> Result<Settings, ConfigError> {
        let raw_url = self
            .api_base_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingApiUrl)?;

        let parsed = reqwest::Url::parse(&raw_url).map_err(|_| ConfigError::InvalidApiUrl {
            url: raw_url.clone(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl { url: raw_url });
        }

        let default_locale = self.default_locale.as_deref().and_then(|code| {
            let locale = Locale::parse(code);
            if locale.is_none() {
                tracing::warn!("Ignoring unsupported default locale `{code}`");
            }
            locale
        });

        let selection_mode = self.selection_mode.unwrap_or_default();
        if let SelectionMode::RandomSample { size: 0 } = selection_mode {
            return Err(ConfigError::InvalidSelectionMode(selection_mode.to_string()));
        }

        Ok(Settings {
            api_base_url: raw_url,
            default_locale,
            selection_mode,
            catalog_path: self.catalog_path,
        })
    }
}

impl Settings {
    /// Load the configured catalog, or the embedded one
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        let catalog = match &self.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::embedded()?,
        };
        catalog.require(FALLBACK_LOCALE)?;
        Ok(catalog)
    }
}
