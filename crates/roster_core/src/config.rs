//! Roster configuration.
//!
//! # Responsibility
//! - Hold the externally supplied closed sets (programme catalog, years).
//! - Hold the single persistence key for the roster blob.
//!
//! # Invariants
//! - A validated config has a non-empty key and non-empty catalogs with no
//!   blank entries.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default persistence key for the serialized roster.
pub const DEFAULT_STORAGE_KEY: &str = "students";

const DEFAULT_PROGRAMMES: &[&str] = &[
    "CS",
    "Computer Science",
    "Information Technology",
    "Software Engineering",
    "Data Science",
    "Cyber Security",
];
const DEFAULT_YEARS: &[&str] = &["1", "2", "3", "4"];

/// Configuration error raised by `RosterConfig::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyStorageKey,
    EmptyProgrammes,
    EmptyYears,
    BlankEntry(&'static str),
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStorageKey => write!(f, "storage_key cannot be empty"),
            Self::EmptyProgrammes => write!(f, "programmes catalog cannot be empty"),
            Self::EmptyYears => write!(f, "years set cannot be empty"),
            Self::BlankEntry(list) => write!(f, "{list} contains a blank entry"),
            Self::Parse(message) => write!(f, "invalid roster config: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Runtime configuration for validation and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Key under which the roster blob is stored.
    pub storage_key: String,
    /// Closed programme catalog.
    pub programmes: Vec<String>,
    /// Closed set of selectable year values.
    pub years: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            programmes: DEFAULT_PROGRAMMES.iter().map(|p| p.to_string()).collect(),
            years: DEFAULT_YEARS.iter().map(|y| y.to_string()).collect(),
        }
    }
}

impl RosterConfig {
    /// Parses a JSON config document; missing keys fall back to defaults.
    ///
    /// # Errors
    /// - `ConfigError::Parse` when the document is not valid JSON.
    /// - Any `validate()` error.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if self.programmes.is_empty() {
            return Err(ConfigError::EmptyProgrammes);
        }
        if self.years.is_empty() {
            return Err(ConfigError::EmptyYears);
        }
        if self.programmes.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::BlankEntry("programmes"));
        }
        if self.years.iter().any(|y| y.trim().is_empty()) {
            return Err(ConfigError::BlankEntry("years"));
        }
        Ok(())
    }

    pub fn has_programme(&self, value: &str) -> bool {
        self.programmes.iter().any(|p| p == value)
    }

    pub fn has_year(&self, value: &str) -> bool {
        self.years.iter().any(|y| y == value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RosterConfig, DEFAULT_STORAGE_KEY};

    #[test]
    fn default_config_is_valid() {
        let config = RosterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert!(config.has_programme("CS"));
        assert!(config.has_year("4"));
        assert!(!config.has_year("5"));
    }

    #[test]
    fn json_config_overrides_only_given_keys() {
        let config = RosterConfig::from_json_str(r#"{"programmes": ["Biology"]}"#).unwrap();
        assert_eq!(config.programmes, vec!["Biology"]);
        assert_eq!(config.years.len(), 4);
    }

    #[test]
    fn json_config_rejects_blank_entries_and_bad_json() {
        let err = RosterConfig::from_json_str(r#"{"years": ["1", " "]}"#).unwrap_err();
        assert_eq!(err, ConfigError::BlankEntry("years"));

        let err = RosterConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = RosterConfig::from_json_str(r#"{"storage_key": ""}"#).unwrap_err();
        assert_eq!(err, ConfigError::EmptyStorageKey);
    }
}
