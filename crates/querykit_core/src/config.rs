//! Query behavior configuration.
//!
//! # Invariants
//! - Missing keys fall back to `QueryConfig::default()`.
//! - `max_page_size` is the hard cap for every page request.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

/// Knobs shared by every query driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Whether text equality and partial matching compare case-sensitively.
    pub case_sensitive: bool,
    /// Page size used when a page request asks for size 0.
    pub default_page_size: u32,
    /// Upper bound applied to page request sizes.
    pub max_page_size: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl QueryConfig {
    pub fn case_insensitive() -> Self {
        Self {
            case_sensitive: false,
            ..Self::default()
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Resolves a requested page size against the configured bounds.
    pub fn page_size(&self, requested: u32) -> u32 {
        let max = self.max_page_size.max(1);
        match requested {
            0 => self.default_page_size.clamp(1, max),
            size => size.min(max),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read query config: {err}"),
            Self::Parse(err) => write!(f, "invalid query config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, QueryConfig};

    #[test]
    fn missing_keys_use_defaults() {
        let config = QueryConfig::from_json_str(r#"{"case_sensitive": false}"#).unwrap();
        assert!(!config.case_sensitive);
        assert_eq!(config.default_page_size, QueryConfig::default().default_page_size);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = QueryConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn page_size_defaults_and_clamps() {
        let config = QueryConfig {
            default_page_size: 10,
            max_page_size: 50,
            ..QueryConfig::default()
        };
        assert_eq!(config.page_size(0), 10);
        assert_eq!(config.page_size(1), 1);
        assert_eq!(config.page_size(500), 50);
    }
}
