//! Runtime configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Every setting has a default so an empty environment is valid.

use crate::error::RenameError;
use chrono::NaiveDate;

/// Environment variable: how many content matches to scan
pub const ENV_CONTENT_MATCHES: &str = "DATE_RENAME_CONTENT_MATCHES";

/// Environment variable: read ambiguous numeric dates day-first
pub const ENV_DAY_FIRST: &str = "DATE_RENAME_DAY_FIRST";

/// Environment variable: chrono format for the date prefix
pub const ENV_DATE_FORMAT: &str = "DATE_RENAME_DATE_FORMAT";

/// Default cap on date matches kept from extracted document text
pub const DEFAULT_CONTENT_MATCHES: usize = 4;

/// Default prefix format, `YYYYMMDD_`
pub const DEFAULT_DATE_FORMAT: &str = "%Y%m%d_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of matches taken from document content
    pub content_match_limit: usize,

    /// Resolve `03 04 2019` as 3 April rather than March 4
    pub day_first: bool,

    /// chrono format string for the date prefix
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_match_limit: DEFAULT_CONTENT_MATCHES,
            day_first: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self, RenameError> {
        // Check current dir first, then the parent (running from a subfolder)
        if dotenvy::dotenv().is_err() {
            let _ = dotenvy::from_path("../.env");
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RenameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_CONTENT_MATCHES) {
            config.content_match_limit = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(RenameError::InvalidConfig {
                    key: ENV_CONTENT_MATCHES,
                    value: raw,
                })?;
        }

        if let Some(raw) = lookup(ENV_DAY_FIRST) {
            config.day_first = parse_bool(&raw).ok_or(RenameError::InvalidConfig {
                key: ENV_DAY_FIRST,
                value: raw,
            })?;
        }

        if let Some(raw) = lookup(ENV_DATE_FORMAT) {
            if !is_valid_format(&raw) {
                return Err(RenameError::InvalidConfig {
                    key: ENV_DATE_FORMAT,
                    value: raw,
                });
            }
            config.date_format = raw;
        }

        tracing::debug!("[Config] Loaded {:?}", config);
        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Reject empty formats and formats chrono cannot render for a plain date.
/// Time and offset fields (`%H`, `%z`) parse fine but fail when rendered.
fn is_valid_format(format: &str) -> bool {
    use std::fmt::Write;

    let Some(sample) = NaiveDate::from_ymd_opt(2000, 1, 1) else {
        return false;
    };
    let mut rendered = String::new();
    !format.is_empty() && write!(rendered, "{}", sample.format(format)).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_empty() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.content_match_limit, 4);
        assert_eq!(config.date_format, "%Y%m%d_");
        assert!(!config.day_first);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_CONTENT_MATCHES, "10"),
            (ENV_DAY_FIRST, "yes"),
            (ENV_DATE_FORMAT, "%Y-%m-%d "),
        ]))
        .unwrap();

        assert_eq!(config.content_match_limit, 10);
        assert!(config.day_first);
        assert_eq!(config.date_format, "%Y-%m-%d ");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[(ENV_CONTENT_MATCHES, "zero")])).unwrap_err();
        assert!(matches!(err, RenameError::InvalidConfig { key, .. } if key == ENV_CONTENT_MATCHES));

        assert!(Config::from_lookup(lookup_from(&[(ENV_CONTENT_MATCHES, "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(ENV_DAY_FIRST, "maybe")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(ENV_DATE_FORMAT, "%Y%Q")])).is_err());
    }

    #[test]
    fn test_time_fields_in_date_format_are_rejected() {
        for format in ["%Y%m%d-%H_", "%Y%m%d%M", "%Y%m%d%z_", ""] {
            let err = Config::from_lookup(lookup_from(&[(ENV_DATE_FORMAT, format)])).unwrap_err();
            assert!(
                matches!(err, RenameError::InvalidConfig { key, ref value } if key == ENV_DATE_FORMAT && value == format),
                "{:?} should be rejected",
                format
            );
        }

        // Date-only fields are still fine
        assert!(Config::from_lookup(lookup_from(&[(ENV_DATE_FORMAT, "%d %b %Y - ")])).is_ok());
    }
}
