//! Generator API key resolution and validation
//!
//! **Priority:** `API_KEY` env → `GEMINI_API_KEY` env → TOML `generator.api_key`
//!
//! The first non-empty source wins and is then checked against an
//! [`ApiKeyPolicy`]. Resolution happens once, when the generator client is
//! constructed, never at call time.

use crate::config::GeneratorConfig;
use thiserror::Error;
use tracing::{info, warn};

/// Environment variables consulted for the key, in priority order
pub const API_KEY_ENV_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Why a credential was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("API key not found or invalid. Set GEMINI_API_KEY or generator.api_key. Get an API key from https://aistudio.google.com/apikey")]
    Missing,

    #[error("API key appears to be a placeholder ending with '...'. Get an API key from https://aistudio.google.com/apikey")]
    Placeholder,

    #[error("Invalid API key format: key should start with '{0}'. Get an API key from https://aistudio.google.com/apikey")]
    InvalidPrefix(String),

    #[error("API key seems too short ({actual} characters, minimum {minimum}). Get an API key from https://aistudio.google.com/apikey")]
    TooShort { actual: usize, minimum: usize },
}

/// Validation rules applied to a candidate key
#[derive(Debug, Clone)]
pub struct ApiKeyPolicy {
    /// Required key prefix; `None` disables the check
    pub required_prefix: Option<String>,
    /// Minimum length in characters after trimming
    pub min_length: usize,
    /// Sample values copied from documentation, treated as absent
    pub placeholders: Vec<String>,
}

impl Default for ApiKeyPolicy {
    fn default() -> Self {
        Self {
            required_prefix: Some("AIza".to_string()),
            min_length: 30,
            placeholders: vec![
                "YOUR_NEW_API_KEY_HERE".to_string(),
                "YOUR_API_KEY".to_string(),
                "AIzaSyABC123xyz789...".to_string(),
            ],
        }
    }
}

impl ApiKeyPolicy {
    /// Check a raw key and return its trimmed form
    ///
    /// Checks run in order: empty/placeholder, trailing `...`, prefix, length.
    pub fn validate(&self, raw: &str) -> Result<String, CredentialError> {
        let key = raw.trim();

        if key.is_empty() || self.placeholders.iter().any(|p| p == key) {
            return Err(CredentialError::Missing);
        }

        if key.ends_with("...") {
            return Err(CredentialError::Placeholder);
        }

        if let Some(prefix) = &self.required_prefix {
            if !key.starts_with(prefix.as_str()) {
                return Err(CredentialError::InvalidPrefix(prefix.clone()));
            }
        }

        let length = key.chars().count();
        if length < self.min_length {
            return Err(CredentialError::TooShort {
                actual: length,
                minimum: self.min_length,
            });
        }

        Ok(key.to_string())
    }
}

/// Pick the first non-empty candidate from labelled sources and validate it
///
/// Sources must be given in priority order.
pub fn select_api_key(
    sources: &[(&str, Option<String>)],
    policy: &ApiKeyPolicy,
) -> Result<String, CredentialError> {
    let present: Vec<(&str, &str)> = sources
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (*label, v))
        })
        .collect();

    if present.len() > 1 {
        let labels: Vec<&str> = present.iter().map(|(label, _)| *label).collect();
        warn!(
            "API key found in multiple sources: {}. Using {} (highest priority).",
            labels.join(", "),
            labels[0]
        );
    }

    let (label, value) = present.first().ok_or(CredentialError::Missing)?;
    let key = policy.validate(value)?;
    info!(source = %label, key_len = key.len(), "Generator API key resolved");
    Ok(key)
}

/// Resolve the generator API key from environment and TOML
pub fn resolve_api_key(
    generator: &GeneratorConfig,
    policy: &ApiKeyPolicy,
) -> Result<String, CredentialError> {
    let mut sources: Vec<(&str, Option<String>)> = API_KEY_ENV_VARS
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();
    sources.push(("TOML", generator.api_key.clone()));

    select_api_key(&sources, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_KEY: &str = "AIzaSyD0123456789abcdefghijklmnopqrs";

    #[test]
    fn test_valid_key_is_trimmed() {
        let policy = ApiKeyPolicy::default();
        let key = policy.validate(&format!("  {}\n", GOOD_KEY)).unwrap();
        assert_eq!(key, GOOD_KEY);
    }

    #[test]
    fn test_empty_and_placeholder_are_missing() {
        let policy = ApiKeyPolicy::default();
        assert_eq!(policy.validate("   "), Err(CredentialError::Missing));
        assert_eq!(
            policy.validate("YOUR_NEW_API_KEY_HERE"),
            Err(CredentialError::Missing)
        );
        assert_eq!(
            policy.validate("AIzaSyABC123xyz789..."),
            Err(CredentialError::Missing)
        );
    }

    #[test]
    fn test_truncated_key_is_placeholder() {
        let policy = ApiKeyPolicy::default();
        assert_eq!(
            policy.validate("AIzaSyD0123456789abcdefghij..."),
            Err(CredentialError::Placeholder)
        );
    }

    #[test]
    fn test_wrong_prefix_rejected() {
        let policy = ApiKeyPolicy::default();
        assert_eq!(
            policy.validate("sk-0123456789abcdefghijklmnopqrstuvwxyz"),
            Err(CredentialError::InvalidPrefix("AIza".to_string()))
        );
    }

    #[test]
    fn test_short_key_rejected() {
        let policy = ApiKeyPolicy::default();
        assert_eq!(
            policy.validate("AIza12345"),
            Err(CredentialError::TooShort {
                actual: 9,
                minimum: 30
            })
        );
    }

    #[test]
    fn test_relaxed_policy() {
        let policy = ApiKeyPolicy {
            required_prefix: None,
            min_length: 4,
            placeholders: vec![],
        };
        assert_eq!(policy.validate("test-key").unwrap(), "test-key");
    }

    #[test]
    fn test_select_prefers_first_non_empty_source() {
        let policy = ApiKeyPolicy::default();
        let second = format!("{}X", GOOD_KEY);
        let sources = vec![
            ("API_KEY", Some("   ".to_string())),
            ("GEMINI_API_KEY", Some(second.clone())),
            ("TOML", Some(GOOD_KEY.to_string())),
        ];
        assert_eq!(select_api_key(&sources, &policy).unwrap(), second);
    }

    #[test]
    fn test_select_does_not_skip_invalid_higher_priority_key() {
        let policy = ApiKeyPolicy::default();
        let sources = vec![
            ("API_KEY", Some("bad".to_string())),
            ("TOML", Some(GOOD_KEY.to_string())),
        ];
        assert!(matches!(
            select_api_key(&sources, &policy),
            Err(CredentialError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_select_with_no_sources() {
        let policy = ApiKeyPolicy::default();
        let sources: Vec<(&str, Option<String>)> = vec![("API_KEY", None), ("TOML", None)];
        assert_eq!(
            select_api_key(&sources, &policy),
            Err(CredentialError::Missing)
        );
    }
}
