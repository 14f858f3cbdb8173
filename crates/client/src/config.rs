//! Client configuration from the environment.
//!
//! | variable | meaning |
//! |---|---|
//! | `BAZAAR_BACKEND_URL` | hosted backend base URL; unset means the in-memory backend |
//! | `BAZAAR_ANON_KEY` | public API key sent with every request |
//! | `BAZAAR_SCROLL_KEY` | session-storage key for the saved scroll offset |

use thiserror::Error;

use crate::scroll::DEFAULT_SCROLL_KEY;

pub const BACKEND_URL_VAR: &str = "BAZAAR_BACKEND_URL";
pub const ANON_KEY_VAR: &str = "BAZAAR_ANON_KEY";
pub const SCROLL_KEY_VAR: &str = "BAZAAR_SCROLL_KEY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got '{value}'")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{0} is set but {1} is missing")]
    MissingCompanion(&'static str, &'static str),
}

/// Where the hosted backend lives and how to authenticate to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `None` runs against the in-memory backend.
    pub backend: Option<BackendConfig>,
    pub scroll_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: None,
            scroll_key: DEFAULT_SCROLL_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let backend = match get(BACKEND_URL_VAR) {
            None => None,
            Some(url) => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidUrl {
                        var: BACKEND_URL_VAR,
                        value: url,
                    });
                }
                let anon_key = get(ANON_KEY_VAR)
                    .ok_or(ConfigError::MissingCompanion(BACKEND_URL_VAR, ANON_KEY_VAR))?;
                Some(BackendConfig { url, anon_key })
            }
        };

        Ok(Self {
            backend,
            scroll_key: get(SCROLL_KEY_VAR).unwrap_or_else(|| DEFAULT_SCROLL_KEY.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.scroll_key, "marketplace-scroll");
    }

    #[test]
    fn backend_needs_url_and_key() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BACKEND_URL_VAR, "https://shop.example.co"),
            (ANON_KEY_VAR, "anon"),
            (SCROLL_KEY_VAR, "scroll"),
        ]))
        .unwrap();
        assert_eq!(
            config.backend,
            Some(BackendConfig {
                url: "https://shop.example.co".to_string(),
                anon_key: "anon".to_string(),
            })
        );
        assert_eq!(config.scroll_key, "scroll");

        let err = ClientConfig::from_lookup(lookup(&[(BACKEND_URL_VAR, "https://x.co")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingCompanion(BACKEND_URL_VAR, ANON_KEY_VAR));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[
            (BACKEND_URL_VAR, "ftp://files.example"),
            (ANON_KEY_VAR, "anon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = ClientConfig::from_lookup(lookup(&[(BACKEND_URL_VAR, "  "), (SCROLL_KEY_VAR, "")])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
