//! Runtime configuration read from the environment.
//!
//! | Variable              | Default                   |
//! |-----------------------|---------------------------|
//! | `ORBITR_API_URL`      | `http://127.0.0.1:5000/`  |
//! | `ORBITR_TIMEOUT_SECS` | `15`                      |
//! | `ORBITR_OFFLINE`      | off                       |

use std::time::Duration;

use url::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: invalid URL: {source}")]
    Url {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("{var}: expected a whole number of seconds, got {value:?}")]
    Timeout { var: &'static str, value: String },
    #[error("{var}: expected a boolean, got {value:?}")]
    Flag { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Root the `api/...` paths are joined onto.
    pub api_base: Url,
    pub timeout: Duration,
    /// Serve the bundled almanac instead of talking to the API.
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            offline: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("ORBITR_API_URL") {
            config.api_base = parse_base(&raw).map_err(|source| ConfigError::Url {
                var: "ORBITR_API_URL",
                source,
            })?;
        }

        if let Some(raw) = lookup("ORBITR_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::Timeout {
                var: "ORBITR_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("ORBITR_OFFLINE") {
            config.offline = parse_flag(&raw).ok_or_else(|| ConfigError::Flag {
                var: "ORBITR_OFFLINE",
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }
}

/// Parse a base URL, forcing a trailing slash so `join` appends instead of
/// replacing the last segment.
fn parse_base(raw: &str) -> Result<Url, url::ParseError> {
    let raw = raw.trim();
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{}/", raw))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base.as_str(), DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(!config.offline);
    }

    #[test]
    fn base_without_trailing_slash_keeps_its_path() {
        let config =
            Config::from_lookup(lookup(&[("ORBITR_API_URL", "https://example.org/orbitr")])).unwrap();
        assert_eq!(config.api_base.as_str(), "https://example.org/orbitr/");
        assert_eq!(
            config.api_base.join("api/rso").unwrap().as_str(),
            "https://example.org/orbitr/api/rso"
        );
    }

    #[test]
    fn parses_timeout_and_offline() {
        let config = Config::from_lookup(lookup(&[
            ("ORBITR_TIMEOUT_SECS", "3"),
            ("ORBITR_OFFLINE", "Yes"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(config.offline);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("ORBITR_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::Timeout { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("ORBITR_OFFLINE", "maybe")])),
            Err(ConfigError::Flag { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("ORBITR_API_URL", "not a url")])),
            Err(ConfigError::Url { .. })
        ));
    }
}
