//! Application configuration management.
//!
//! This module handles loading the application configuration:
//! the record source endpoint, the number of users to request, the optional
//! nationality filter and the request timeout.
//!
//! Configuration is stored at `~/.config/usergallery/config.json`. Values from
//! the environment (`USERGALLERY_API_URL`, `USERGALLERY_RESULTS`,
//! `USERGALLERY_NAT`) take precedence over the file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::client::{DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RESULT_COUNT};

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "usergallery";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const ENV_API_URL: &str = "USERGALLERY_API_URL";
const ENV_RESULTS: &str = "USERGALLERY_RESULTS";
const ENV_NAT: &str = "USERGALLERY_NAT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub results: u32,
    pub nationalities: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            results: DEFAULT_RESULT_COUNT,
            nationalities: Vec::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load the config file (defaults if absent) and apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in practice)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|s| !s.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_RESULTS) {
            match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => self.results = n,
                _ => warn!(value = %raw, "Ignoring invalid {}", ENV_RESULTS),
            }
        }

        if let Some(raw) = lookup(ENV_NAT) {
            self.nationalities = parse_nationalities(&raw);
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the log file
    pub fn log_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

/// Split a comma separated nationality list, lowercased, empties dropped
pub fn parse_nationalities(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
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
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://randomuser.me/api/");
        assert_eq!(config.results, 12);
        assert!(config.nationalities.is_empty());
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{ "results": 24 }"#).unwrap();
        assert_eq!(config.results, 24);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            (ENV_API_URL, "http://localhost:8080/api/"),
            (ENV_RESULTS, "6"),
            (ENV_NAT, "US, gb,,"),
        ]));
        assert_eq!(config.api_url, "http://localhost:8080/api/");
        assert_eq!(config.results, 6);
        assert_eq!(config.nationalities, vec!["us", "gb"]);
    }

    #[test]
    fn test_invalid_results_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[(ENV_RESULTS, "zero"), (ENV_API_URL, "  ")]));
        assert_eq!(config.results, 12);
        assert_eq!(config.api_url, DEFAULT_API_URL);

        config.apply_overrides(lookup_from(&[(ENV_RESULTS, "0")]));
        assert_eq!(config.results, 12);
    }
}
