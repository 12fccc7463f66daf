//! Static host settings, read from the environment (and `.env` when present).

use std::env;

use common::model::config::ClientConfig;

/// Settings of the static host plus the client settings it publishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub host: String,
    pub port: u16,
    /// Open the portal in the default browser once the server is up.
    pub open_browser: bool,
    pub client: ClientConfig,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORTAL_PORT must be a valid u16, got {0:?}")]
    InvalidPort(String),
    #[error("PORTAL_OPEN_BROWSER must be true or false, got {0:?}")]
    InvalidFlag(String),
    #[error("RECORDS_REQUEST_TIMEOUT_MS must be a positive number of milliseconds, got {0:?}")]
    InvalidTimeout(String),
    #[error("RECORDS_API_BASE must be an http(s) URL, got {0:?}")]
    InvalidApiBase(String),
}

impl BackendConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the settings from `lookup`, which returns the raw value of a
    /// variable when it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ClientConfig::default();
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = var("PORTAL_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match var("PORTAL_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8080,
        };
        let open_browser = match var("PORTAL_OPEN_BROWSER") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag(raw))?,
            None => true,
        };

        let api_base = var("RECORDS_API_BASE").unwrap_or(defaults.api_base);
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ConfigError::InvalidApiBase(api_base));
        }
        let request_timeout_ms = match var("RECORDS_REQUEST_TIMEOUT_MS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(ms) if ms > 0 => Some(ms),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => None,
        };
        let log_level = var("PORTAL_LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Self {
            host,
            port,
            open_browser,
            client: ClientConfig {
                api_base: api_base.trim_end_matches('/').to_string(),
                request_timeout_ms,
                log_level,
                token_storage_key: defaults.token_storage_key,
            },
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = BackendConfig::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        assert!(config.open_browser);
        assert_eq!(config.client, ClientConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("PORTAL_HOST", "0.0.0.0"),
            ("PORTAL_PORT", "9000"),
            ("PORTAL_OPEN_BROWSER", "off"),
            ("RECORDS_API_BASE", "https://records.example/api/"),
            ("RECORDS_REQUEST_TIMEOUT_MS", "15000"),
            ("PORTAL_LOG_LEVEL", "debug"),
        ]))
        .expect("valid settings");

        assert_eq!(config.url(), "http://0.0.0.0:9000");
        assert!(!config.open_browser);
        assert_eq!(config.client.api_base, "https://records.example/api");
        assert_eq!(config.client.request_timeout_ms, Some(15_000));
        assert_eq!(config.client.log_level, "debug");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = BackendConfig::from_lookup(lookup(&[("PORTAL_PORT", "  ")]))
            .expect("blank port falls back");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!(
            BackendConfig::from_lookup(lookup(&[("PORTAL_PORT", "eighty")])),
            Err(ConfigError::InvalidPort("eighty".into()))
        );
        assert_eq!(
            BackendConfig::from_lookup(lookup(&[("PORTAL_OPEN_BROWSER", "maybe")])),
            Err(ConfigError::InvalidFlag("maybe".into()))
        );
        assert_eq!(
            BackendConfig::from_lookup(lookup(&[("RECORDS_REQUEST_TIMEOUT_MS", "0")])),
            Err(ConfigError::InvalidTimeout("0".into()))
        );
        assert_eq!(
            BackendConfig::from_lookup(lookup(&[("RECORDS_API_BASE", "records.local")])),
            Err(ConfigError::InvalidApiBase("records.local".into()))
        );
    }
}
