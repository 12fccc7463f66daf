use serde::{Deserialize, Serialize};

/// Runtime settings the static host hands to the browser client at
/// `GET /config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Base URL of the records service, without a trailing slash.
    pub api_base: String,
    /// Upper bound for each remote call. `None` leaves it to the transport.
    pub request_timeout_ms: Option<u32>,
    pub log_level: String,
    /// Storage key under which the sign-in screen keeps the bearer token.
    pub token_storage_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:5000/api".to_string(),
            request_timeout_ms: None,
            log_level: "info".to_string(),
            token_storage_key: "token".to_string(),
        }
    }
}

impl ClientConfig {
    /// Joins `path` onto the API base with exactly one separating slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "apiBase": "https://records.example/api/" }"#)
                .expect("partial config parses");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout_ms, None);
        assert_eq!(
            config.endpoint("/pool/all"),
            "https://records.example/api/pool/all"
        );
    }

    #[test]
    fn serializes_in_camel_case() {
        let config = ClientConfig {
            request_timeout_ms: Some(15_000),
            ..ClientConfig::default()
        };
        let json = serde_json::to_value(&config).expect("serializable");
        assert_eq!(json["requestTimeoutMs"], 15_000);
        assert_eq!(json["tokenStorageKey"], "token");
    }
}
