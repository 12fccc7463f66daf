use common::model::config::ClientConfig;
use gloo_net::http::Request;

/// Where the static host publishes the client settings.
pub const CONFIG_PATH: &str = "/config.json";

/// Fetches the client settings. Any failure falls back to the defaults so the
/// portal still starts against the default records service.
pub async fn load() -> ClientConfig {
    match fetch().await {
        Ok(config) => {
            log::info!("records service at {}", config.api_base);
            config
        }
        Err(reason) => {
            log::warn!("using default settings: {}", reason);
            ClientConfig::default()
        }
    }
}

async fn fetch() -> Result<ClientConfig, String> {
    let response = Request::get(CONFIG_PATH)
        .send()
        .await
        .map_err(|err| err.to_string())?;

    if !response.ok() {
        return Err(format!("{} answered with status {}", CONFIG_PATH, response.status()));
    }

    response
        .json::<ClientConfig>()
        .await
        .map_err(|err| err.to_string())
}
