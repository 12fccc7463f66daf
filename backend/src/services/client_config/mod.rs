//! # Client Configuration Service
//!
//! Publishes the settings the browser client needs before it can talk to the
//! records service: API base, request timeout, log level and the storage key
//! of the bearer token.

mod get;

use actix_web::web::{get, resource};
use actix_web::Resource;

/// Path the frontend fetches at startup.
pub const CONFIG_PATH: &str = "/config.json";

/// Registers `GET /config.json`, answered by `get::process` from the
/// `ClientConfig` stored as application data.
pub fn configure_routes() -> Resource {
    resource(CONFIG_PATH).route(get().to(get::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};
    use common::model::config::ClientConfig;

    #[actix_web::test]
    async fn serves_the_client_settings_in_camel_case() {
        let config = ClientConfig {
            api_base: "https://records.example/api".to_string(),
            request_timeout_ms: Some(15_000),
            ..ClientConfig::default()
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri(CONFIG_PATH).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()
                .get("cache-control")
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["apiBase"], "https://records.example/api");
        assert_eq!(body["requestTimeoutMs"], 15_000);
        assert_eq!(body["logLevel"], "info");
        assert_eq!(body["tokenStorageKey"], "token");
    }

    #[actix_web::test]
    async fn rejects_other_methods() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ClientConfig::default()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post().uri(CONFIG_PATH).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::METHOD_NOT_ALLOWED);
    }
}
