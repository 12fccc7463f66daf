mod config;
mod services;

use std::thread;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use crate::config::BackendConfig;
use crate::services::assets::serve_embedded;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match BackendConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            env_logger::init_from_env(Env::default().default_filter_or("info"));
            error!("invalid configuration: {}", err);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err));
        }
    };
    env_logger::init_from_env(Env::default().default_filter_or(config.client.log_level.as_str()));

    let url = config.url();
    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(err) = webbrowser::open(&url) {
                log::warn!("could not open a browser at {}: {}", url, err);
            }
        });
    }

    info!("Portal running at {}", url);
    info!("Records service at {}", config.client.api_base);

    let client = web::Data::new(config.client.clone());
    HttpServer::new(move || {
        App::new()
            .app_data(client.clone())
            .service(services::client_config::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
