use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{web, HttpResponse, Responder};
use common::model::config::ClientConfig;

/// Actix web handler for `GET /config.json`.
///
/// The body is never cached so a restarted host with new settings is picked
/// up on the next page load.
pub async fn process(config: web::Data<ClientConfig>) -> impl Responder {
    HttpResponse::Ok()
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .json(config.get_ref())
}
