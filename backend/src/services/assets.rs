//! Serves the compiled frontend bundle embedded at build time.
//!
//! Client paths such as `/placement-details` have no file extension and get
//! the portal entry point. A missing asset (`/app.js`, `/logo.png`) is a 404,
//! so a stale bundle fails loudly instead of receiving HTML.

use std::path::Path;

use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir, File};
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

const ENTRY_POINT: &str = "index.html";

/// What a request path resolves to inside the bundle.
#[derive(Debug, PartialEq, Eq)]
enum Lookup<'a> {
    Asset(&'a str),
    EntryPoint,
    Missing,
}

fn resolve(path: &str, exists: impl Fn(&str) -> bool) -> Lookup<'_> {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return Lookup::EntryPoint;
    }
    if exists(path) {
        return Lookup::Asset(path);
    }
    match Path::new(path).extension() {
        Some(_) => Lookup::Missing,
        None => Lookup::EntryPoint,
    }
}

fn respond_with(file: &File<'_>, name: &str) -> HttpResponse {
    let mime = from_path(name).first_or_octet_stream();
    HttpResponse::Ok()
        .content_type(mime.as_ref())
        .body(file.contents().to_vec())
}

pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let found = match resolve(req.path(), |name| STATIC_DIR.get_file(name).is_some()) {
        Lookup::Asset(name) => STATIC_DIR.get_file(name).map(|file| (file, name)),
        Lookup::EntryPoint => STATIC_DIR
            .get_file(ENTRY_POINT)
            .map(|file| (file, ENTRY_POINT)),
        Lookup::Missing => {
            log::debug!("no bundled asset at {}", req.path());
            None
        }
    };

    match found {
        Some((file, name)) => respond_with(file, name),
        None => HttpResponse::NotFound().body("Not Found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    fn content_type(resp: &actix_web::dev::ServiceResponse) -> String {
        resp.headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[::core::prelude::v1::test]
    fn paths_resolve_by_shape() {
        let bundled = |name: &str| name == "frontend-1a2b.js";
        assert_eq!(resolve("/", bundled), Lookup::EntryPoint);
        assert_eq!(resolve("/frontend-1a2b.js", bundled), Lookup::Asset("frontend-1a2b.js"));
        assert_eq!(resolve("/enrollment-details", bundled), Lookup::EntryPoint);
        assert_eq!(resolve("/frontend-0000.js", bundled), Lookup::Missing);
    }

    #[actix_web::test]
    async fn client_routes_get_the_entry_point() {
        let app =
            test::init_service(App::new().default_service(web::route().to(serve_embedded))).await;

        for uri in ["/", "/placement-details"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert!(resp.status().is_success(), "{}", uri);
            assert!(content_type(&resp).starts_with("text/html"), "{}", uri);
        }
    }

    #[actix_web::test]
    async fn missing_assets_are_not_answered_with_html() {
        let app =
            test::init_service(App::new().default_service(web::route().to(serve_embedded))).await;

        let req = test::TestRequest::get().uri("/missing-bundle.wasm").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
