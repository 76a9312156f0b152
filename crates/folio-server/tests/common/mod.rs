//! Shared fixtures for server integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use folio_core::endpoint::EndpointNormalizer;
use folio_server::app_state::AppState;
use folio_server::contact::{LogMailer, Mailer};
use folio_server::obs::SiteMetrics;
use folio_server::render::TemplateStore;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture_store() -> TemplateStore {
    let dir = fixtures_dir().join("templates");
    TemplateStore::load(&dir.join("layout.html"), &dir.join("content")).expect("fixtures load")
}

pub fn fixture_state() -> AppState {
    fixture_state_with_mailer(Arc::new(LogMailer))
}

pub fn fixture_state_with_mailer(mailer: Arc<dyn Mailer>) -> AppState {
    AppState::from_parts(
        Arc::new(fixture_store()),
        Arc::new(SiteMetrics::new().expect("metrics")),
        EndpointNormalizer::default(),
        mailer,
    )
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.expect("infallible")
}

pub async fn body_string(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

pub fn get_fragment(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("HX-Request", "true")
        .body(Body::empty())
        .expect("request")
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}
