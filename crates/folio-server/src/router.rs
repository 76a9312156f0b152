//! Axum router wiring.
//!
//! Every site route carries its fixed endpoint label into the
//! instrumentation layer; the fallback has none and is labelled by the
//! normalizer. `/health` and `/metrics` are left uninstrumented.

use axum::{
    http::StatusCode,
    routing::{any, get, post, MethodRouter},
    Router,
};

use crate::{app_state::AppState, contact, obs::instrumented, ops, pages};

pub fn build_router(state: AppState) -> Router {
    let metrics = state.metrics();
    let normalizer = state.normalizer();
    let route = |r: MethodRouter<AppState>, label: Option<&'static str>| {
        instrumented(r, metrics.clone(), normalizer, label)
    };

    Router::new()
        .route("/", route(get(pages::home), Some("home")))
        .route("/home", route(get(pages::home), Some("home")))
        .route("/api/home", route(get(pages::home), Some("home")))
        .route("/work-history", route(get(pages::work_history), Some("work_history")))
        .route("/api/work-history", route(get(pages::work_history), Some("work_history")))
        .route("/contact-me", route(get(pages::contact_me), Some("contact_me")))
        .route("/api/contact-me", route(get(pages::contact_me), Some("contact_me")))
        .route("/contact", route(post(contact::submit), Some("contact_submit")))
        .route("/api/contact", route(post(contact::submit), Some("contact_submit")))
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .fallback(route(any(not_found), None))
        .with_state(state)
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
