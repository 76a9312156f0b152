//! Request instrumentation middleware.
//!
//! Wraps a route (or the fallback) and records, per request:
//! - in-flight count (scoped guard, released on every exit path)
//! - elapsed seconds into `request_duration_seconds`
//! - `requests_total` keyed by `{method, endpoint, status_class}`
//! - an extra `errors_total{type="http_error"}` for statuses >= 400
//!
//! The status is read from the response the inner service actually produced,
//! so handlers never report their own outcome.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use tokio::time::Instant;

use folio_core::endpoint::EndpointNormalizer;
use folio_core::http::normalize_method;

use super::SiteMetrics;

/// Per-route middleware state.
#[derive(Clone)]
pub struct Instrumented {
    metrics: Arc<SiteMetrics>,
    normalizer: EndpointNormalizer,
    label: Option<&'static str>,
}

impl Instrumented {
    pub fn new(
        metrics: Arc<SiteMetrics>,
        normalizer: EndpointNormalizer,
        label: Option<&'static str>,
    ) -> Self {
        Self { metrics, normalizer, label }
    }
}

/// Middleware body; see [`instrumented`] for the layer constructor.
pub async fn track(State(inst): State<Instrumented>, req: Request, next: Next) -> Response {
    let method = normalize_method(req.method().as_str());
    let endpoint = inst
        .normalizer
        .normalize(req.uri().path(), inst.label.unwrap_or_default())
        .into_owned();

    let start = Instant::now();
    let in_flight = inst.metrics.in_flight();

    let resp = next.run(req).await;

    let elapsed = start.elapsed();
    drop(in_flight);

    let status = resp.status().as_u16();
    inst.metrics.observe_request(method, &endpoint, status, elapsed);
    tracing::debug!(%method, %endpoint, status, ?elapsed, "request");

    resp
}

/// Wrap `route` with request instrumentation. `label` is the route's fixed
/// endpoint label; `None` defers to the normalizer.
pub fn instrumented<S>(
    route: MethodRouter<S>,
    metrics: Arc<SiteMetrics>,
    normalizer: EndpointNormalizer,
    label: Option<&'static str>,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.layer(middleware::from_fn_with_state(
        Instrumented::new(metrics, normalizer, label),
        track,
    ))
}
