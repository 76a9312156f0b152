//! Metrics registry for the site.
//!
//! Every instrument is created and registered exactly once in
//! [`SiteMetrics::new`]; a registration failure aborts boot. Attribute values
//! always come from closed sets (normalized method, endpoint label, status
//! class, page id, render mode, error kind, email category), never from raw
//! request input.

use std::time::Duration;

use prometheus::core::Collector;
use prometheus::{
    exponential_buckets, Counter, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge,
    Opts, Registry, TextEncoder,
};

use folio_core::error::{Result, SiteError};
use folio_core::http::status_class;

use crate::render::RenderMode;

const REQUEST_LABELS: [&str; 3] = ["method", "endpoint", "status_class"];

pub struct SiteMetrics {
    registry: Registry,
    pub requests_total: IntCounterVec,
    pub request_duration_seconds: HistogramVec,
    pub requests_in_flight: IntGauge,
    pub template_renders_total: IntCounterVec,
    pub emails_sent_total: IntCounterVec,
    pub errors_total: IntCounterVec,
    pub uptime_seconds_total: Counter,
    pub application_info: IntCounterVec,
}

impl SiteMetrics {
    /// Create every instrument on a fresh registry.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let requests_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "requests_total",
                    "Completed requests by method, endpoint and status class",
                ),
                &REQUEST_LABELS,
            ),
        )?;

        let buckets = exponential_buckets(0.001, 2.0, 14).map_err(init_err)?;
        let request_duration_seconds = register(
            &registry,
            HistogramVec::new(
                HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
                    .buckets(buckets),
                &REQUEST_LABELS,
            ),
        )?;

        let requests_in_flight = register(
            &registry,
            IntGauge::new("requests_in_flight", "Requests currently being processed"),
        )?;

        let template_renders_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new("template_renders_total", "Template renders by page and render type"),
                &["template", "render_type"],
            ),
        )?;

        let emails_sent_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new("emails_sent_total", "Emails sent by category"),
                &["category"],
            ),
        )?;

        let errors_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new("errors_total", "Errors by type and endpoint"),
                &["type", "endpoint"],
            ),
        )?;

        let uptime_seconds_total = register(
            &registry,
            Counter::new("uptime_seconds_total", "Observed uptime in seconds"),
        )?;

        let application_info = register(
            &registry,
            IntCounterVec::new(
                Opts::new("application_info", "Application information"),
                &["version", "environment"],
            ),
        )?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            requests_in_flight,
            template_renders_total,
            emails_sent_total,
            errors_total,
            uptime_seconds_total,
            application_info,
        })
    }

    /// Mark a request as started; the returned guard marks it finished on drop.
    pub fn in_flight(&self) -> InFlightGuard {
        InFlightGuard::new(self.requests_in_flight.clone())
    }

    /// Record a completed request.
    pub fn observe_request(&self, method: &str, endpoint: &str, status: u16, elapsed: Duration) {
        let class = status_class(status);
        let labels = [method, endpoint, class];

        self.requests_total.with_label_values(&labels).inc();
        self.request_duration_seconds
            .with_label_values(&labels)
            .observe(elapsed.as_secs_f64());

        if status >= 400 {
            self.record_error("http_error", endpoint);
        }
    }

    pub fn record_render(&self, page: &str, mode: RenderMode) {
        self.template_renders_total
            .with_label_values(&[page, mode.as_label()])
            .inc();
    }

    pub fn record_error(&self, kind: &str, endpoint: &str) {
        self.errors_total.with_label_values(&[kind, endpoint]).inc();
    }

    pub fn record_email_sent(&self, category: &str) {
        self.emails_sent_total.with_label_values(&[category]).inc();
    }

    /// One-shot informational record, emitted at boot.
    pub fn record_app_info(&self, version: &str, environment: &str) {
        self.application_info
            .with_label_values(&[version, environment])
            .inc();
    }

    pub fn add_uptime(&self, elapsed: Duration) {
        self.uptime_seconds_total.inc_by(elapsed.as_secs_f64());
    }

    /// Current value of the in-flight gauge.
    pub fn in_flight_count(&self) -> i64 {
        self.requests_in_flight.get()
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buf)
            .map_err(|e| SiteError::Internal(format!("encode metrics failed: {e}")))?;
        String::from_utf8(buf)
            .map_err(|e| SiteError::Internal(format!("metrics not utf-8: {e}")))
    }
}

fn register<C>(registry: &Registry, collector: prometheus::Result<C>) -> Result<C>
where
    C: Collector + Clone + 'static,
{
    let collector = collector.map_err(init_err)?;
    registry
        .register(Box::new(collector.clone()))
        .map_err(init_err)?;
    Ok(collector)
}

fn init_err(e: prometheus::Error) -> SiteError {
    SiteError::InstrumentInit(e.to_string())
}

/// Scoped in-flight marker. Decrements on every exit path, including
/// handler errors and a dropped request future.
#[must_use]
pub struct InFlightGuard {
    gauge: IntGauge,
}

impl InFlightGuard {
    fn new(gauge: IntGauge) -> Self {
        gauge.inc();
        Self { gauge }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}
