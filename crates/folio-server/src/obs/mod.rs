//! Observability: metrics registry, request instrumentation, uptime tracking.
//!
//! Instruments live in a per-process `SiteMetrics` (one prometheus `Registry`
//! per instance) and are rendered by the `/metrics` handler.

pub mod instrument;
pub mod metrics;
pub mod uptime;

pub use instrument::{instrumented, track, Instrumented};
pub use metrics::{InFlightGuard, SiteMetrics};
pub use uptime::UptimeTracker;
