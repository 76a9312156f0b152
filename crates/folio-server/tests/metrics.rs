#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use folio_server::obs::SiteMetrics;
use folio_server::render::RenderMode;

#[test]
fn instances_are_isolated() {
    let a = SiteMetrics::new().unwrap();
    let b = SiteMetrics::new().unwrap();

    a.observe_request("GET", "home", 200, Duration::from_millis(3));
    assert_eq!(a.requests_total.with_label_values(&["GET", "home", "2xx"]).get(), 1);
    assert_eq!(b.requests_total.with_label_values(&["GET", "home", "2xx"]).get(), 0);
}

#[test]
fn error_statuses_also_count_http_error() {
    let m = SiteMetrics::new().unwrap();
    m.observe_request("GET", "home", 302, Duration::ZERO);
    m.observe_request("POST", "contact_submit", 400, Duration::ZERO);
    m.observe_request("GET", "home", 503, Duration::ZERO);

    assert_eq!(m.errors_total.with_label_values(&["http_error", "home"]).get(), 1);
    assert_eq!(m.errors_total.with_label_values(&["http_error", "contact_submit"]).get(), 1);
    assert_eq!(m.requests_total.with_label_values(&["GET", "home", "3xx"]).get(), 1);
    assert_eq!(
        m.request_duration_seconds
            .with_label_values(&["GET", "home", "5xx"])
            .get_sample_count(),
        1
    );
}

#[test]
fn in_flight_guard_is_scoped() {
    let m = SiteMetrics::new().unwrap();
    {
        let _a = m.in_flight();
        let _b = m.in_flight();
        assert_eq!(m.in_flight_count(), 2);
    }
    assert_eq!(m.in_flight_count(), 0);
}

#[test]
fn exposition_lists_every_family() {
    let m = SiteMetrics::new().unwrap();
    m.observe_request("GET", "home", 200, Duration::from_millis(1));
    m.record_render("home", RenderMode::FullPage);
    m.record_email_sent("career");
    m.record_error("template_not_found", "other");
    m.record_app_info("1.0.0", "test");
    m.add_uptime(Duration::from_secs(15));

    let text = m.render().unwrap();
    for name in [
        "requests_total",
        "request_duration_seconds",
        "requests_in_flight",
        "template_renders_total",
        "emails_sent_total",
        "errors_total",
        "uptime_seconds_total",
        "application_info",
    ] {
        assert!(text.contains(&format!("# TYPE {name} ")), "missing {name}");
    }
    assert!(text.contains(r#"application_info{environment="test",version="1.0.0"} 1"#));
    assert!(text.contains("uptime_seconds_total 15"));
}
