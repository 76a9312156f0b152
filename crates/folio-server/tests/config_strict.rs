#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use folio_server::config::{self, UnknownPaths};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
metrics:
  uptime_interval: 15 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.metrics.uptime_interval_secs, 15);
    assert_eq!(cfg.metrics.unknown_paths, UnknownPaths::Collapse);
    assert_eq!(cfg.app.environment, "production");
    assert!(cfg.templates.layout_path().ends_with("templates/layout.html"));
    assert!(cfg.templates.content_path().ends_with("templates/content"));
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9000"
templates:
  dir: "site"
  layout: "base.html"
  content_dir: "pages"
metrics:
  uptime_interval_secs: 30
  unknown_paths: echo
app:
  version: "2.1.0"
  environment: "staging"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 9000);
    assert!(cfg.templates.layout_path().ends_with("site/base.html"));
    assert_eq!(cfg.metrics.uptime_interval().as_secs(), 30);
    assert_eq!(cfg.metrics.unknown_paths, UnknownPaths::Echo);
    assert_eq!(cfg.app.version, "2.1.0");
}

#[test]
fn rejects_wrong_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn rejects_out_of_range_values() {
    let bad_interval = "version: 1\nmetrics:\n  uptime_interval_secs: 0\n";
    assert!(config::load_from_str(bad_interval).is_err());

    let bad_listen = "version: 1\nserver:\n  listen: \"not-an-addr\"\n";
    assert!(config::load_from_str(bad_listen).is_err());

    let bad_policy = "version: 1\nmetrics:\n  unknown_paths: explode\n";
    assert!(config::load_from_str(bad_policy).is_err());
}

#[test]
fn environment_override() {
    let mut cfg = config::load_from_str("version: 1\napp:\n  environment: \"staging\"\n").unwrap();

    cfg.apply_env_overrides(None);
    assert_eq!(cfg.app.environment, "staging");

    cfg.apply_env_overrides(Some("  ".to_string()));
    assert_eq!(cfg.app.environment, "staging");

    cfg.apply_env_overrides(Some("development".to_string()));
    assert_eq!(cfg.app.environment, "development");
}
