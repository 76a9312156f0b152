#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;

use folio_core::error::{Result, SiteError};
use folio_server::contact::{email_category, ContactForm, ContactMessage, Mailer};
use folio_server::router::build_router;

use common::{body_string, post_form, send};

#[derive(Default)]
struct FailingMailer {
    attempts: AtomicUsize,
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _msg: &ContactMessage) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(SiteError::EmailSend("smtp unavailable".into()))
    }
}

const VALID: &str = "name=Ada&reason=Job+opportunity&subject=Hello&body=Let%27s+talk";

#[tokio::test]
async fn successful_submission_counts_category() {
    let state = common::fixture_state();
    let app = build_router(state.clone());

    let resp = send(&app, post_form("/api/contact", VALID)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("form-response success"));

    let m = state.metrics();
    assert_eq!(m.emails_sent_total.with_label_values(&["career"]).get(), 1);
    assert_eq!(
        m.requests_total
            .with_label_values(&["POST", "contact_submit", "2xx"])
            .get(),
        1
    );
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let state = common::fixture_state();
    let app = build_router(state.clone());

    let resp = send(&app, post_form("/contact", "name=Ada&reason=&subject=Hi&body=+++")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp).await.contains("All fields are required"));

    let m = state.metrics();
    assert_eq!(
        m.errors_total
            .with_label_values(&["form_validation_error", "contact_submit"])
            .get(),
        1
    );
    assert_eq!(m.errors_total.with_label_values(&["http_error", "contact_submit"]).get(), 1);
}

#[tokio::test]
async fn unparseable_body_is_rejected() {
    let state = common::fixture_state();
    let app = build_router(state.clone());

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/contact")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{}"))
        .unwrap();
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let m = state.metrics();
    assert_eq!(
        m.errors_total
            .with_label_values(&["form_parse_error", "contact_submit"])
            .get(),
        1
    );
}

#[tokio::test]
async fn send_failure_is_500_and_not_retried() {
    let mailer = Arc::new(FailingMailer::default());
    let state = common::fixture_state_with_mailer(mailer.clone());
    let app = build_router(state.clone());

    let resp = send(&app, post_form("/contact", VALID)).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(mailer.attempts.load(Ordering::SeqCst), 1);

    let m = state.metrics();
    assert_eq!(
        m.errors_total
            .with_label_values(&["email_send_error", "contact_submit"])
            .get(),
        1
    );
    assert_eq!(m.emails_sent_total.with_label_values(&["career"]).get(), 0);
}

#[tokio::test]
async fn get_is_not_allowed() {
    let app = build_router(common::fixture_state());
    let resp = send(&app, common::get("/contact")).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn reasons_collapse_into_categories() {
    assert_eq!(email_category("Job opportunity"), "career");
    assert_eq!(email_category("  CAREER chat "), "career");
    assert_eq!(email_category("Business consulting"), "consulting");
    assert_eq!(email_category("Quick question"), "inquiry");
    assert_eq!(email_category("Open source project"), "collaboration");
    assert_eq!(email_category("Just saying hi"), "general");
}

#[test]
fn validation_trims_fields() {
    let form = ContactForm {
        name: "  Ada ".into(),
        reason: "help".into(),
        subject: " Hi".into(),
        body: "text ".into(),
    };
    let msg = form.validate().unwrap();
    assert_eq!(msg.name, "Ada");
    assert_eq!(msg.subject, "Hi");
    assert_eq!(msg.category(), "inquiry");

    let err = ContactForm::default().validate().unwrap_err();
    assert_eq!(err.error_kind(), "form_validation_error");
    assert_eq!(err.to_string(), "form validation failed: missing fields: name,reason,subject,body");
}
