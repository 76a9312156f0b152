//! Contact form submission.
//!
//! Parsing and validation are deliberately thin; the interesting part for
//! this server is outcome reporting: every failure lands in `errors_total`
//! under its own kind, and a successful send increments
//! `emails_sent_total{category}` with the reason collapsed into a closed set.

use async_trait::async_trait;
use axum::{
    extract::{rejection::FormRejection, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use folio_core::error::{Result, SiteError};

use crate::app_state::AppState;

/// Raw form body. Missing fields deserialize as empty and fail validation.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

/// Trimmed, fully populated submission.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub reason: String,
    pub subject: String,
    pub body: String,
}

impl ContactForm {
    pub fn validate(self) -> Result<ContactMessage> {
        let msg = ContactMessage {
            name: self.name.trim().to_string(),
            reason: self.reason.trim().to_string(),
            subject: self.subject.trim().to_string(),
            body: self.body.trim().to_string(),
        };
        let missing: Vec<&str> = [
            ("name", &msg.name),
            ("reason", &msg.reason),
            ("subject", &msg.subject),
            ("body", &msg.body),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(k, _)| k)
        .collect();

        if !missing.is_empty() {
            return Err(SiteError::FormValidation(format!(
                "missing fields: {}",
                missing.join(",")
            )));
        }
        Ok(msg)
    }
}

impl ContactMessage {
    pub fn category(&self) -> &'static str {
        email_category(&self.reason)
    }
}

/// Collapse a free-text contact reason into a fixed category.
pub fn email_category(reason: &str) -> &'static str {
    let reason = reason.trim().to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| reason.contains(w));

    if has(&["job", "work", "career"]) {
        "career"
    } else if has(&["consult", "business"]) {
        "consulting"
    } else if has(&["question", "help"]) {
        "inquiry"
    } else if has(&["collaboration", "project"]) {
        "collaboration"
    } else {
        "general"
    }
}

/// Outbound delivery of a validated submission. Not retried.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, msg: &ContactMessage) -> Result<()>;
}

/// Mailer that only records the submission in the log (no transport).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, msg: &ContactMessage) -> Result<()> {
        tracing::info!(category = msg.category(), "contact submission accepted");
        Ok(())
    }
}

const PARSE_ERROR_HTML: &str =
    r#"<div class="form-response error">Error parsing form data. Please try again.</div>"#;
const VALIDATION_ERROR_HTML: &str = concat!(
    r#"<div class="form-response error">"#,
    "All fields are required. Please fill out the complete form.</div>"
);
const SEND_ERROR_HTML: &str = concat!(
    r#"<div class="form-response error">"#,
    "There was an error sending your message. Please try again later.</div>"
);
const SUCCESS_HTML: &str = concat!(
    r#"<div class="form-response success">"#,
    "Thank you for your message! I'll get back to you soon.</div>"
);

pub async fn submit(
    State(app): State<AppState>,
    uri: Uri,
    form: std::result::Result<Form<ContactForm>, FormRejection>,
) -> Response {
    let endpoint = app.normalizer().normalize(uri.path(), "").into_owned();

    let outcome = match form {
        Ok(Form(form)) => match form.validate() {
            Ok(msg) => {
                let category = msg.category();
                app.mailer().send(&msg).await.map(|_| category)
            }
            Err(e) => Err(e),
        },
        Err(rejection) => Err(SiteError::FormParse(rejection.body_text())),
    };

    match outcome {
        Ok(category) => {
            app.metrics().record_email_sent(category);
            (StatusCode::OK, Html(SUCCESS_HTML)).into_response()
        }
        Err(e) => {
            app.metrics().record_error(e.error_kind(), &endpoint);
            tracing::warn!(
                %endpoint,
                kind = e.error_kind(),
                error = %e,
                "contact submission failed"
            );

            let body = match e {
                SiteError::FormParse(_) => PARSE_ERROR_HTML,
                SiteError::FormValidation(_) => VALIDATION_ERROR_HTML,
                _ => SEND_ERROR_HTML,
            };
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Html(body)).into_response()
        }
    }
}
