//! Shared error type across folio crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed form.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SiteError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),
    #[error("template execution failed ({template}): {reason}")]
    TemplateExecution { template: String, reason: String },
    #[error("layout execution failed: {0}")]
    LayoutExecution(String),
    #[error("template load failed: {0}")]
    TemplateLoad(String),
    #[error("instrument init failed: {0}")]
    InstrumentInit(String),
    #[error("form parse failed: {0}")]
    FormParse(String),
    #[error("form validation failed: {0}")]
    FormValidation(String),
    #[error("email send failed: {0}")]
    EmailSend(String),
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl SiteError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            SiteError::FormParse(_) | SiteError::FormValidation(_) | SiteError::Config(_) => {
                ClientCode::BadRequest
            }
            SiteError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            _ => ClientCode::Internal,
        }
    }

    /// Value of the `type` attribute recorded on `errors_total`.
    pub fn error_kind(&self) -> &'static str {
        match self {
            SiteError::TemplateNotFound(_) => "template_not_found",
            SiteError::TemplateExecution { .. } => "template_execution",
            SiteError::LayoutExecution(_) => "layout_execution",
            SiteError::TemplateLoad(_) => "template_load",
            SiteError::InstrumentInit(_) => "instrument_init",
            SiteError::FormParse(_) => "form_parse_error",
            SiteError::FormValidation(_) => "form_validation_error",
            SiteError::EmailSend(_) => "email_send_error",
            SiteError::Config(_) | SiteError::UnsupportedVersion => "config",
            SiteError::Internal(_) => "internal",
        }
    }

    /// HTTP status surfaced to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            SiteError::FormParse(_) | SiteError::FormValidation(_) => 400,
            _ => 500,
        }
    }
}
