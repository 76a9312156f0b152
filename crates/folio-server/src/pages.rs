//! Page handlers: content-negotiated rendering of the site's pages.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

use folio_core::error::SiteError;

use crate::app_state::AppState;
use crate::render::{is_fragment_request, RenderMode, HX_REQUEST};

pub const HOME: &str = "home";
pub const WORK_HISTORY: &str = "work-history";
pub const CONTACT_ME: &str = "contact-me";

pub async fn home(State(app): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    render_page(&app, &uri, &headers, HOME, &empty_data())
}

pub async fn work_history(State(app): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    render_page(&app, &uri, &headers, WORK_HISTORY, &empty_data())
}

pub async fn contact_me(State(app): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    render_page(&app, &uri, &headers, CONTACT_ME, &empty_data())
}

/// Render `page` in the shape selected by the `HX-Request` header.
///
/// Failures are counted in `errors_total` under their own kind and answered
/// with a generic 500.
pub fn render_page(
    app: &AppState,
    uri: &Uri,
    headers: &HeaderMap,
    page: &str,
    data: &Value,
) -> Response {
    let mode = RenderMode::from_flag(is_fragment_request(headers));

    match app.dispatcher().dispatch(page, mode, data) {
        Ok(rendered) => {
            app.metrics().record_render(page, mode);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static(rendered.content_type)),
                    (header::VARY, HeaderValue::from_static(HX_REQUEST)),
                ],
                rendered.body,
            )
                .into_response()
        }
        Err(e) => {
            if !matches!(e, SiteError::TemplateNotFound(_)) {
                app.metrics().record_render(page, mode);
            }
            render_failure(app, uri, page, &e)
        }
    }
}

fn render_failure(app: &AppState, uri: &Uri, page: &str, e: &SiteError) -> Response {
    let endpoint = app.normalizer().normalize(uri.path(), "");
    app.metrics().record_error(e.error_kind(), &endpoint);
    tracing::error!(%page, %endpoint, kind = e.error_kind(), error = %e, "render failed");

    let msg = match e {
        SiteError::TemplateNotFound(_) => "Template not found",
        SiteError::LayoutExecution(_) => "Error executing layout template",
        _ => "Error executing template",
    };
    let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, msg).into_response()
}

fn empty_data() -> Value {
    Value::Object(Map::new())
}
