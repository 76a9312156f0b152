use std::sync::Arc;

use axum::http::HeaderMap;
use bytes::Bytes;
use serde::Serialize;

use folio_core::error::Result;

use super::TemplateStore;

/// Negotiation header sent by the client-side fragment loader.
pub const HX_REQUEST: &str = "HX-Request";

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Response shape selected by the negotiation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Content fragment only.
    Fragment,
    /// Fragment composed into the layout.
    FullPage,
}

impl RenderMode {
    pub fn from_flag(fragment: bool) -> Self {
        if fragment {
            RenderMode::Fragment
        } else {
            RenderMode::FullPage
        }
    }

    /// Value of the `render_type` attribute.
    pub fn as_label(self) -> &'static str {
        match self {
            RenderMode::Fragment => "htmx_partial",
            RenderMode::FullPage => "full_page",
        }
    }
}

/// `true` only for an exact `HX-Request: true`.
pub fn is_fragment_request(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST)
        .is_some_and(|v| v.as_bytes() == b"true")
}

#[derive(Debug, Clone)]
pub struct Rendered {
    pub body: Bytes,
    pub content_type: &'static str,
}

/// Produces fragment or full-page output for a page id.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<TemplateStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<TemplateStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Both modes share the same fragment render, so the fragment is always
    /// embedded unchanged in the full page.
    pub fn dispatch<D: Serialize>(
        &self,
        page: &str,
        mode: RenderMode,
        data: &D,
    ) -> Result<Rendered> {
        let fragment = self.store.render(page, data)?;

        let body = match mode {
            RenderMode::Fragment => fragment,
            RenderMode::FullPage => self.store.render_layout(fragment)?,
        };

        Ok(Rendered {
            body: Bytes::from(body),
            content_type: HTML_CONTENT_TYPE,
        })
    }
}
