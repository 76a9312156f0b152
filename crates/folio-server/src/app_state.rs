//! Shared application state for the folio server.
//!
//! Built once at boot from the loaded config and handed to every handler
//! and middleware by reference; nothing here is a process global.

use std::sync::Arc;

use folio_core::endpoint::EndpointNormalizer;
use folio_core::error::Result;

use crate::config::ServerConfig;
use crate::contact::{LogMailer, Mailer};
use crate::obs::SiteMetrics;
use crate::render::{Dispatcher, TemplateStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<SiteMetrics>,
    dispatcher: Dispatcher,
}

struct AppStateInner {
    normalizer: EndpointNormalizer,
    mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Build application state: load templates and create metrics.
    /// Returns Result so main can abort boot on any failure.
    pub fn new(cfg: &ServerConfig) -> Result<Self> {
        let store = TemplateStore::load(
            &cfg.templates.layout_path(),
            &cfg.templates.content_path(),
        )?;
        let metrics = SiteMetrics::new()?;
        Ok(Self::from_parts(
            Arc::new(store),
            Arc::new(metrics),
            EndpointNormalizer::new(cfg.metrics.unknown_paths.into()),
            Arc::new(LogMailer),
        ))
    }

    pub fn from_parts(
        store: Arc<TemplateStore>,
        metrics: Arc<SiteMetrics>,
        normalizer: EndpointNormalizer,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner { normalizer, mailer }),
            metrics,
            dispatcher: Dispatcher::new(store),
        }
    }

    pub fn metrics(&self) -> Arc<SiteMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn normalizer(&self) -> EndpointNormalizer {
        self.inner.normalizer
    }

    pub fn mailer(&self) -> Arc<dyn Mailer> {
        Arc::clone(&self.inner.mailer)
    }
}
