//! Template store: one layout plus one named fragment per content file.
//!
//! Loaded once at boot and read-only afterwards. All I/O happens in
//! [`TemplateStore::load`]; rendering is a pure in-memory operation.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use minijinja::{context, AutoEscape, Environment, UndefinedBehavior, Value};
use serde::Serialize;

use folio_core::error::{Result, SiteError};

const LAYOUT: &str = "layout";
const CONTENT_PREFIX: &str = "content/";

pub struct TemplateStore {
    env: Environment<'static>,
    pages: BTreeSet<String>,
}

impl TemplateStore {
    /// Parse the layout at `layout_path` and every file in `content_dir`.
    ///
    /// Any unreadable or unparsable file fails the whole load.
    pub fn load(layout_path: &Path, content_dir: &Path) -> Result<Self> {
        let layout = fs::read_to_string(layout_path).map_err(|e| {
            SiteError::TemplateLoad(format!("read layout {} failed: {e}", layout_path.display()))
        })?;

        let mut sources = Vec::new();
        let entries = fs::read_dir(content_dir).map_err(|e| {
            SiteError::TemplateLoad(format!(
                "read content dir {} failed: {e}",
                content_dir.display()
            ))
        })?;
        for entry in entries {
            let entry =
                entry.map_err(|e| SiteError::TemplateLoad(format!("read entry failed: {e}")))?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let Some(page) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!(path=%path.display(), "skipping content file with non-utf8 name");
                continue;
            };
            let source = fs::read_to_string(&path).map_err(|e| {
                SiteError::TemplateLoad(format!("read content {} failed: {e}", path.display()))
            })?;
            sources.push((page.to_string(), source));
        }

        let store = Self::from_sources(layout, sources)?;
        tracing::info!(pages = store.pages.len(), "templates loaded");
        Ok(store)
    }

    /// Build a store from in-memory sources (layout, (page, fragment) pairs).
    pub fn from_sources<I>(layout: String, pages: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        env.add_template_owned(LAYOUT, layout)
            .map_err(|e| SiteError::TemplateLoad(format!("parse layout failed: {e}")))?;

        let mut names = BTreeSet::new();
        for (page, source) in pages {
            if names.contains(&page) {
                return Err(SiteError::TemplateLoad(format!("duplicate page id: {page}")));
            }
            env.add_template_owned(content_name(&page), source)
                .map_err(|e| SiteError::TemplateLoad(format!("parse content {page} failed: {e}")))?;
            names.insert(page);
        }

        Ok(Self { env, pages: names })
    }

    pub fn contains(&self, page: &str) -> bool {
        self.pages.contains(page)
    }

    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(String::as_str)
    }

    /// Render the fragment for `page`.
    pub fn render<D: Serialize>(&self, page: &str, data: &D) -> Result<String> {
        if !self.contains(page) {
            return Err(SiteError::TemplateNotFound(page.to_string()));
        }
        let exec_err = |e: minijinja::Error| SiteError::TemplateExecution {
            template: page.to_string(),
            reason: e.to_string(),
        };
        self.env
            .get_template(&content_name(page))
            .map_err(exec_err)?
            .render(data)
            .map_err(exec_err)
    }

    /// Execute the layout with `content` injected as pre-escaped markup.
    pub fn render_layout(&self, content: String) -> Result<String> {
        let layout_err = |e: minijinja::Error| SiteError::LayoutExecution(e.to_string());
        self.env
            .get_template(LAYOUT)
            .map_err(layout_err)?
            .render(context! { Content => Value::from_safe_string(content) })
            .map_err(layout_err)
    }
}

fn content_name(page: &str) -> String {
    format!("{CONTENT_PREFIX}{page}")
}
