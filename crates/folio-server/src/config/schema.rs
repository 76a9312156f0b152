use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use folio_core::endpoint::UnknownPathPolicy;
use folio_core::error::{Result, SiteError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub templates: TemplatesSection,

    #[serde(default)]
    pub metrics: MetricsSection,

    #[serde(default)]
    pub app: AppSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SiteError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.templates.validate()?;
        self.metrics.validate()?;

        Ok(())
    }

    /// A non-empty `environment` replaces `app.environment`.
    pub fn apply_env_overrides(&mut self, environment: Option<String>) {
        if let Some(env) = environment.filter(|e| !e.trim().is_empty()) {
            self.app.environment = env;
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            SiteError::Config(format!("server.listen must be a valid socket address: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesSection {
    #[serde(default = "default_templates_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_layout")]
    pub layout: String,

    /// Relative to `dir`.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,
}

impl Default for TemplatesSection {
    fn default() -> Self {
        Self {
            dir: default_templates_dir(),
            layout: default_layout(),
            content_dir: default_content_dir(),
        }
    }
}

impl TemplatesSection {
    pub fn validate(&self) -> Result<()> {
        if self.layout.trim().is_empty() {
            return Err(SiteError::Config("templates.layout must not be empty".into()));
        }
        if self.content_dir.trim().is_empty() {
            return Err(SiteError::Config("templates.content_dir must not be empty".into()));
        }
        Ok(())
    }

    pub fn layout_path(&self) -> PathBuf {
        self.dir.join(&self.layout)
    }

    pub fn content_path(&self) -> PathBuf {
        self.dir.join(&self.content_dir)
    }
}

/// Treatment of request paths outside the endpoint vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPaths {
    #[default]
    Collapse,
    Echo,
}

impl From<UnknownPaths> for UnknownPathPolicy {
    fn from(v: UnknownPaths) -> Self {
        match v {
            UnknownPaths::Collapse => UnknownPathPolicy::Collapse,
            UnknownPaths::Echo => UnknownPathPolicy::Echo,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_uptime_interval_secs")]
    pub uptime_interval_secs: u64,

    #[serde(default)]
    pub unknown_paths: UnknownPaths,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            uptime_interval_secs: default_uptime_interval_secs(),
            unknown_paths: UnknownPaths::default(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=3600).contains(&self.uptime_interval_secs) {
            return Err(SiteError::Config(
                "metrics.uptime_interval_secs must be between 1 and 3600".into(),
            ));
        }
        Ok(())
    }

    pub fn uptime_interval(&self) -> Duration {
        Duration::from_secs(self.uptime_interval_secs)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            version: default_version(),
            environment: default_environment(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}
fn default_layout() -> String {
    "layout.html".into()
}
fn default_content_dir() -> String {
    "content".into()
}
fn default_uptime_interval_secs() -> u64 {
    15
}
fn default_version() -> String {
    env!("CARGO_PKG_VERSION").into()
}
fn default_environment() -> String {
    "production".into()
}
