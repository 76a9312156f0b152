//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use folio_core::error::{Result, SiteError};

pub use schema::{
    AppSection, MetricsSection, ServerConfig, ServerSection, TemplatesSection, UnknownPaths,
};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG";

/// Config file used when `FOLIO_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "folio.yaml";

/// Environment variable overriding `app.environment`.
pub const ENVIRONMENT_ENV: &str = "ENVIRONMENT";

/// Load `path` and apply overrides from the process environment.
pub fn load_with_env(path: &str) -> Result<ServerConfig> {
    let mut cfg = load_from_file(path)?;
    cfg.apply_env_overrides(std::env::var(ENVIRONMENT_ENV).ok());
    Ok(cfg)
}

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| SiteError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| SiteError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
