use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;
use tracing::{debug, info};

use crate::domain::entities::config::EngineConfig;

const SETTINGS_FILE: &str = "settings.toml";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "user-directory")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_settings_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(SETTINGS_FILE))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

/// A missing file yields the defaults; a malformed one is an error.
pub fn load_settings(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(EngineConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings: {}", path.display()))?;
    let config = parse_settings(&text)
        .with_context(|| format!("invalid settings: {}", path.display()))?;
    info!(path = %path.display(), "settings loaded");
    Ok(config)
}

pub fn parse_settings(text: &str) -> Result<EngineConfig> {
    let config: EngineConfig = toml::from_str(text).context("failed to parse settings toml")?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &EngineConfig) -> Result<()> {
    if config.page_size == 0 {
        bail!("page_size must be at least 1");
    }
    if config.max_records == 0 {
        bail!("max_records must be at least 1");
    }
    if config.page_size > config.max_records {
        bail!(
            "page_size ({}) must not exceed max_records ({})",
            config.page_size,
            config.max_records
        );
    }
    if config.base_url.trim().is_empty() {
        bail!("base_url is required");
    }
    Ok(())
}
