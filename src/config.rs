use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::warn;

use crate::table::model::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};
use crate::table::TableOptions;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DB_FILE_NAME: &str = "sitedesk.sqlite";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub search_debounce_ms: u64,
    pub database_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            search_debounce_ms: 250,
            database_path: None,
        }
    }
}

impl AppConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse config")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    /// Loads the user config, falling back to defaults when it is unusable.
    pub fn load() -> Self {
        match project_dirs().and_then(|dirs| Self::load_from(&dirs.config_dir().join(CONFIG_FILE_NAME))) {
            Ok(config) => config,
            Err(err) => {
                warn!("using default config: {err:#}");
                Self::default()
            }
        }
    }

    pub fn table_options(&self) -> TableOptions {
        let mut page_size_options = self.page_size_options.clone();
        page_size_options.retain(|size| *size > 0);
        if page_size_options.is_empty() {
            page_size_options = DEFAULT_PAGE_SIZE_OPTIONS.to_vec();
        }
        TableOptions {
            initial_page_size: self.page_size.max(1),
            page_size_options,
            search_debounce: Duration::from_millis(self.search_debounce_ms),
            ..TableOptions::default()
        }
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => default_db_path(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "sitedesk", "sitedesk")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_db_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join(DB_FILE_NAME))
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
