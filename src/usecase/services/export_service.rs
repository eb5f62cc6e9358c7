use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::info;

use crate::infra::export::csv::export_users_to_csv;
use crate::usecase::services::browse_service::BrowseSession;

pub struct ExportService {
    default_file_name: String,
}

impl ExportService {
    pub fn new() -> Self {
        Self {
            default_file_name: default_export_file_name(),
        }
    }

    pub fn default_file_name(&self) -> &str {
        &self.default_file_name
    }

    pub fn export_selection(&self, session: &BrowseSession, path: &Path) -> Result<usize> {
        let users = session.selected_records();
        if users.is_empty() {
            bail!("no users selected");
        }
        let written = export_users_to_csv(path, &users)?;
        info!(written, path = %path.display(), "selection exported");
        Ok(written)
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn default_export_file_name() -> String {
    format!("users-{}.csv", chrono::Local::now().format("%m%d"))
}

pub fn with_csv_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("csv")
    }
}
