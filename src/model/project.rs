use std::path::PathBuf;

use super::config::{DashboardConfig, ProjectConfig};

/// A discovered statusboard project
#[derive(Debug, Clone)]
pub struct Project {
    /// Root directory of the project (parent of `boards/`)
    pub root: PathBuf,
    /// Path to the `boards/` directory
    pub board_dir: PathBuf,
    /// Parsed project.toml
    pub config: ProjectConfig,
}

impl Project {
    /// Absolute path of a dashboard's records file
    pub fn records_path(&self, dashboard: &DashboardConfig) -> PathBuf {
        self.board_dir.join(&dashboard.file)
    }
}
