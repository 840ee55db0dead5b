use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::ProjectConfig;
use crate::model::project::Project;

/// Directory under the project root that holds everything statusboard owns
pub const BOARD_DIR: &str = "boards";

/// Error type for project I/O operations
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("not a statusboard project: no boards/project.toml found")]
    NotAProject,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse project.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not edit project.toml: {0}")]
    ConfigEditError(#[from] toml_edit::TomlError),
    #[error("duplicate dashboard id: {0}")]
    DuplicateDashboard(String),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the project by walking up from the given directory, looking for a
/// `boards/` subdirectory with a project.toml in it.
pub fn discover_project(start: &Path) -> Result<PathBuf, ProjectError> {
    let mut current = start.to_path_buf();
    loop {
        let board_dir = current.join(BOARD_DIR);
        if board_dir.is_dir() && board_dir.join("project.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(ProjectError::NotAProject);
        }
    }
}

/// Parse project.toml from the given root directory.
///
/// Records files are not read here; dashboards load them on demand.
pub fn load_project(root: &Path) -> Result<Project, ProjectError> {
    let board_dir = root.join(BOARD_DIR);
    let config_path = board_dir.join("project.toml");
    if !config_path.exists() {
        return Err(ProjectError::NotAProject);
    }

    let config_text = fs::read_to_string(&config_path).map_err(|e| ProjectError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: ProjectConfig = toml::from_str(&config_text)?;

    let mut seen = std::collections::HashSet::new();
    for dashboard in &config.dashboards {
        if !seen.insert(dashboard.id.as_str()) {
            return Err(ProjectError::DuplicateDashboard(dashboard.id.clone()));
        }
    }

    Ok(Project {
        root: root.to_path_buf(),
        board_dir,
        config,
    })
}
