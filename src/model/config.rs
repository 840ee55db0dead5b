use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use super::id::Id;

/// Default column width in terminal cells
pub const DEFAULT_COLUMN_WIDTH: u16 = 28;
/// Default grace period before a move is committed
pub const DEFAULT_UNDO_TIMEOUT_MS: u64 = 8000;

/// Configuration from boards/project.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project: ProjectInfo,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub dashboards: Vec<DashboardConfig>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
}

/// Board behaviour. Every key is optional; unset keys fall back to the defaults
/// through the accessor methods, and a zero width or timeout counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_width: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undo_timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_undo_toast: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_reorder: Option<bool>,
}

impl BoardConfig {
    /// Column width in cells (default: 28)
    pub fn column_width(&self) -> u16 {
        match self.column_width {
            Some(w) if w > 0 => w,
            _ => DEFAULT_COLUMN_WIDTH,
        }
    }

    /// Grace period in milliseconds (default: 8000)
    pub fn undo_timeout_ms(&self) -> u64 {
        match self.undo_timeout_ms {
            Some(ms) if ms > 0 => ms,
            _ => DEFAULT_UNDO_TIMEOUT_MS,
        }
    }

    pub fn undo_timeout(&self) -> Duration {
        Duration::from_millis(self.undo_timeout_ms())
    }

    /// Show the undo toast and delay commits (default: true)
    pub fn show_undo_toast(&self) -> bool {
        self.show_undo_toast != Some(false)
    }

    /// Allow reordering inside a column (default: false)
    pub fn allow_reorder(&self) -> bool {
        self.allow_reorder == Some(true)
    }

    /// Layer `overrides` on top of `self`: keys set in `overrides` win.
    pub fn merged(&self, overrides: &BoardConfig) -> BoardConfig {
        BoardConfig {
            column_width: overrides.column_width.or(self.column_width),
            undo_timeout_ms: overrides.undo_timeout_ms.or(self.undo_timeout_ms),
            show_undo_toast: overrides.show_undo_toast.or(self.show_undo_toast),
            allow_reorder: overrides.allow_reorder.or(self.allow_reorder),
        }
    }
}

/// One dashboard: a records file shown as a board with one column per status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub id: String,
    pub name: String,
    /// JSON records file, relative to boards/
    pub file: String,
    /// Per-dashboard overrides of [board]
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Palette overrides, e.g. `info = "#44DDFF"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl ProjectConfig {
    pub fn dashboard(&self, id: &str) -> Option<&DashboardConfig> {
        self.dashboards.iter().find(|d| d.id == id)
    }

    /// Effective board config for a dashboard
    pub fn board_config_for(&self, dashboard: &DashboardConfig) -> BoardConfig {
        self.board.merged(&dashboard.board)
    }
}
