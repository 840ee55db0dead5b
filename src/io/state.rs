use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Which dashboard is showing
    #[serde(default)]
    pub active_dashboard: String,
    /// Per-dashboard state
    #[serde(default)]
    pub dashboards: HashMap<String, DashboardUiState>,
}

/// Per-dashboard UI state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DashboardUiState {
    /// Focused column index
    #[serde(default)]
    pub column: usize,
    /// Focused card index within the column
    #[serde(default)]
    pub row: usize,
}

/// Read .state.json from the boards directory
pub fn read_ui_state(board_dir: &Path) -> Option<UiState> {
    let path = board_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the boards directory
pub fn write_ui_state(board_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = board_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
