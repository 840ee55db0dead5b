use std::fs;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::project_io::load_project;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

const TEST_PROJECT_TOML: &str = r##"[project]
name = "Test"

[board]
column_width = 20
undo_timeout_ms = 2000

[[dashboards]]
id = "orders"
name = "Orders"
file = "data/orders.json"

[[dashboards.columns]]
id = 1
name = "Draft"
color = "secondary"

[[dashboards.columns]]
id = 2
name = "Sent"
color = "info"

[[dashboards.columns]]
id = 3
name = "Paid"
color = "success"

[[dashboards]]
id = "fuel"
name = "Fuel"
file = "data/fuel.json"

[[dashboards.columns]]
id = "pending"
name = "Pending"

[[dashboards.columns]]
id = "approved"
name = "Approved"
"##;

const TEST_ORDERS_JSON: &str = r#"[
  {"id": 1, "title": "First", "status": 1, "supplier_name": "Cemex"},
  {"id": 2, "title": "Second", "status": 1}
]"#;

const TEST_FUEL_JSON: &str = r#"[
  {"id": 10, "title": "Truck 4", "status": "pending"}
]"#;

/// A project on disk with two dashboards, and an App opened on the first.
///
/// `orders`: Draft holds #1 and #2; Sent and Paid are empty. Grace period 2s.
pub fn temp_app() -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    let board_dir = tmp.path().join("boards");
    fs::create_dir_all(board_dir.join("data")).unwrap();
    fs::write(board_dir.join("project.toml"), TEST_PROJECT_TOML).unwrap();
    fs::write(board_dir.join("data/orders.json"), TEST_ORDERS_JSON).unwrap();
    fs::write(board_dir.join("data/fuel.json"), TEST_FUEL_JSON).unwrap();

    let project = load_project(tmp.path()).unwrap();
    let app = App::new(project);
    (tmp, app)
}
