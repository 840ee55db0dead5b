use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::project_io::{self, BOARD_DIR};
use crate::model::ProjectConfig;

const PROJECT_TOML_TEMPLATE: &str = r##"[project]
name = "{name}"

# Board behaviour for every dashboard. Override per dashboard with a
# [dashboards.board] table, or use: sb config set <key> <value>
[board]
column_width = 28        # cells
undo_timeout_ms = 8000   # grace period before a move is saved
show_undo_toast = true   # false saves moves immediately
allow_reorder = false    # reorder cards inside a column

# --- Dashboards ---
# Each dashboard reads a JSON array of records ({"id", "title", "status", ...})
# from `file`, relative to boards/. Columns are listed in display order; `id` is
# the status code, `color` a palette name or "#RRGGBB".

[[dashboards]]
id = "invoices"
name = "Invoices"
file = "data/invoices.json"

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

[[dashboards.columns]]
id = 4
name = "Cancelled"
color = "danger"

[[dashboards]]
id = "projects"
name = "Projects"
file = "data/projects.json"

[[dashboards.columns]]
id = 1
name = "Planning"
color = "secondary"

[[dashboards.columns]]
id = 2
name = "In progress"
color = "primary"

[[dashboards.columns]]
id = 3
name = "On hold"
color = "warning"

[[dashboards.columns]]
id = 4
name = "Completed"
color = "success"

[[dashboards]]
id = "purchase-orders"
name = "Purchase Orders"
file = "data/purchase_orders.json"

[[dashboards.columns]]
id = 1
name = "Draft"
color = "secondary"

[[dashboards.columns]]
id = 2
name = "Pending"
color = "warning"

[[dashboards.columns]]
id = 3
name = "Approved"
color = "info"

[[dashboards.columns]]
id = 4
name = "Partially received"
color = "primary"

[[dashboards.columns]]
id = 5
name = "Received"
color = "success"

[[dashboards.columns]]
id = 6
name = "Cancelled"
color = "danger"

[[dashboards]]
id = "fuel"
name = "Fuel Requisitions"
file = "data/fuel_requisitions.json"

[dashboards.board]
undo_timeout_ms = 5000

[[dashboards.columns]]
id = "pending"
name = "Pending"
color = "warning"

[[dashboards.columns]]
id = "approved"
name = "Approved"
color = "info"

[[dashboards.columns]]
id = "delivered"
name = "Delivered"
color = "success"

[[dashboards.columns]]
id = "cancelled"
name = "Cancelled"
color = "danger"

[[dashboards]]
id = "pre-inventory"
name = "Pre-inventory"
file = "data/pre_inventory.json"

[[dashboards.columns]]
id = 1
name = "Open"
color = "secondary"

[[dashboards.columns]]
id = 2
name = "Counting"
color = "primary"

[[dashboards.columns]]
id = 3
name = "Review"
color = "warning"

[[dashboards.columns]]
id = 4
name = "Closed"
color = "success"

# --- UI Customization ---
# [ui.colors]
# primary = "#4488FF"
# secondary = "#8A8FA3"
# success = "#44FF88"
# info = "#44DDFF"
# warning = "#FFD700"
# danger = "#FF4444"
"##;

/// Infer a project name from a directory name: replace hyphens with spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + chars.as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_project_toml(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    PROJECT_TOML_TEMPLATE.replace("{name}", &escaped)
}

pub fn cmd_init(args: InitArgs, project_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = match project_dir {
        Some(dir) => std::path::PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let board_dir = cwd.join(BOARD_DIR);
    let config_path = board_dir.join("project.toml");

    if config_path.exists() && !args.force {
        return Err("statusboard project already exists in ./boards/ (use --force to overwrite)".into());
    }

    if let Some(parent) = cwd.parent()
        && let Ok(parent_root) = project_io::discover_project(parent)
    {
        eprintln!(
            "Note: parent project found at {}/",
            parent_root.join(BOARD_DIR).display()
        );
    }

    let name = args.name.unwrap_or_else(|| {
        cwd.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .unwrap_or_else(|| "Untitled".to_string())
    });

    let content = render_project_toml(&name);
    let config: ProjectConfig = toml::from_str(&content)?;

    fs::create_dir_all(board_dir.join("data"))?;
    fs::write(&config_path, &content)?;
    for dashboard in &config.dashboards {
        let path = board_dir.join(&dashboard.file);
        if !path.exists() {
            fs::write(&path, "[]\n")?;
        }
    }

    println!("Initialized statusboard project: {}", name);
    for dashboard in &config.dashboards {
        println!("  dashboard: {} ({})", dashboard.name, dashboard.id);
    }
    Ok(())
}
