use serde::Serialize;

use crate::board::MoveEvent;
use crate::model::{BoardConfig, Column, DashboardConfig, Id, Record};
use crate::ops::columns::BuiltColumns;
use crate::util::unicode::{display_width, truncate_to_width};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct DashboardJson {
    pub id: String,
    pub name: String,
    pub file: String,
    pub total: usize,
    pub columns: Vec<ColumnCountJson>,
}

#[derive(Serialize)]
pub struct ColumnCountJson {
    pub id: Id,
    pub name: String,
    pub count: usize,
}

#[derive(Serialize)]
pub struct BoardJson<'a> {
    pub dashboard: &'a str,
    pub columns: &'a [Column<Record>],
    #[serde(skip_serializing_if = "<[Record]>::is_empty")]
    pub orphans: &'a [Record],
}

#[derive(Serialize)]
pub struct EffectiveConfigJson {
    pub column_width: u16,
    pub undo_timeout_ms: u64,
    pub show_undo_toast: bool,
    pub allow_reorder: bool,
}

pub fn dashboard_to_json(dashboard: &DashboardConfig, built: &BuiltColumns) -> DashboardJson {
    DashboardJson {
        id: dashboard.id.clone(),
        name: dashboard.name.clone(),
        file: dashboard.file.clone(),
        total: built.columns.iter().map(|c| c.items.len()).sum::<usize>() + built.orphans.len(),
        columns: built
            .columns
            .iter()
            .map(|c| ColumnCountJson {
                id: c.id.clone(),
                name: c.name.clone(),
                count: c.items.len(),
            })
            .collect(),
    }
}

pub fn effective_config_json(config: &BoardConfig) -> EffectiveConfigJson {
    EffectiveConfigJson {
        column_width: config.column_width(),
        undo_timeout_ms: config.undo_timeout_ms(),
        show_undo_toast: config.show_undo_toast(),
        allow_reorder: config.allow_reorder(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `po  Purchase Orders  Draft 2 · Approved 0 · Received 5`
pub fn format_dashboard_line(dashboard: &DashboardConfig, built: &BuiltColumns, id_width: usize) -> String {
    let counts: Vec<String> = built
        .columns
        .iter()
        .map(|c| format!("{} {}", c.name, c.items.len()))
        .collect();
    let mut line = format!(
        "{:<width$}  {}  {}",
        dashboard.id,
        dashboard.name,
        counts.join(" \u{b7} "),
        width = id_width
    );
    if !built.orphans.is_empty() {
        line.push_str(&format!("  ({} without a column)", built.orphans.len()));
    }
    line
}

/// One record as a listing line: `  #7  PO-0007  Acme Supplies`
pub fn format_record_line(record: &Record) -> String {
    let mut line = format!("  #{}  {}", record.id, record.title);
    if let Some(sub) = record.subtitle() {
        line.push_str("  ");
        line.push_str(&truncate_to_width(sub, 40));
    }
    line
}

pub fn format_board_listing(dashboard: &DashboardConfig, built: &BuiltColumns) -> Vec<String> {
    let mut lines = vec![format!("== {} ==", dashboard.name)];
    for column in &built.columns {
        lines.push(String::new());
        lines.push(format!("{} ({})", column.name, column.items.len()));
        lines.extend(column.items.iter().map(format_record_line));
    }
    if !built.orphans.is_empty() {
        lines.push(String::new());
        lines.push(format!("No column ({})", built.orphans.len()));
        lines.extend(
            built
                .orphans
                .iter()
                .map(|r| format!("{}  [status {}]", format_record_line(r), r.status)),
        );
    }
    lines
}

/// Key/value detail of a record, extra fields in file order
pub fn format_record_detail(record: &Record, status_name: Option<&str>) -> Vec<String> {
    let status = match status_name {
        Some(name) => format!("{} ({})", name, record.status),
        None => record.status.to_string(),
    };
    let mut rows: Vec<(String, String)> = vec![
        ("id".to_string(), record.id.to_string()),
        ("title".to_string(), record.title.clone()),
        ("status".to_string(), status),
    ];
    for (key, value) in &record.extra {
        rows.push((key.clone(), json_scalar(value)));
    }
    let key_width = rows.iter().map(|(k, _)| display_width(k)).max().unwrap_or(0);
    rows.into_iter()
        .map(|(k, v)| format!("{:<width$}  {}", k, v, width = key_width))
        .collect()
}

/// A JSON value as plain text: strings without quotes, everything else compact
pub fn json_scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

pub fn format_move(event: &MoveEvent<Record>, to_name: &str) -> String {
    format!(
        "#{} {} -> {} (position {})",
        event.item.id, event.item.title, to_name, event.to_index
    )
}

pub fn format_board_config(config: &BoardConfig) -> Vec<String> {
    vec![
        format!("column_width     {}", config.column_width()),
        format!("undo_timeout_ms  {}", config.undo_timeout_ms()),
        format!("show_undo_toast  {}", config.show_undo_toast()),
        format!("allow_reorder    {}", config.allow_reorder()),
    ]
}
