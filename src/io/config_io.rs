use std::fs;
use std::path::Path;

use crate::io::project_io::ProjectError;
use crate::model::config::ProjectConfig;

/// Keys accepted under `[board]` and `[dashboards.board]`
pub const BOARD_KEYS: &[&str] = &[
    "column_width",
    "undo_timeout_ms",
    "show_undo_toast",
    "allow_reorder",
];

/// Error type for `sb config set`
#[derive(Debug, thiserror::Error)]
pub enum ConfigEditError {
    #[error("unknown board key \"{0}\" (expected one of: column_width, undo_timeout_ms, show_undo_toast, allow_reorder)")]
    UnknownKey(String),
    #[error("invalid value \"{value}\" for {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
    #[error("no dashboard with id \"{0}\"")]
    UnknownDashboard(String),
    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Read the project config, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe editing.
pub fn read_config(board_dir: &Path) -> Result<(ProjectConfig, toml_edit::DocumentMut), ProjectError> {
    let config_path = board_dir.join("project.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| ProjectError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let doc: toml_edit::DocumentMut = config_text.parse()?;
    let config: ProjectConfig = toml::from_str(&config_text)?;
    Ok((config, doc))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(board_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ProjectError> {
    let config_path = board_dir.join("project.toml");
    fs::write(&config_path, doc.to_string()).map_err(|e| ProjectError::ReadError {
        path: config_path,
        source: e,
    })?;
    Ok(())
}

/// Parse a board setting from its command-line form
pub fn parse_board_value(key: &str, raw: &str) -> Result<toml_edit::Value, ConfigEditError> {
    let invalid = |expected| ConfigEditError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        expected,
    };
    match key {
        "column_width" => raw
            .parse::<u16>()
            .map(|v| toml_edit::Value::from(i64::from(v)))
            .map_err(|_| invalid("a width in cells (0-65535)")),
        "undo_timeout_ms" => raw
            .parse::<u32>()
            .map(|v| toml_edit::Value::from(i64::from(v)))
            .map_err(|_| invalid("milliseconds")),
        "show_undo_toast" | "allow_reorder" => raw
            .parse::<bool>()
            .map(toml_edit::Value::from)
            .map_err(|_| invalid("true or false")),
        _ => Err(ConfigEditError::UnknownKey(key.to_string())),
    }
}

/// Set a board key in `[board]`, or in a dashboard's `[dashboards.board]`
/// table when `dashboard` is given. Comments and key order elsewhere are kept.
pub fn set_board_value(
    doc: &mut toml_edit::DocumentMut,
    dashboard: Option<&str>,
    key: &str,
    raw: &str,
) -> Result<(), ConfigEditError> {
    let value = parse_board_value(key, raw)?;
    match dashboard {
        None => {
            if !doc.contains_key("board") {
                doc["board"] = toml_edit::Item::Table(toml_edit::Table::new());
            }
            doc["board"][key] = toml_edit::Item::Value(value);
        }
        Some(id) => {
            let table = doc
                .get_mut("dashboards")
                .and_then(|d| d.as_array_of_tables_mut())
                .and_then(|tables| {
                    tables
                        .iter_mut()
                        .find(|t| t.get("id").and_then(|v| v.as_str()) == Some(id))
                })
                .ok_or_else(|| ConfigEditError::UnknownDashboard(id.to_string()))?;
            if !table.contains_key("board") {
                table["board"] = toml_edit::Item::Table(toml_edit::Table::new());
            }
            table["board"][key] = toml_edit::Item::Value(value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_config() -> &'static str {
        r#"[project]
name = "test"

# Applies to every dashboard
[board]
undo_timeout_ms = 8000

[[dashboards]]
id = "po"
name = "Purchase Orders"
file = "data/po.json"

[[dashboards.columns]]
id = 1
name = "Draft"
"#
    }

    #[test]
    fn test_round_trip_config() {
        let tmp = TempDir::new().unwrap();
        let board_dir = tmp.path().join("boards");
        fs::create_dir_all(&board_dir).unwrap();
        let config_path = board_dir.join("project.toml");

        let original = sample_config();
        fs::write(&config_path, original).unwrap();

        let (config, doc) = read_config(&board_dir).unwrap();
        assert_eq!(config.board.undo_timeout_ms, Some(8000));
        write_config(&board_dir, &doc).unwrap();

        let written = fs::read_to_string(&config_path).unwrap();
        assert_eq!(written, original);
    }

    #[test]
    fn test_set_project_wide_key_keeps_comments() {
        let mut doc: toml_edit::DocumentMut = sample_config().parse().unwrap();
        set_board_value(&mut doc, None, "undo_timeout_ms", "3000").unwrap();
        set_board_value(&mut doc, None, "allow_reorder", "true").unwrap();
        let result = doc.to_string();
        assert!(result.contains("# Applies to every dashboard"));
        let config: ProjectConfig = toml::from_str(&result).unwrap();
        assert_eq!(config.board.undo_timeout_ms, Some(3000));
        assert!(config.board.allow_reorder());
    }

    #[test]
    fn test_set_dashboard_override() {
        let mut doc: toml_edit::DocumentMut = sample_config().parse().unwrap();
        set_board_value(&mut doc, Some("po"), "show_undo_toast", "false").unwrap();
        let config: ProjectConfig = toml::from_str(&doc.to_string()).unwrap();
        let po = config.dashboard("po").unwrap();
        assert!(!config.board_config_for(po).show_undo_toast());
        assert!(config.board.show_undo_toast());
        assert_eq!(po.columns.len(), 1);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut doc: toml_edit::DocumentMut = sample_config().parse().unwrap();
        assert!(matches!(
            set_board_value(&mut doc, None, "colour", "1"),
            Err(ConfigEditError::UnknownKey(_))
        ));
        assert!(matches!(
            set_board_value(&mut doc, None, "column_width", "wide"),
            Err(ConfigEditError::InvalidValue { .. })
        ));
        assert!(matches!(
            set_board_value(&mut doc, Some("nope"), "allow_reorder", "true"),
            Err(ConfigEditError::UnknownDashboard(_))
        ));
        assert_eq!(doc.to_string(), sample_config());
    }
}
