use std::collections::HashSet;

use crate::model::{Column, DashboardConfig, Record};

/// Columns built from a dashboard's records
#[derive(Debug, Clone)]
pub struct BuiltColumns {
    pub columns: Vec<Column<Record>>,
    /// Records kept off the board: their status matches no configured column,
    /// or their id repeats one already placed
    pub orphans: Vec<Record>,
}

/// Group records into the dashboard's status columns.
///
/// Columns come out in config order; records keep their file order within a column.
/// Only the first record with a given id is placed, so an id appears at most once
/// across the board.
pub fn build_columns(dashboard: &DashboardConfig, records: Vec<Record>) -> BuiltColumns {
    let mut columns: Vec<Column<Record>> = dashboard
        .columns
        .iter()
        .map(|c| Column {
            id: c.id.clone(),
            name: c.name.clone(),
            color: c.color.clone(),
            items: Vec::new(),
        })
        .collect();

    let mut orphans = Vec::new();
    let mut placed = HashSet::new();
    for record in records {
        if placed.contains(&record.id) {
            tracing::warn!(id = %record.id, "repeated record id kept off the board");
            orphans.push(record);
            continue;
        }
        match columns.iter_mut().find(|c| c.id == record.status) {
            Some(column) => {
                placed.insert(record.id.clone());
                column.items.push(record);
            }
            None => orphans.push(record),
        }
    }

    BuiltColumns { columns, orphans }
}

/// Per-column counts for tab bars and listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCount {
    pub name: String,
    pub count: usize,
}

pub fn column_counts<T>(columns: &[Column<T>]) -> Vec<ColumnCount> {
    columns
        .iter()
        .map(|c| ColumnCount {
            name: c.name.clone(),
            count: c.items.len(),
        })
        .collect()
}
