use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::column::BoardItem;
use super::id::Id;

/// A domain record (invoice, purchase order, requisition, ...) as stored in a
/// dashboard's JSON file.
///
/// Only `id`, `title` and `status` are interpreted. Every other field is carried
/// through untouched so the file round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Id,
    #[serde(default)]
    pub title: String,
    pub status: Id,
    /// Remaining fields, in file order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Record {
    pub fn new(id: impl Into<Id>, title: impl Into<String>, status: impl Into<Id>) -> Self {
        Record {
            id: id.into(),
            title: title.into(),
            status: status.into(),
            extra: IndexMap::new(),
        }
    }

    /// A short secondary line for cards: the first string-valued extra field
    /// among a few well-known names.
    pub fn subtitle(&self) -> Option<&str> {
        const CANDIDATES: &[&str] = &[
            "supplier_name",
            "customer_name",
            "project_name",
            "vehicle",
            "warehouse",
            "subtitle",
        ];
        CANDIDATES
            .iter()
            .find_map(|key| self.extra.get(*key).and_then(|v| v.as_str()))
    }
}

impl BoardItem for Record {
    fn id(&self) -> Id {
        self.id.clone()
    }
}
