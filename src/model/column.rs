use serde::{Deserialize, Serialize};

use super::id::Id;

/// Anything that can sit on a board. The board only ever looks at the id.
pub trait BoardItem {
    fn id(&self) -> Id;
}

/// A named, ordered bucket of items, usually one per status code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column<T> {
    /// Status code this column stands for
    pub id: Id,
    /// Header label
    pub name: String,
    /// Header accent: a palette name (`info`, `success`, ...) or `#RRGGBB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Items in display order
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Column<T> {
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Column {
            id: id.into(),
            name: name.into(),
            color: None,
            items: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: BoardItem> Column<T> {
    /// Position of the item with the given id
    pub fn position_of(&self, id: &Id) -> Option<usize> {
        self.items.iter().position(|item| &item.id() == id)
    }
}
