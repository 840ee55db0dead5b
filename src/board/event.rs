use serde::Serialize;

use crate::model::Id;

/// A finalized move, handed to the caller for persistence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveEvent<T> {
    pub item: T,
    pub from_column_id: Id,
    pub to_column_id: Id,
    pub from_index: usize,
    pub to_index: usize,
}

/// Everything a board reports back to its owner
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent<T> {
    /// A cross-column move was committed. Emitted exactly once per move.
    ItemMoved(MoveEvent<T>),
    /// A card was activated without dragging
    ItemClicked(T),
    /// A pending move was undone; derived aggregates may need a refresh
    UndoMove,
}

/// A drop gesture: where the card was picked up and where it was released
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub source_column: Id,
    pub source_index: usize,
    pub dest_column: Id,
    pub dest_index: usize,
}

impl DropEvent {
    pub fn new(
        source_column: impl Into<Id>,
        source_index: usize,
        dest_column: impl Into<Id>,
        dest_index: usize,
    ) -> Self {
        DropEvent {
            source_column: source_column.into(),
            source_index,
            dest_column: dest_column.into(),
            dest_index,
        }
    }

    pub fn is_same_column(&self) -> bool {
        self.source_column == self.dest_column
    }
}
