use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::model::{BoardConfig, BoardItem, Column, Id};
use crate::ops::board_ops::{
    column_index, duplicate_ids, move_item_in_array, transfer_array_item, two_columns_mut,
};

use super::event::{BoardEvent, DropEvent, MoveEvent};
use super::ledger::{PendingMove, PendingMoveLedger};
use super::notifier::{ToastConfig, ToastView, UndoNotifier};

/// Title of the undo toast
pub const UNDO_TOAST_TITLE: &str = "Item moved";
/// Header accent for columns without a color
pub const DEFAULT_COLUMN_COLOR: &str = "secondary";

/// Error type for drops that do not match the board
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column not found: {0}")]
    ColumnNotFound(Id),
    #[error("no item at index {index} in column {column}")]
    ItemOutOfRange { column: Id, index: usize },
}

/// What a drop did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Same-column drop while reordering is disabled
    Ignored,
    /// Same-column reorder; nothing to commit
    Reordered { to_index: usize },
    /// Cross-column move committed on the spot (undo toast disabled)
    Committed,
    /// Cross-column move waiting out its grace period
    Pending { seq: u64, remaining_secs: u64 },
}

/// The toast's undo action: undo the pending move numbered `seq`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoRequest {
    pub seq: u64,
}

/// A Kanban board with optimistic moves and a timed undo window.
///
/// Drops mutate the columns immediately. A cross-column move then waits in
/// the ledger for the grace period, with an undo toast counting down; when
/// the period runs out the move is reported as [`BoardEvent::ItemMoved`] for
/// the owner to persist. Time only advances through [`KanbanBoard::poll`].
///
/// Only one move is ever pending. A second cross-column drop commits the
/// earlier move first, then starts its own grace period.
pub struct KanbanBoard<T: BoardItem + Clone> {
    columns: Vec<Column<T>>,
    config: BoardConfig,
    ledger: PendingMoveLedger<T>,
    notifier: UndoNotifier<UndoRequest>,
    events: VecDeque<BoardEvent<T>>,
}

impl<T: BoardItem + Clone> KanbanBoard<T> {
    pub fn new(columns: Vec<Column<T>>, config: BoardConfig) -> Self {
        warn_duplicates(&columns);
        KanbanBoard {
            columns,
            config,
            ledger: PendingMoveLedger::new(),
            notifier: UndoNotifier::new(),
            events: VecDeque::new(),
        }
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, id: &Id) -> Option<&Column<T>> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Replace the columns with a fresh build from domain data. A pending move
    /// stays pending; its undo finds the item by id in the new columns.
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) {
        if self.ledger.is_pending() {
            tracing::debug!("columns replaced while a move is pending");
        }
        warn_duplicates(&columns);
        self.columns = columns;
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// New settings apply to the next drop; a pending move keeps its timing.
    pub fn set_config(&mut self, config: BoardConfig) {
        self.config = config;
    }

    pub fn column_width(&self) -> u16 {
        self.config.column_width()
    }

    pub fn undo_timeout(&self) -> Duration {
        self.config.undo_timeout()
    }

    /// Header accent for a column
    pub fn header_color<'a>(&self, column: &'a Column<T>) -> &'a str {
        column.color.as_deref().unwrap_or(DEFAULT_COLUMN_COLOR)
    }

    /// Apply a drop gesture.
    pub fn on_drop(&mut self, drop: DropEvent, now: Instant) -> Result<DropOutcome, BoardError> {
        let src = column_index(&self.columns, &drop.source_column)
            .ok_or_else(|| BoardError::ColumnNotFound(drop.source_column.clone()))?;
        let dst = column_index(&self.columns, &drop.dest_column)
            .ok_or_else(|| BoardError::ColumnNotFound(drop.dest_column.clone()))?;

        if drop.source_index >= self.columns[src].items.len() {
            return Err(BoardError::ItemOutOfRange {
                column: drop.source_column,
                index: drop.source_index,
            });
        }

        if src == dst {
            if !self.config.allow_reorder() {
                tracing::debug!(column = %drop.source_column, "reorder disabled, drop ignored");
                return Ok(DropOutcome::Ignored);
            }
            let items = &mut self.columns[src].items;
            let to_index =
                move_item_in_array(items, drop.source_index, drop.dest_index).unwrap_or(0);
            return Ok(DropOutcome::Reordered { to_index });
        }

        let Some((source, dest)) = two_columns_mut(&mut self.columns, src, dst) else {
            return Err(BoardError::ColumnNotFound(drop.dest_column));
        };
        let Some(to_index) =
            transfer_array_item(&mut source.items, &mut dest.items, drop.source_index, drop.dest_index)
        else {
            return Err(BoardError::ItemOutOfRange {
                column: drop.source_column,
                index: drop.source_index,
            });
        };
        let item = dest.items[to_index].clone();
        let dest_name = dest.name.clone();

        let mv = MoveEvent {
            item,
            from_column_id: drop.source_column,
            to_column_id: drop.dest_column,
            from_index: drop.source_index,
            to_index,
        };
        tracing::info!(
            item = %mv.item.id(),
            from = %mv.from_column_id,
            to = %mv.to_column_id,
            from_index = mv.from_index,
            to_index = mv.to_index,
            "item dropped"
        );

        if !self.config.show_undo_toast() {
            if self.commit_pending() {
                tracing::info!("earlier pending move committed early by a new drop");
            }
            self.events.push_back(BoardEvent::ItemMoved(mv));
            return Ok(DropOutcome::Committed);
        }

        let grace = self.config.undo_timeout();
        let registration = self.ledger.register(mv, now, grace);
        if let Some(earlier) = registration.superseded {
            tracing::info!("earlier pending move committed early by a new drop");
            self.emit_commit(earlier);
        }
        self.notifier.show(
            ToastConfig {
                title: UNDO_TOAST_TITLE.to_string(),
                message: format!("Moved to \"{}\"", dest_name),
                duration: grace,
                on_undo: UndoRequest {
                    seq: registration.seq,
                },
            },
            now,
            registration.token,
        );
        let remaining_secs = self.ledger.pending().map_or(0, |p| p.remaining_secs());
        Ok(DropOutcome::Pending {
            seq: registration.seq,
            remaining_secs,
        })
    }

    /// Commit the pending move now instead of waiting for its deadline.
    /// Returns whether there was one.
    pub fn commit_pending(&mut self) -> bool {
        match self.ledger.take() {
            Some(pending) => {
                self.notifier.dismiss();
                self.emit_commit(pending);
                true
            }
            None => false,
        }
    }

    /// Undo the pending move, putting the item back where it was picked up.
    /// Returns false (and does nothing) when no move is pending.
    pub fn undo(&mut self) -> bool {
        match self.ledger.take() {
            Some(pending) => {
                self.notifier.dismiss();
                self.finish_undo(pending);
                true
            }
            None => false,
        }
    }

    /// The toast's undo button
    pub fn press_undo(&mut self) -> bool {
        let Some(request) = self.notifier.press_undo() else {
            return false;
        };
        match self.ledger.take_if(request.seq) {
            Some(pending) => {
                self.finish_undo(pending);
                true
            }
            None => false,
        }
    }

    /// A card was activated without dragging
    pub fn click_item(&mut self, column_id: &Id, index: usize) -> bool {
        let Some(item) = self.column(column_id).and_then(|c| c.items.get(index)).cloned() else {
            return false;
        };
        self.events.push_back(BoardEvent::ItemClicked(item));
        true
    }

    /// Advance timers to `now`: update the countdown and commit an expired move.
    pub fn poll(&mut self, now: Instant) {
        if let Some(expired) = self.ledger.poll(now) {
            self.notifier.dismiss();
            self.emit_commit(expired);
        }
        if let Some(remaining_secs) = self.notifier.poll(now).last() {
            tracing::trace!(remaining_secs, "undo countdown");
        }
    }

    /// Earliest instant at which [`KanbanBoard::poll`] has work to do
    pub fn next_wake(&self) -> Option<Instant> {
        match (self.ledger.next_wake(), self.notifier.next_wake()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn pending(&self) -> Option<&PendingMove<T>> {
        self.ledger.pending()
    }

    pub fn toast(&self) -> Option<ToastView> {
        self.notifier.view()
    }

    /// Take all events reported since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<BoardEvent<T>> {
        self.events.drain(..).collect()
    }

    /// Cancel any pending move without committing it and hide the toast.
    /// Called on drop so a board that goes away never commits later.
    pub fn teardown(&mut self) {
        if let Some(pending) = self.ledger.take() {
            tracing::debug!(item = %pending.item.id(), "pending move discarded on teardown");
        }
        self.notifier.dismiss();
    }

    fn emit_commit(&mut self, pending: PendingMove<T>) {
        tracing::info!(
            item = %pending.item.id(),
            to = %pending.to_column_id,
            "move committed"
        );
        self.events
            .push_back(BoardEvent::ItemMoved(pending.into_event()));
    }

    fn finish_undo(&mut self, pending: PendingMove<T>) {
        self.revert(&pending);
        tracing::info!(item = %pending.item.id(), "move undone");
        self.events.push_back(BoardEvent::UndoMove);
    }

    /// Move the item back from the destination to its original slot. Missing
    /// columns or a missing item make this a no-op.
    fn revert(&mut self, pending: &PendingMove<T>) {
        let (Some(from), Some(to)) = (
            column_index(&self.columns, &pending.from_column_id),
            column_index(&self.columns, &pending.to_column_id),
        ) else {
            tracing::debug!("undo skipped: column no longer on the board");
            return;
        };
        let item_id = pending.item.id();
        let Some(current) = self.columns[to].position_of(&item_id) else {
            tracing::debug!(item = %item_id, "undo skipped: item no longer in target column");
            return;
        };
        if let Some((dest, source)) = two_columns_mut(&mut self.columns, to, from) {
            transfer_array_item(&mut dest.items, &mut source.items, current, pending.from_index);
        }
    }
}

impl<T: BoardItem + Clone> Drop for KanbanBoard<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Undo finds items by id, so a repeated id would move the wrong card back
fn warn_duplicates<T: BoardItem>(columns: &[Column<T>]) {
    let dupes = duplicate_ids(columns);
    if !dupes.is_empty() {
        tracing::warn!(ids = ?dupes, "item ids repeated across columns");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use pretty_assertions::assert_eq;

    fn rec(id: i64) -> Record {
        Record::new(id, format!("R-{}", id), "a")
    }

    fn board(config: BoardConfig) -> KanbanBoard<Record> {
        KanbanBoard::new(
            vec![
                Column::new("a", "Draft").with_items(vec![rec(1), rec(2), rec(3)]),
                Column::new("b", "Approved").with_color("success"),
                Column::new("c", "Received").with_items(vec![rec(9)]),
            ],
            config,
        )
    }

    fn ids(board: &KanbanBoard<Record>, column: &str) -> Vec<i64> {
        board
            .column(&Id::from(column))
            .unwrap()
            .items
            .iter()
            .filter_map(|r| r.id.as_num())
            .collect()
    }

    #[test]
    fn cross_column_drop_is_applied_immediately_and_pends() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig::default());
        let outcome = b.on_drop(DropEvent::new("a", 1, "b", 0), t0).unwrap();
        assert_eq!(
            outcome,
            DropOutcome::Pending {
                seq: 1,
                remaining_secs: 8
            }
        );
        assert_eq!(ids(&b, "a"), vec![1, 3]);
        assert_eq!(ids(&b, "b"), vec![2]);
        assert!(b.drain_events().is_empty());

        let toast = b.toast().unwrap();
        assert_eq!(toast.title, "Item moved");
        assert_eq!(toast.message, "Moved to \"Approved\"");
        assert_eq!(toast.remaining_secs, 8);
    }

    #[test]
    fn destination_index_is_clamped() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig::default());
        b.on_drop(DropEvent::new("a", 0, "c", 40), t0).unwrap();
        assert_eq!(ids(&b, "c"), vec![9, 1]);
        assert_eq!(b.pending().unwrap().to_index, 1);
    }

    #[test]
    fn expiry_commits_once() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig::default());
        b.on_drop(DropEvent::new("a", 0, "b", 0), t0).unwrap();
        b.poll(t0 + Duration::from_millis(7999));
        assert!(b.drain_events().is_empty());
        b.poll(t0 + Duration::from_millis(8000));
        let events = b.drain_events();
        assert_eq!(
            events,
            vec![BoardEvent::ItemMoved(MoveEvent {
                item: rec(1),
                from_column_id: Id::from("a"),
                to_column_id: Id::from("b"),
                from_index: 0,
                to_index: 0,
            })]
        );
        assert!(b.pending().is_none());
        assert!(b.toast().is_none());
        b.poll(t0 + Duration::from_secs(20));
        assert!(b.drain_events().is_empty());
    }

    #[test]
    fn undo_restores_previous_board_exactly() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig::default());
        let before = b.columns().to_vec();
        b.on_drop(DropEvent::new("a", 1, "c", 0), t0).unwrap();
        assert!(b.press_undo());
        assert_eq!(b.columns(), before.as_slice());
        assert_eq!(b.drain_events(), vec![BoardEvent::UndoMove]);
        assert!(b.toast().is_none());
    }

    #[test]
    fn undo_after_commit_does_nothing() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig::default());
        b.on_drop(DropEvent::new("a", 0, "b", 0), t0).unwrap();
        b.poll(t0 + Duration::from_secs(8));
        let after_commit = b.columns().to_vec();
        b.drain_events();
        assert!(!b.undo());
        assert!(!b.press_undo());
        assert_eq!(b.columns(), after_commit.as_slice());
        assert!(b.drain_events().is_empty());
    }

    #[test]
    fn second_drop_commits_the_first() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig::default());
        b.on_drop(DropEvent::new("a", 0, "b", 0), t0).unwrap();
        let t1 = t0 + Duration::from_secs(2);
        let outcome = b.on_drop(DropEvent::new("a", 0, "c", 1), t1).unwrap();
        assert!(matches!(outcome, DropOutcome::Pending { seq: 2, .. }));

        let events = b.drain_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            BoardEvent::ItemMoved(mv) => assert_eq!(mv.item.id, Id::Num(1)),
            other => panic!("expected ItemMoved, got {:?}", other),
        }

        // Undo now only reverts the second move
        assert!(b.undo());
        assert_eq!(ids(&b, "a"), vec![2, 3]);
        assert_eq!(ids(&b, "b"), vec![1]);
        assert_eq!(ids(&b, "c"), vec![9]);

        // The first move's old deadline must not fire again
        b.poll(t0 + Duration::from_secs(30));
        assert_eq!(b.drain_events(), vec![BoardEvent::UndoMove]);
    }

    #[test]
    fn synchronous_drop_commits_pending_move_first() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig::default());
        b.on_drop(DropEvent::new("a", 0, "b", 0), t0).unwrap();
        b.set_config(BoardConfig {
            show_undo_toast: Some(false),
            ..BoardConfig::default()
        });

        let outcome = b.on_drop(DropEvent::new("a", 0, "c", 0), t0).unwrap();
        assert_eq!(outcome, DropOutcome::Committed);
        let committed: Vec<Id> = b
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                BoardEvent::ItemMoved(mv) => Some(mv.item.id),
                _ => None,
            })
            .collect();
        assert_eq!(committed, vec![Id::Num(1), Id::Num(2)]);
        assert!(b.pending().is_none());
        assert!(b.toast().is_none());
        assert!(!b.undo());

        b.poll(t0 + Duration::from_secs(9));
        assert!(b.drain_events().is_empty());
    }

    #[test]
    fn same_column_drop_without_reorder_is_ignored() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig::default());
        let outcome = b.on_drop(DropEvent::new("a", 0, "a", 2), t0).unwrap();
        assert_eq!(outcome, DropOutcome::Ignored);
        assert_eq!(ids(&b, "a"), vec![1, 2, 3]);
        assert!(b.pending().is_none());
        assert!(b.drain_events().is_empty());
    }

    #[test]
    fn same_column_reorder_when_allowed() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig {
            allow_reorder: Some(true),
            ..Default::default()
        });
        let outcome = b.on_drop(DropEvent::new("a", 0, "a", 2), t0).unwrap();
        assert_eq!(outcome, DropOutcome::Reordered { to_index: 2 });
        assert_eq!(ids(&b, "a"), vec![2, 3, 1]);
        assert!(b.pending().is_none());
        assert!(b.toast().is_none());
        assert!(b.drain_events().is_empty());
    }

    #[test]
    fn toast_disabled_commits_synchronously() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig {
            show_undo_toast: Some(false),
            ..Default::default()
        });
        let outcome = b.on_drop(DropEvent::new("a", 2, "b", 0), t0).unwrap();
        assert_eq!(outcome, DropOutcome::Committed);
        assert!(b.toast().is_none());
        assert!(b.pending().is_none());
        let events = b.drain_events();
        assert!(matches!(&events[..], [BoardEvent::ItemMoved(mv)] if mv.from_index == 2));
    }

    #[test]
    fn bad_drops_leave_board_untouched() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig::default());
        let before = b.columns().to_vec();
        assert_eq!(
            b.on_drop(DropEvent::new("zz", 0, "b", 0), t0),
            Err(BoardError::ColumnNotFound(Id::from("zz")))
        );
        assert_eq!(
            b.on_drop(DropEvent::new("b", 0, "a", 0), t0),
            Err(BoardError::ItemOutOfRange {
                column: Id::from("b"),
                index: 0
            })
        );
        assert_eq!(b.columns(), before.as_slice());
    }

    #[test]
    fn undo_tolerates_vanished_item() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig::default());
        b.on_drop(DropEvent::new("a", 0, "b", 0), t0).unwrap();
        // Caller rebuilt the board from data that no longer has the item
        b.set_columns(vec![
            Column::new("a", "Draft").with_items(vec![rec(2), rec(3)]),
            Column::new("b", "Approved"),
        ]);
        assert!(b.undo());
        assert_eq!(ids(&b, "a"), vec![2, 3]);
        assert_eq!(b.drain_events(), vec![BoardEvent::UndoMove]);
    }

    #[test]
    fn teardown_cancels_commit() {
        let t0 = Instant::now();
        let mut b = board(BoardConfig::default());
        b.on_drop(DropEvent::new("a", 0, "b", 0), t0).unwrap();
        b.teardown();
        assert_eq!(b.next_wake(), None);
        b.poll(t0 + Duration::from_secs(60));
        assert!(b.drain_events().is_empty());
    }

    #[test]
    fn click_reports_item() {
        let mut b = board(BoardConfig::default());
        assert!(b.click_item(&Id::from("c"), 0));
        assert!(!b.click_item(&Id::from("c"), 5));
        assert_eq!(b.drain_events(), vec![BoardEvent::ItemClicked(rec(9))]);
    }

    #[test]
    fn header_color_defaults_to_secondary() {
        let b = board(BoardConfig::default());
        assert_eq!(b.header_color(&b.columns()[0]), "secondary");
        assert_eq!(b.header_color(&b.columns()[1]), "success");
    }
}
