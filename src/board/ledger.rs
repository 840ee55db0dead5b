use std::time::{Duration, Instant};

use crate::model::Id;

use super::event::MoveEvent;
use super::timer::{CancelToken, GraceTimer, TimerEvent};

/// A move that has been applied to the board but not yet committed
#[derive(Debug)]
pub struct PendingMove<T> {
    /// Distinguishes this move from earlier ones on the same board
    pub seq: u64,
    pub item: T,
    pub from_column_id: Id,
    pub to_column_id: Id,
    pub from_index: usize,
    pub to_index: usize,
    timer: GraceTimer,
}

impl<T> PendingMove<T> {
    pub fn remaining_secs(&self) -> u64 {
        self.timer.remaining_secs()
    }

    pub fn deadline(&self) -> Instant {
        self.timer.deadline()
    }

    /// Token shared with anything that must stop when this move resolves
    pub fn token(&self) -> &CancelToken {
        self.timer.token()
    }

    pub fn into_event(self) -> MoveEvent<T> {
        MoveEvent {
            item: self.item,
            from_column_id: self.from_column_id,
            to_column_id: self.to_column_id,
            from_index: self.from_index,
            to_index: self.to_index,
        }
    }
}

/// Result of registering a move
#[derive(Debug)]
pub struct Registration<T> {
    pub seq: u64,
    /// Cancelled when the new move resolves
    pub token: CancelToken,
    /// Whatever move was occupying the slot, its timer already cancelled
    pub superseded: Option<PendingMove<T>>,
}

/// Single slot holding the in-flight move of one board
#[derive(Debug)]
pub struct PendingMoveLedger<T> {
    slot: Option<PendingMove<T>>,
    next_seq: u64,
}

impl<T> Default for PendingMoveLedger<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PendingMoveLedger<T> {
    pub fn new() -> Self {
        PendingMoveLedger {
            slot: None,
            next_seq: 1,
        }
    }

    /// Record a move and start its grace period
    pub fn register(&mut self, mv: MoveEvent<T>, now: Instant, grace: Duration) -> Registration<T> {
        let superseded = self.take();
        let seq = self.next_seq;
        self.next_seq += 1;
        let token = CancelToken::new();
        self.slot = Some(PendingMove {
            seq,
            item: mv.item,
            from_column_id: mv.from_column_id,
            to_column_id: mv.to_column_id,
            from_index: mv.from_index,
            to_index: mv.to_index,
            timer: GraceTimer::start(now, grace, token.clone()),
        });
        Registration {
            seq,
            token,
            superseded,
        }
    }

    /// Remove the pending move, cancelling its timer
    pub fn take(&mut self) -> Option<PendingMove<T>> {
        let pending = self.slot.take()?;
        pending.timer.cancel();
        Some(pending)
    }

    /// Remove the pending move only if it is the one numbered `seq`
    pub fn take_if(&mut self, seq: u64) -> Option<PendingMove<T>> {
        if self.slot.as_ref().is_some_and(|p| p.seq == seq) {
            self.take()
        } else {
            None
        }
    }

    pub fn pending(&self) -> Option<&PendingMove<T>> {
        self.slot.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    pub fn next_wake(&self) -> Option<Instant> {
        self.slot.as_ref().and_then(|p| p.timer.next_wake())
    }

    /// Advance the countdown. An expired move is taken out of the slot and
    /// returned; the caller commits it.
    pub fn poll(&mut self, now: Instant) -> Option<PendingMove<T>> {
        let pending = self.slot.as_mut()?;
        let expired = pending
            .timer
            .poll(now)
            .contains(&TimerEvent::Expired);
        if expired { self.take() } else { None }
    }
}
