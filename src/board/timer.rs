use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Shared cancellation flag. Every clone sees the same flag, so cancelling the
/// commit timer also silences any countdown built from the same token.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// What a timer reports when polled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A whole second passed; `remaining_secs` is the new countdown value
    Tick { remaining_secs: u64 },
    /// The full duration elapsed. Reported once.
    Expired,
}

/// A one-shot deadline with a one-second countdown attached.
///
/// Nothing runs in the background: the owner calls [`GraceTimer::poll`] from its
/// event loop, and [`GraceTimer::next_wake`] says when the next event is due.
/// Ticks land on whole seconds strictly before the deadline; the countdown is 0
/// exactly when `Expired` is reported.
#[derive(Debug)]
pub struct GraceTimer {
    started: Instant,
    duration: Duration,
    total_secs: u64,
    ticks_emitted: u64,
    expired: bool,
    token: CancelToken,
}

/// `ceil(duration / 1s)`
pub fn countdown_secs(duration: Duration) -> u64 {
    let ms = duration.as_millis() as u64;
    ms.div_ceil(1000)
}

impl GraceTimer {
    pub fn start(now: Instant, duration: Duration, token: CancelToken) -> Self {
        GraceTimer {
            started: now,
            duration,
            total_secs: countdown_secs(duration),
            ticks_emitted: 0,
            expired: false,
            token,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.started + self.duration
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Seconds shown on the countdown
    pub fn remaining_secs(&self) -> u64 {
        if self.expired {
            0
        } else {
            self.total_secs.saturating_sub(self.ticks_emitted)
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Still counting down
    pub fn is_active(&self) -> bool {
        !self.expired && !self.token.is_cancelled()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// When the next tick or the expiry is due, if anything is left to report
    pub fn next_wake(&self) -> Option<Instant> {
        if !self.is_active() {
            return None;
        }
        let next_tick = self.started + Duration::from_secs(self.ticks_emitted + 1);
        Some(next_tick.min(self.deadline()))
    }

    /// Report everything that became due up to `now`, in order. A late poll
    /// catches up on every missed tick before reporting expiry.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if !self.is_active() {
            return events;
        }

        let elapsed = now.saturating_duration_since(self.started);
        let whole_secs = elapsed.as_secs();
        // Ticks only fire strictly before the deadline
        let last_tick = (self.duration.as_millis() as u64).saturating_sub(1) / 1000;
        let due = whole_secs.min(last_tick);

        while self.ticks_emitted < due {
            self.ticks_emitted += 1;
            events.push(TimerEvent::Tick {
                remaining_secs: self.total_secs.saturating_sub(self.ticks_emitted),
            });
        }

        if elapsed >= self.duration {
            self.expired = true;
            events.push(TimerEvent::Expired);
        }
        events
    }
}
