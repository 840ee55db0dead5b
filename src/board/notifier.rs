use std::time::{Duration, Instant};

use super::timer::{CancelToken, GraceTimer, TimerEvent};

/// What to show, for how long, and what pressing "undo" should trigger
#[derive(Debug, Clone)]
pub struct ToastConfig<A> {
    pub title: String,
    pub message: String,
    pub duration: Duration,
    /// Handed back by [`UndoNotifier::press_undo`]
    pub on_undo: A,
}

/// Render-ready snapshot of the visible toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub remaining_secs: u64,
}

#[derive(Debug)]
struct ActiveToast<A> {
    id: u64,
    title: String,
    message: String,
    on_undo: A,
    countdown: GraceTimer,
}

/// Single-slot undo notification with a countdown badge.
///
/// Showing a toast replaces the current one. The toast disappears when its
/// duration runs out, when undo is pressed, or when the token it was shown with
/// is cancelled by its owner.
#[derive(Debug)]
pub struct UndoNotifier<A> {
    active: Option<ActiveToast<A>>,
    next_id: u64,
}

impl<A> Default for UndoNotifier<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> UndoNotifier<A> {
    pub fn new() -> Self {
        UndoNotifier {
            active: None,
            next_id: 1,
        }
    }

    /// Show a toast whose countdown stops together with `token`
    pub fn show(&mut self, config: ToastConfig<A>, now: Instant, token: CancelToken) -> u64 {
        self.dismiss();
        let id = self.next_id;
        self.next_id += 1;
        self.active = Some(ActiveToast {
            id,
            title: config.title,
            message: config.message,
            on_undo: config.on_undo,
            countdown: GraceTimer::start(now, config.duration, token),
        });
        id
    }

    /// Close the visible toast. Returns whether one was visible.
    pub fn dismiss(&mut self) -> bool {
        match self.active.take() {
            Some(toast) => {
                toast.countdown.cancel();
                true
            }
            None => false,
        }
    }

    /// The "undo" button: returns the toast's undo action for the caller to run,
    /// then dismisses the toast.
    pub fn press_undo(&mut self) -> Option<A> {
        let toast = self.active.take()?;
        toast.countdown.cancel();
        Some(toast.on_undo)
    }

    /// Advance the countdown. Returns the countdown values reported since the
    /// last poll; the toast is dismissed when its time is up.
    pub fn poll(&mut self, now: Instant) -> Vec<u64> {
        let mut ticks = Vec::new();
        let mut finished = false;
        if let Some(toast) = self.active.as_mut() {
            if toast.countdown.is_cancelled() {
                finished = true;
            }
            for event in toast.countdown.poll(now) {
                match event {
                    TimerEvent::Tick { remaining_secs } => ticks.push(remaining_secs),
                    TimerEvent::Expired => finished = true,
                }
            }
        }
        if finished {
            self.active = None;
        }
        ticks
    }

    pub fn is_visible(&self) -> bool {
        self.active.is_some()
    }

    pub fn view(&self) -> Option<ToastView> {
        self.active.as_ref().map(|t| ToastView {
            id: t.id,
            title: t.title.clone(),
            message: t.message.clone(),
            remaining_secs: t.countdown.remaining_secs(),
        })
    }

    pub fn next_wake(&self) -> Option<Instant> {
        self.active.as_ref().and_then(|t| t.countdown.next_wake())
    }
}
