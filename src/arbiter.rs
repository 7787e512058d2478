//! Command arbitration — merges gesture-tick and voice-channel actions
//! into one serialized stream onto the pointer sink.
//!
//! The arbiter owns the sink outright.  Both producers reach it through
//! the single-threaded event loop (the gesture tick directly, the voice
//! thread via a channel drained between ticks), so no two actions can
//! ever be delivered concurrently and arrival order is delivery order.
//! Within one engine tick the gesture source is capped at one motion and
//! one click-class action.

use tracing::{debug, warn};

use crate::action::{Action, PointerSink};

// ── Sources ────────────────────────────────────────────────

/// Which producer submitted an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSource {
    Gesture,
    Voice,
}

impl ActionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gesture => "gesture",
            Self::Voice => "voice",
        }
    }
}

// ── Arbiter ────────────────────────────────────────────────

/// Single-writer gate in front of the pointer sink.
pub struct CommandArbiter<S: PointerSink> {
    sink: S,
    moves_this_tick: u32,
    clicks_this_tick: u32,
    dispatched: u64,
}

impl<S: PointerSink> CommandArbiter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            moves_this_tick: 0,
            clicks_this_tick: 0,
            dispatched: 0,
        }
    }

    /// Open a new engine tick, resetting the per-tick gesture caps.
    pub fn begin_tick(&mut self) {
        self.moves_this_tick = 0;
        self.clicks_this_tick = 0;
    }

    /// Deliver one action to the sink, exactly once, in call order.
    /// Gesture actions past the per-tick cap (one motion, one
    /// click-class) are dropped with a warning.
    pub fn submit(&mut self, source: ActionSource, action: Action) {
        if source == ActionSource::Gesture {
            if matches!(action, Action::MoveTo { .. }) {
                if self.moves_this_tick >= 1 {
                    warn!(action = action.as_str(), "second move in one tick dropped");
                    return;
                }
                self.moves_this_tick += 1;
            } else if action.is_click_class() {
                if self.clicks_this_tick >= 1 {
                    warn!(
                        action = action.as_str(),
                        "second click-class action in one tick dropped"
                    );
                    return;
                }
                self.clicks_this_tick += 1;
            }
        }

        debug!(source = source.as_str(), action = ?action, "dispatch");
        self.deliver(action);
        self.dispatched += 1;
    }

    /// Total actions delivered to the sink since start.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    fn deliver(&mut self, action: Action) {
        match action {
            Action::MoveTo { x, y } => self.sink.move_to(x, y),
            Action::Click => self.sink.click(),
            Action::DoubleClick => self.sink.double_click(),
            Action::RightClick => self.sink.right_click(),
            Action::Scroll(amount) => self.sink.scroll(amount),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────
