//! Gesture state machine — edge detection and debouncing over per-tick
//! finger states.
//!
//! Transitions are edge-triggered on the previous vs current tick, so the
//! machine carries exactly one tick of memory.  The previous flags are
//! seeded as unknown; no edge can fire until two consecutive real
//! observations exist.  Click gating is a configuration-selected policy:
//! spread-angle gating over finger edges, or pinch-distance gating with a
//! cooldown.

use tracing::debug;

use crate::action::Action;
use crate::features::HandFeatures;

// ── Policies ───────────────────────────────────────────────

/// How a click is recognized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickGate {
    /// Finger falling edges, accepted only when the index/middle spread
    /// angle exceeds the threshold — rejects relaxed near-parallel poses.
    Angle { threshold_deg: f64 },
    /// Thumb pinch proximity under a per-click cooldown.  Pinches are
    /// momentary rather than edge-shaped, so a cooldown replaces the edge
    /// debounce.
    Pinch { distance: f64, delay_s: f64 },
}

/// What happens to the one-tick memory when no hand is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropoutPolicy {
    /// Keep the previous finger flags across the dropout.  An edge that
    /// genuinely spans the dropout still fires on resume.
    Hold,
    /// Clear the flags to unknown, suppressing the next edge entirely.
    Reset,
}

impl DropoutPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hold" => Some(Self::Hold),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

// ── Output ─────────────────────────────────────────────────

/// Result of one gesture-machine tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureOutput {
    /// Cursor-motion mode is active this tick (index and middle both up).
    /// Continuous — re-asserted every qualifying tick, not an edge.
    pub moving: bool,
    /// At most one discrete click-class action per tick.
    pub action: Option<Action>,
}

impl GestureOutput {
    fn idle() -> Self {
        Self {
            moving: false,
            action: None,
        }
    }
}

// ── State machine ──────────────────────────────────────────

/// Edge/debounce logic over finger-up flags.  Owns the debounce clock
/// (`last_click_s`) used for click-vs-double-click resolution.
#[derive(Debug)]
pub struct GestureMachine {
    gate: ClickGate,
    dropout: DropoutPolicy,
    double_click_interval_s: f64,
    prev_index_up: Option<bool>,
    prev_middle_up: Option<bool>,
    last_click_s: Option<f64>,
    last_pinch_s: Option<f64>,
}

impl GestureMachine {
    pub fn new(gate: ClickGate, dropout: DropoutPolicy, double_click_interval_s: f64) -> Self {
        Self {
            gate,
            dropout,
            double_click_interval_s,
            prev_index_up: None,
            prev_middle_up: None,
            last_click_s: None,
            last_pinch_s: None,
        }
    }

    /// Advance one tick with a real observation's features.  `now_s` is a
    /// monotonic timestamp in seconds supplied by the caller.
    pub fn update(&mut self, f: &HandFeatures, now_s: f64) -> GestureOutput {
        let moving = f.index_up && f.middle_up;

        let action = match self.gate {
            ClickGate::Angle { threshold_deg } => self.angle_gated_action(f, threshold_deg, now_s),
            ClickGate::Pinch { distance, delay_s } => {
                self.pinch_gated_action(f, distance, delay_s, now_s)
            }
        };

        self.prev_index_up = Some(f.index_up);
        self.prev_middle_up = Some(f.middle_up);

        GestureOutput { moving, action }
    }

    /// Advance one tick with no hand observed.  Never an error; the
    /// configured dropout policy decides whether the one-tick memory
    /// survives.
    pub fn observe_dropout(&mut self) -> GestureOutput {
        if self.dropout == DropoutPolicy::Reset {
            self.prev_index_up = None;
            self.prev_middle_up = None;
        }
        GestureOutput::idle()
    }

    /// Falling-edge clicks gated by the spread angle.  The left-click and
    /// right-click edge conditions are mutually exclusive (each requires
    /// the other finger up), so at most one action per tick.
    fn angle_gated_action(
        &mut self,
        f: &HandFeatures,
        threshold_deg: f64,
        now_s: f64,
    ) -> Option<Action> {
        if self.prev_index_up == Some(true) && !f.index_up && f.middle_up {
            if f.angle_deg > threshold_deg {
                return Some(self.click_with_merge(now_s));
            }
            debug!(
                angle = f.angle_deg,
                threshold = threshold_deg,
                "click edge rejected by angle gate"
            );
        } else if f.index_up && self.prev_middle_up == Some(true) && !f.middle_up {
            return Some(Action::RightClick);
        }
        None
    }

    /// Pinch-proximity clicks under a cooldown.
    fn pinch_gated_action(
        &mut self,
        f: &HandFeatures,
        distance: f64,
        delay_s: f64,
        now_s: f64,
    ) -> Option<Action> {
        let cooled = self
            .last_pinch_s
            .map_or(true, |t| now_s - t >= delay_s);
        if !cooled {
            return None;
        }
        if f.pinch_thumb_index < distance {
            self.last_pinch_s = Some(now_s);
            Some(self.click_with_merge(now_s))
        } else if f.pinch_thumb_middle < distance {
            self.last_pinch_s = Some(now_s);
            Some(Action::RightClick)
        } else {
            None
        }
    }

    /// Resolve a qualifying click against the debounce clock: a second
    /// click within the interval upgrades to a double click.
    fn click_with_merge(&mut self, now_s: f64) -> Action {
        let merged = self
            .last_click_s
            .is_some_and(|t| now_s - t < self.double_click_interval_s);
        self.last_click_s = Some(now_s);
        if merged {
            Action::DoubleClick
        } else {
            Action::Click
        }
    }
}

// ── Test helpers ───────────────────────────────────────────

#[cfg(test)]
fn features(index_up: bool, middle_up: bool, angle_deg: f64) -> HandFeatures {
    HandFeatures {
        index_up,
        middle_up,
        angle_deg,
        pinch_thumb_index: 300.0,
        pinch_thumb_middle: 300.0,
    }
}

#[cfg(test)]
fn pinch_features(thumb_index: f64, thumb_middle: f64) -> HandFeatures {
    HandFeatures {
        index_up: false,
        middle_up: false,
        angle_deg: 0.0,
        pinch_thumb_index: thumb_index,
        pinch_thumb_middle: thumb_middle,
    }
}

#[cfg(test)]
fn angle_machine() -> GestureMachine {
    GestureMachine::new(
        ClickGate::Angle {
            threshold_deg: 33.5,
        },
        DropoutPolicy::Hold,
        0.4,
    )
}

// ── Tests ──────────────────────────────────────────────────
