//! Per-tick translation pipeline — one hand observation in, pointer
//! actions out.
//!
//! Wires the feature extractor, motion mapper, and gesture machine
//! together behind a single `tick` call.  All mutable tick state lives
//! here (or in the owned components), so the pipeline is unit-testable
//! without a camera, a clock, or an output device.

use crate::action::Action;
use crate::config::EngineConfig;
use crate::features::HandFeatures;
use crate::gesture::{GestureMachine, GestureOutput};
use crate::landmark::{HandObservation, INDEX_TIP, WRIST};
use crate::motion::MotionMapper;

// ── Tracked point policy ───────────────────────────────────

/// Which landmark drives cursor motion.  Both are supported policies,
/// selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedPoint {
    IndexTip,
    Wrist,
}

impl TrackedPoint {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "index" => Some(Self::IndexTip),
            "wrist" => Some(Self::Wrist),
            _ => None,
        }
    }

    fn landmark_id(&self) -> usize {
        match self {
            Self::IndexTip => INDEX_TIP,
            Self::Wrist => WRIST,
        }
    }
}

// ── Tick output ────────────────────────────────────────────

/// Actions produced by one engine tick: at most one `MoveTo` followed by
/// at most one click-class action.
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    /// Cursor-motion mode was active this tick.
    pub moving: bool,
    pub actions: Vec<Action>,
}

// ── Engine ─────────────────────────────────────────────────

/// The gesture-to-action translation engine.  Holds every piece of
/// cross-tick state; callers supply observations and timestamps.
pub struct Engine {
    mapper: MotionMapper,
    machine: GestureMachine,
    tracked_point: TrackedPoint,
    frame_w: f64,
    frame_h: f64,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            mapper: MotionMapper::new(
                config.move_region,
                config.camera_width,
                config.camera_height,
                config.screen_width,
                config.screen_height,
                config.smoothing,
            ),
            machine: GestureMachine::new(
                config.click_gate(),
                config.dropout,
                config.double_click_interval_s,
            ),
            tracked_point: config.tracked_point,
            frame_w: config.camera_width,
            frame_h: config.camera_height,
        }
    }

    /// Run one tick.  `None` means no hand was observed this frame — the
    /// discrete state is held per the dropout policy and no motion is
    /// produced; this is not an error.
    pub fn tick(&mut self, observation: Option<&HandObservation>, now_s: f64) -> TickOutput {
        let Some(obs) = observation else {
            self.machine.observe_dropout();
            return TickOutput::default();
        };

        let features = HandFeatures::extract(obs);

        let tracked = obs.get(self.tracked_point.landmark_id());
        let px = tracked.x * self.frame_w;
        let py = tracked.y * self.frame_h;
        let (sx, sy) = self.mapper.update(px, py);

        let GestureOutput { moving, action } = self.machine.update(&features, now_s);

        let mut actions = Vec::new();
        if moving {
            actions.push(Action::MoveTo {
                x: sx.round() as i32,
                y: sy.round() as i32,
            });
        }
        if let Some(action) = action {
            actions.push(action);
        }
        TickOutput { moving, actions }
    }

    /// Current smoothed cursor position in screen pixels.
    pub fn cursor(&self) -> (f64, f64) {
        self.mapper.position()
    }
}

// ── Tests ──────────────────────────────────────────────────
