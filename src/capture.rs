//! Pose source seam — where hand observations enter the engine.
//!
//! Camera acquisition and the pose estimator itself are external
//! collaborators; the engine only consumes their output contract: zero or
//! one hand observation per frame.  `ScriptedSource` replays a canned
//! frame sequence for headless/CI runs.

use std::fmt;

use crate::landmark::{
    HandObservation, Landmark, INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_PIP, MIDDLE_TIP,
    THUMB_TIP, WRIST,
};

// ── Errors ─────────────────────────────────────────────────

/// Pose source failures.  Acquisition failure is the engine's only fatal
/// startup error; end-of-stream just ends the tick loop.
#[derive(Debug)]
pub enum CaptureError {
    /// The frame stream is over (camera disconnect, script exhausted).
    EndOfStream,
    /// The capture device could not be acquired or read.
    Acquisition(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfStream => write!(f, "pose source ended"),
            Self::Acquisition(reason) => write!(f, "capture failure: {}", reason),
        }
    }
}

impl std::error::Error for CaptureError {}

// ── Source seam ────────────────────────────────────────────

/// Per-frame observation producer.  `Ok(None)` is a frame with no hand —
/// a normal condition, not an error.
pub trait PoseSource {
    fn next_frame(&mut self) -> Result<Option<HandObservation>, CaptureError>;
}

// ── Synthetic observations ─────────────────────────────────

/// Build a plausible synthetic hand around `(cx, cy)`: wrist below the
/// center, index/middle fingertips above their PIP joints when raised,
/// swung outward and below when lowered (which also widens the spread
/// angle past the click gate), thumb off to the side.  All remaining
/// landmarks sit at the center.
pub fn synthetic_observation(
    cx: f64,
    cy: f64,
    index_up: bool,
    middle_up: bool,
) -> HandObservation {
    let mut landmarks = vec![Landmark::new(cx, cy, 0.0); LANDMARK_COUNT];
    landmarks[WRIST] = Landmark::new(cx, cy + 0.25, 0.0);
    landmarks[THUMB_TIP] = Landmark::new(cx - 0.10, cy + 0.12, 0.0);
    landmarks[INDEX_PIP] = Landmark::new(cx - 0.04, cy, 0.0);
    landmarks[INDEX_TIP] = if index_up {
        Landmark::new(cx - 0.06, cy - 0.12, 0.0)
    } else {
        Landmark::new(cx - 0.18, cy + 0.06, 0.0)
    };
    landmarks[MIDDLE_PIP] = Landmark::new(cx + 0.04, cy, 0.0);
    landmarks[MIDDLE_TIP] = if middle_up {
        Landmark::new(cx + 0.06, cy - 0.12, 0.0)
    } else {
        Landmark::new(cx + 0.18, cy + 0.06, 0.0)
    };
    HandObservation::from_landmarks(landmarks).expect("synthetic landmark count")
}

// ── Scripted source ────────────────────────────────────────

/// Replays a fixed sequence of frames, then reports end-of-stream.
pub struct ScriptedSource {
    frames: Vec<Option<HandObservation>>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(frames: Vec<Option<HandObservation>>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Built-in demo script: sweep the cursor across the active region
    /// with both fingers raised, left click, lose the hand for a few
    /// frames, then right click.
    pub fn demo() -> Self {
        let mut frames: Vec<Option<HandObservation>> = Vec::new();

        // Diagonal sweep through the region, cursor-motion mode active.
        let steps = 40;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let cx = 0.30 + 0.30 * t;
            let cy = 0.25 + 0.25 * t;
            frames.push(Some(synthetic_observation(cx, cy, true, true)));
        }

        // Hold, then drop the index for one frame: a left click.
        for _ in 0..5 {
            frames.push(Some(synthetic_observation(0.60, 0.50, true, true)));
        }
        frames.push(Some(synthetic_observation(0.60, 0.50, false, true)));
        frames.push(Some(synthetic_observation(0.60, 0.50, true, true)));

        // Momentary tracking dropout.
        for _ in 0..3 {
            frames.push(None);
        }

        // Reacquire, then drop the middle finger: a right click.
        for _ in 0..5 {
            frames.push(Some(synthetic_observation(0.60, 0.50, true, true)));
        }
        frames.push(Some(synthetic_observation(0.60, 0.50, true, false)));
        frames.push(Some(synthetic_observation(0.60, 0.50, true, true)));

        Self::new(frames)
    }

    /// Number of frames remaining.
    pub fn remaining(&self) -> usize {
        self.frames.len() - self.cursor
    }
}

impl PoseSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Option<HandObservation>, CaptureError> {
        match self.frames.get(self.cursor) {
            Some(frame) => {
                self.cursor += 1;
                Ok(frame.clone())
            }
            None => Err(CaptureError::EndOfStream),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────
