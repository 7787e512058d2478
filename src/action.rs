//! Pointer action vocabulary and the output sink seam.
//!
//! The engine only ever emits these actions; delivering them to an OS
//! pointer is an external collaborator's job behind [`PointerSink`].

use tracing::{debug, info};

// ── Actions ────────────────────────────────────────────────

/// An instantaneous pointer action.  Idempotent to request — the sink may
/// coalesce, but the engine never emits duplicates for one logical edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Absolute cursor motion in screen pixels.
    MoveTo { x: i32, y: i32 },
    Click,
    DoubleClick,
    RightClick,
    /// Positive scrolls up, negative scrolls down.
    Scroll(i32),
}

impl Action {
    /// Whether this is a discrete click-class action (as opposed to
    /// continuous motion or scrolling).
    pub fn is_click_class(&self) -> bool {
        matches!(self, Self::Click | Self::DoubleClick | Self::RightClick)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoveTo { .. } => "move-to",
            Self::Click => "click",
            Self::DoubleClick => "double-click",
            Self::RightClick => "right-click",
            Self::Scroll(_) => "scroll",
        }
    }
}

// ── Output sink ────────────────────────────────────────────

/// Abstract pointer device.  All calls are non-blocking and
/// fire-and-forget from the engine's perspective; implementations must
/// not introduce artificial delay on the motion path.
pub trait PointerSink {
    fn move_to(&mut self, x: i32, y: i32);
    fn click(&mut self);
    fn double_click(&mut self);
    fn right_click(&mut self);
    fn scroll(&mut self, amount: i32);
}

/// Sink that logs every action via `tracing` — the headless/demo
/// collaborator standing in for OS-level injection.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl PointerSink for LogSink {
    fn move_to(&mut self, x: i32, y: i32) {
        debug!(x, y, "pointer move");
    }

    fn click(&mut self) {
        info!("pointer click");
    }

    fn double_click(&mut self) {
        info!("pointer double click");
    }

    fn right_click(&mut self) {
        info!("pointer right click");
    }

    fn scroll(&mut self, amount: i32) {
        info!(amount, "pointer scroll");
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_class() {
        assert!(Action::Click.is_click_class());
        assert!(Action::DoubleClick.is_click_class());
        assert!(Action::RightClick.is_click_class());
        assert!(!Action::MoveTo { x: 0, y: 0 }.is_click_class());
        assert!(!Action::Scroll(500).is_click_class());
    }

    #[test]
    fn test_as_str() {
        assert_eq!(Action::MoveTo { x: 1, y: 2 }.as_str(), "move-to");
        assert_eq!(Action::Click.as_str(), "click");
        assert_eq!(Action::DoubleClick.as_str(), "double-click");
        assert_eq!(Action::RightClick.as_str(), "right-click");
        assert_eq!(Action::Scroll(-500).as_str(), "scroll");
    }
}
