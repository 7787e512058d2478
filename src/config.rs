//! Static engine configuration — fixed for the process lifetime.

use crate::engine::TrackedPoint;
use crate::gesture::{ClickGate, DropoutPolicy};
use crate::motion::ActiveRegion;

// ── Click gate selector ────────────────────────────────────

/// Which click-recognition policy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    Angle,
    Pinch,
}

impl GateMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "angle" => Some(Self::Angle),
            "pinch" => Some(Self::Pinch),
            _ => None,
        }
    }
}

// ── Engine configuration ───────────────────────────────────

/// The full configuration surface.  Defaults mirror the reference
/// tuning: 640x480 capture, smoothing 7, region (0.2,0.8,0.2,0.8),
/// 33.5 degree spread gate, 0.4 s double-click window.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Camera capture resolution in pixels.
    pub camera_width: f64,
    pub camera_height: f64,
    /// Host display resolution in pixels.
    pub screen_width: f64,
    pub screen_height: f64,
    /// Cursor smoothing divisor; higher means smoother and laggier.
    pub smoothing: f64,
    /// Sub-rectangle of the frame mapped to the full screen.
    pub move_region: ActiveRegion,
    /// Minimum index/middle spread angle for an angle-gated click.
    pub angle_threshold_deg: f64,
    /// Two clicks within this window merge into a double click.
    pub double_click_interval_s: f64,
    /// Pinch distance threshold (scaled normalized units).
    pub click_distance: f64,
    /// Cooldown between pinch-gated clicks.
    pub click_delay_s: f64,
    /// Landmark that drives cursor motion.
    pub tracked_point: TrackedPoint,
    /// Click recognition policy.
    pub gate: GateMode,
    /// What the gesture machine does with its memory on a no-hand tick.
    pub dropout: DropoutPolicy,
    /// Scroll magnitude for voice scroll commands.
    pub scroll_step: i32,
    /// Tick-loop dispatch timeout in milliseconds (paces the demo loop).
    pub poll_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            camera_width: 640.0,
            camera_height: 480.0,
            screen_width: 1920.0,
            screen_height: 1080.0,
            smoothing: 7.0,
            move_region: ActiveRegion::default(),
            angle_threshold_deg: 33.5,
            double_click_interval_s: 0.4,
            click_distance: 40.0,
            click_delay_s: 0.5,
            tracked_point: TrackedPoint::IndexTip,
            gate: GateMode::Angle,
            dropout: DropoutPolicy::Hold,
            scroll_step: 500,
            poll_interval_ms: 33,
        }
    }
}

impl EngineConfig {
    /// The concrete click-gate policy for the gesture machine.
    pub fn click_gate(&self) -> ClickGate {
        match self.gate {
            GateMode::Angle => ClickGate::Angle {
                threshold_deg: self.angle_threshold_deg,
            },
            GateMode::Pinch => ClickGate::Pinch {
                distance: self.click_distance,
                delay_s: self.click_delay_s,
            },
        }
    }

    /// Reject configurations the filters cannot run on.
    pub fn validate(&self) -> Result<(), String> {
        if self.camera_width <= 0.0 || self.camera_height <= 0.0 {
            return Err("camera resolution must be positive".into());
        }
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err("screen resolution must be positive".into());
        }
        if self.smoothing < 1.0 {
            return Err(format!(
                "smoothing must be >= 1.0, got {}",
                self.smoothing,
            ));
        }
        if self.double_click_interval_s < 0.0 || self.click_delay_s < 0.0 {
            return Err("intervals must be non-negative".into());
        }
        Ok(())
    }
}

/// Parse a "WxH" resolution string. Returns (width, height) or None.
pub fn parse_resolution(s: &str) -> Option<(f64, f64)> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return None;
    }
    let w = parts[0].parse::<u32>().ok()?;
    let h = parts[1].parse::<u32>().ok()?;
    if w > 0 && h > 0 {
        Some((w as f64, h as f64))
    } else {
        None
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_smoothing() {
        let config = EngineConfig {
            smoothing: 0.5,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_resolution() {
        let config = EngineConfig {
            camera_width: 0.0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_click_gate_selection() {
        let angle = EngineConfig::default();
        assert!(matches!(angle.click_gate(), ClickGate::Angle { .. }));

        let pinch = EngineConfig {
            gate: GateMode::Pinch,
            ..EngineConfig::default()
        };
        assert!(matches!(pinch.click_gate(), ClickGate::Pinch { .. }));
    }

    #[test]
    fn test_parse_resolution() {
        assert_eq!(parse_resolution("640x480"), Some((640.0, 480.0)));
        assert_eq!(parse_resolution("1920x1080"), Some((1920.0, 1080.0)));
        assert_eq!(parse_resolution("640"), None);
        assert_eq!(parse_resolution("0x480"), None);
        assert_eq!(parse_resolution("640x480x3"), None);
        assert_eq!(parse_resolution("wxh"), None);
    }

    #[test]
    fn test_gate_mode_parse() {
        assert_eq!(GateMode::parse("angle"), Some(GateMode::Angle));
        assert_eq!(GateMode::parse("pinch"), Some(GateMode::Pinch));
        assert_eq!(GateMode::parse("other"), None);
    }
}
