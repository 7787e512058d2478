//! Hand landmark data model — normalized 3-D keypoints indexed by
//! anatomical id, one observation per camera frame.
//!
//! Landmark ids follow the common 21-point hand topology:
//! 0 = wrist, 4 = thumb tip, 6/8 = index PIP/tip, 10/12 = middle PIP/tip.

use tracing::debug;

/// Total number of landmarks per hand observation.
pub const LANDMARK_COUNT: usize = 21;

// ── Anatomical landmark ids ────────────────────────────────

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;

// ── Landmark ───────────────────────────────────────────────

/// A normalized 3-D keypoint. `x` and `y` are fractions of the frame
/// width/height in `[0, 1]`; `z` is depth relative to the wrist, unbounded.
/// Smaller `y` is higher in the frame (image coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

// ── Hand observation ───────────────────────────────────────

/// One hand's full landmark set for a single frame.  Immutable once
/// built; discarded after one engine tick.
#[derive(Debug, Clone)]
pub struct HandObservation {
    landmarks: Vec<Landmark>,
}

impl HandObservation {
    /// Build an observation from a landmark list.  Returns `None` if the
    /// list does not contain exactly [`LANDMARK_COUNT`] entries.
    pub fn from_landmarks(landmarks: Vec<Landmark>) -> Option<Self> {
        if landmarks.len() != LANDMARK_COUNT {
            debug!(
                "hand observation: expected {} landmarks, got {}",
                LANDMARK_COUNT,
                landmarks.len(),
            );
            return None;
        }
        Some(Self { landmarks })
    }

    /// Landmark by anatomical id.
    pub fn get(&self, id: usize) -> &Landmark {
        &self.landmarks[id]
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_landmarks_valid() {
        let landmarks = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        let obs = HandObservation::from_landmarks(landmarks);
        assert!(obs.is_some());
    }

    #[test]
    fn test_from_landmarks_wrong_count() {
        assert!(HandObservation::from_landmarks(vec![Landmark::new(0.0, 0.0, 0.0); 10]).is_none());
        assert!(HandObservation::from_landmarks(Vec::new()).is_none());
    }

    #[test]
    fn test_get_by_id() {
        let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        landmarks[INDEX_TIP] = Landmark::new(0.1, 0.2, 0.3);
        let obs = HandObservation::from_landmarks(landmarks).unwrap();
        let tip = obs.get(INDEX_TIP);
        assert!((tip.x - 0.1).abs() < f64::EPSILON);
        assert!((tip.y - 0.2).abs() < f64::EPSILON);
        assert!((tip.z - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_id_constants() {
        assert_eq!(WRIST, 0);
        assert_eq!(THUMB_TIP, 4);
        assert_eq!(INDEX_PIP, 6);
        assert_eq!(INDEX_TIP, 8);
        assert_eq!(MIDDLE_PIP, 10);
        assert_eq!(MIDDLE_TIP, 12);
    }
}
