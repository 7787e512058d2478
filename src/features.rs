//! Feature extraction — pure geometry over one hand observation.
//!
//! Derives per-finger up/down flags, the inter-finger spread angle, and
//! thumb pinch distances.  Stateless and deterministic; hysteresis and
//! debouncing belong to the gesture state machine, not here.

use crate::landmark::{
    HandObservation, Landmark, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, THUMB_TIP, WRIST,
};

/// Scale factor applied to normalized-space pinch distances to bring them
/// into a pixel-like numeric range.
pub const PINCH_SCALE: f64 = 1000.0;

/// Whether a finger is raised: tip above PIP in image coordinates
/// (smaller `y` is higher in the frame).
pub fn finger_up(tip: &Landmark, pip: &Landmark) -> bool {
    tip.y < pip.y
}

/// Angle in degrees between the vectors `base→a` and `base→b`, in the
/// frame plane.  The cosine is clamped to `[-1, 1]` before `acos` to
/// absorb floating-point overshoot.  Returns `0.0` when either vector has
/// zero magnitude — coincident landmarks are a legitimate transient pose,
/// not an error.
pub fn angle_between(a: &Landmark, b: &Landmark, base: &Landmark) -> f64 {
    let ax = a.x - base.x;
    let ay = a.y - base.y;
    let bx = b.x - base.x;
    let by = b.y - base.y;
    let mag_a = (ax * ax + ay * ay).sqrt();
    let mag_b = (bx * bx + by * by).sqrt();
    if mag_a * mag_b == 0.0 {
        return 0.0;
    }
    let cos = ((ax * bx + ay * by) / (mag_a * mag_b)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// 3-D Euclidean distance between two landmarks in normalized space,
/// scaled by [`PINCH_SCALE`].  Used as a fingertip contact proxy.
pub fn pinch_distance(p: &Landmark, q: &Landmark) -> f64 {
    let dx = q.x - p.x;
    let dy = q.y - p.y;
    let dz = q.z - p.z;
    (dx * dx + dy * dy + dz * dz).sqrt() * PINCH_SCALE
}

// ── Feature bundle ─────────────────────────────────────────

/// Per-tick geometric features consumed by the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFeatures {
    /// Index finger raised (tip above PIP).
    pub index_up: bool,
    /// Middle finger raised (tip above PIP).
    pub middle_up: bool,
    /// Spread angle between index and middle fingertips, from the wrist.
    pub angle_deg: f64,
    /// Scaled thumb-to-index-tip distance.
    pub pinch_thumb_index: f64,
    /// Scaled thumb-to-middle-tip distance.
    pub pinch_thumb_middle: f64,
}

impl HandFeatures {
    /// Extract all features from one observation.
    pub fn extract(obs: &HandObservation) -> Self {
        let wrist = obs.get(WRIST);
        let thumb_tip = obs.get(THUMB_TIP);
        let index_tip = obs.get(INDEX_TIP);
        let middle_tip = obs.get(MIDDLE_TIP);
        Self {
            index_up: finger_up(index_tip, obs.get(INDEX_PIP)),
            middle_up: finger_up(middle_tip, obs.get(MIDDLE_PIP)),
            angle_deg: angle_between(index_tip, middle_tip, wrist),
            pinch_thumb_index: pinch_distance(thumb_tip, index_tip),
            pinch_thumb_middle: pinch_distance(thumb_tip, middle_tip),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::LANDMARK_COUNT;

    fn lm(x: f64, y: f64) -> Landmark {
        Landmark::new(x, y, 0.0)
    }

    #[test]
    fn test_finger_up() {
        assert!(finger_up(&lm(0.5, 0.3), &lm(0.5, 0.4)));
        assert!(!finger_up(&lm(0.5, 0.5), &lm(0.5, 0.4)));
        // Equal heights: not up
        assert!(!finger_up(&lm(0.5, 0.4), &lm(0.5, 0.4)));
    }

    #[test]
    fn test_angle_right_angle() {
        let base = lm(0.0, 0.0);
        let a = lm(1.0, 0.0);
        let b = lm(0.0, 1.0);
        let angle = angle_between(&a, &b, &base);
        assert!((angle - 90.0).abs() < 1e-9, "expected 90, got {}", angle);
    }

    #[test]
    fn test_angle_parallel_and_opposite() {
        let base = lm(0.0, 0.0);
        assert!(angle_between(&lm(1.0, 0.0), &lm(2.0, 0.0), &base).abs() < 1e-9);
        let opposite = angle_between(&lm(1.0, 0.0), &lm(-1.0, 0.0), &base);
        assert!((opposite - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_degenerate_is_zero() {
        let base = lm(0.3, 0.3);
        // a coincides with base: zero-magnitude vector
        assert_eq!(angle_between(&lm(0.3, 0.3), &lm(0.8, 0.8), &base), 0.0);
        assert_eq!(angle_between(&lm(0.8, 0.8), &lm(0.3, 0.3), &base), 0.0);
        assert_eq!(angle_between(&lm(0.3, 0.3), &lm(0.3, 0.3), &base), 0.0);
    }

    #[test]
    fn test_angle_always_in_range() {
        let base = lm(0.5, 0.5);
        let points = [
            lm(0.1, 0.9),
            lm(0.9, 0.1),
            lm(0.5, 0.0),
            lm(0.0, 0.5),
            lm(0.50001, 0.50001),
        ];
        for a in &points {
            for b in &points {
                let angle = angle_between(a, b, &base);
                assert!(
                    (0.0..=180.0).contains(&angle),
                    "angle {} out of range for {:?} / {:?}",
                    angle,
                    a,
                    b,
                );
            }
        }
    }

    #[test]
    fn test_pinch_distance_scaled() {
        let p = Landmark::new(0.5, 0.5, 0.0);
        let q = Landmark::new(0.503, 0.5, 0.0);
        let d = pinch_distance(&p, &q);
        assert!((d - 3.0).abs() < 1e-9, "expected 3.0, got {}", d);
    }

    #[test]
    fn test_pinch_distance_includes_depth() {
        let p = Landmark::new(0.5, 0.5, 0.0);
        let q = Landmark::new(0.5, 0.5, 0.004);
        assert!((pinch_distance(&p, &q) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_extract_deterministic() {
        let mut landmarks = vec![lm(0.5, 0.5); LANDMARK_COUNT];
        landmarks[crate::landmark::WRIST] = lm(0.5, 0.9);
        landmarks[crate::landmark::INDEX_PIP] = lm(0.45, 0.5);
        landmarks[crate::landmark::INDEX_TIP] = lm(0.4, 0.3);
        landmarks[crate::landmark::MIDDLE_PIP] = lm(0.55, 0.5);
        landmarks[crate::landmark::MIDDLE_TIP] = lm(0.6, 0.3);
        landmarks[crate::landmark::THUMB_TIP] = lm(0.3, 0.7);
        let obs = HandObservation::from_landmarks(landmarks).unwrap();

        let f1 = HandFeatures::extract(&obs);
        let f2 = HandFeatures::extract(&obs);
        assert_eq!(f1, f2);
        assert!(f1.index_up);
        assert!(f1.middle_up);
        assert!(f1.angle_deg > 0.0 && f1.angle_deg < 180.0);
        assert!(f1.pinch_thumb_index > 0.0);
    }
}
