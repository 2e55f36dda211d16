//! Pointer-follow state for the two mascot eyes.
//! Pure bookkeeping: the component feeds it measured geometry and pointer
//! positions, it hands back the offsets to write. Holds no DOM handles, so
//! the whole lifecycle runs in native tests.

use crate::model::{MAX_PUPIL_DISTANCE, MIN_PUPIL_DISTANCE, Point, pupil_offset};
use crate::util::cwarn;

/// Socket centers for both eyes, in page pixels. Stale after any
/// layout-affecting change until recomputed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeAnchors {
    pub left: Point,
    pub right: Point,
}

/// One displacement per eye, ready to be written as transforms.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OffsetPair {
    pub left: Point,
    pub right: Point,
}

/// Lifecycle: created at mount, mutated per input event, marked inert on
/// teardown or when a required element is missing. Every method is a no-op
/// once inert.
pub struct PupilTracker {
    valid: bool,
    anchors: Option<EyeAnchors>,
    /// Originally captured static offsets; the reset target.
    rest: OffsetPair,
    /// Last offsets handed out; fallback when a candidate is malformed.
    last: OffsetPair,
}

impl PupilTracker {
    pub fn new() -> Self {
        Self {
            valid: true,
            anchors: None,
            rest: OffsetPair::default(),
            last: OffsetPair::default(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Missing-collaborator failure or explicit teardown. Idempotent.
    pub fn mark_inert(&mut self) {
        self.valid = false;
    }

    /// Record the pre-existing static offsets captured at initialization.
    /// They double as the first applied offsets, so seed `last` with them.
    pub fn set_rest(&mut self, rest: OffsetPair) {
        if !self.valid {
            return;
        }
        self.rest = rest;
        self.last = rest;
    }

    /// Fresh socket geometry (initialization, resize, scroll). Does not move
    /// the displayed offsets.
    pub fn set_anchors(&mut self, anchors: EyeAnchors) {
        if !self.valid {
            return;
        }
        self.anchors = Some(anchors);
    }

    pub fn last_applied(&self) -> OffsetPair {
        self.last
    }

    /// New pointer/touch position. Returns the offsets to apply, or `None`
    /// when there is nothing to do: inert, geometry not yet measured, or a
    /// non-finite position (previous offsets stay in place).
    pub fn pointer_moved(&mut self, target: Point) -> Option<OffsetPair> {
        if !self.valid {
            return None;
        }
        let anchors = self.anchors?;
        if !target.is_finite() {
            cwarn("pupil tracker: non-finite pointer position, keeping last offsets");
            return None;
        }
        let pair = OffsetPair {
            left: pupil_offset(anchors.left, target, MAX_PUPIL_DISTANCE, MIN_PUPIL_DISTANCE),
            right: pupil_offset(anchors.right, target, MAX_PUPIL_DISTANCE, MIN_PUPIL_DISTANCE),
        };
        self.last = pair;
        Some(pair)
    }

    /// Pointer left / touch ended: back to the captured rest offsets.
    pub fn reset(&mut self) -> Option<OffsetPair> {
        if !self.valid {
            return None;
        }
        self.last = self.rest;
        Some(self.rest)
    }

    /// Replace any malformed side of `candidate` with that side's last good
    /// offset before it reaches the DOM.
    pub fn sanitize(&self, candidate: OffsetPair) -> OffsetPair {
        let mut pair = candidate;
        if !pair.left.is_finite() {
            cwarn("pupil tracker: malformed left offset, reusing last good value");
            pair.left = self.last.left;
        }
        if !pair.right.is_finite() {
            cwarn("pupil tracker: malformed right offset, reusing last good value");
            pair.right = self.last.right;
        }
        pair
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors() -> EyeAnchors {
        EyeAnchors {
            left: Point::new(100.0, 100.0),
            right: Point::new(160.0, 100.0),
        }
    }

    fn magnitude(p: Point) -> f64 {
        (p.x * p.x + p.y * p.y).sqrt()
    }

    #[test]
    fn pointer_before_geometry_is_a_noop() {
        let mut t = PupilTracker::new();
        assert_eq!(t.pointer_moved(Point::new(10.0, 10.0)), None);
        assert_eq!(t.last_applied(), OffsetPair::default());
    }

    #[test]
    fn pointer_moves_stay_in_annulus_and_update_last_good() {
        let mut t = PupilTracker::new();
        t.set_anchors(anchors());
        let pair = t.pointer_moved(Point::new(110.0, 100.0)).unwrap();
        assert!((pair.left.x - 10.0).abs() < 1e-12 && pair.left.y.abs() < 1e-12);
        // Right eye is 50px away from the target, clamped to the cap.
        assert!((magnitude(pair.right) - MAX_PUPIL_DISTANCE).abs() < 1e-9);
        assert_eq!(t.last_applied(), pair);
    }

    #[test]
    fn non_finite_pointer_holds_last_offsets() {
        let mut t = PupilTracker::new();
        t.set_anchors(anchors());
        let good = t.pointer_moved(Point::new(120.0, 90.0)).unwrap();
        assert_eq!(t.pointer_moved(Point::new(f64::NAN, 90.0)), None);
        assert_eq!(t.last_applied(), good);
    }

    #[test]
    fn reset_restores_rest_after_any_sequence_of_moves() {
        let rest = OffsetPair {
            left: Point::new(4.0, 6.0),
            right: Point::new(4.0, 6.0),
        };
        let mut t = PupilTracker::new();
        t.set_rest(rest);
        t.set_anchors(anchors());
        t.pointer_moved(Point::new(300.0, 12.0));
        t.pointer_moved(Point::new(101.0, 100.0));
        assert_eq!(t.reset(), Some(rest));
        assert_eq!(t.last_applied(), rest);
    }

    #[test]
    fn reset_without_captured_rest_centers_the_pupils() {
        let mut t = PupilTracker::new();
        t.set_anchors(anchors());
        t.pointer_moved(Point::new(180.0, 140.0));
        assert_eq!(t.reset(), Some(OffsetPair::default()));
    }

    #[test]
    fn anchor_refresh_leaves_displayed_offsets_until_next_move() {
        let mut t = PupilTracker::new();
        t.set_anchors(anchors());
        let before = t.pointer_moved(Point::new(110.0, 100.0)).unwrap();
        t.set_anchors(EyeAnchors {
            left: Point::new(110.0, 100.0),
            right: Point::new(170.0, 100.0),
        });
        assert_eq!(t.last_applied(), before);
        // The next move resolves against the fresh geometry: target now
        // coincides with the left anchor.
        let after = t.pointer_moved(Point::new(110.0, 100.0)).unwrap();
        assert_eq!(after.left, Point::ZERO);
    }

    #[test]
    fn sanitize_substitutes_per_side() {
        let mut t = PupilTracker::new();
        t.set_anchors(anchors());
        let good = t.pointer_moved(Point::new(120.0, 110.0)).unwrap();
        let patched = t.sanitize(OffsetPair {
            left: Point::new(f64::NAN, 0.0),
            right: Point::new(1.0, -1.0),
        });
        assert_eq!(patched.left, good.left);
        assert_eq!(patched.right, Point::new(1.0, -1.0));
    }

    #[test]
    fn inert_tracker_absorbs_everything() {
        let mut t = PupilTracker::new();
        t.set_anchors(anchors());
        t.mark_inert();
        t.mark_inert();
        assert!(!t.is_valid());
        assert_eq!(t.pointer_moved(Point::new(110.0, 100.0)), None);
        assert_eq!(t.reset(), None);
        t.set_rest(OffsetPair {
            left: Point::new(9.0, 9.0),
            right: Point::new(9.0, 9.0),
        });
        assert_eq!(t.last_applied(), OffsetPair::default());
    }
}
