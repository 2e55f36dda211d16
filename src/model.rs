//! Core data model for the googly-eyes page.
//! Defines the shared value types, the compiled-in tuning constants and the
//! bounded pupil-offset math everything else is built on.

use serde::{Deserialize, Serialize};

use crate::util::cwarn;

/// Furthest a pupil travels from its socket center, in page pixels.
pub const MAX_PUPIL_DISTANCE: f64 = 12.0;
/// Shortest travel once the pointer sits off-center, in page pixels.
pub const MIN_PUPIL_DISTANCE: f64 = 3.0;
/// Smoothing applied to every pupil transform write.
pub const PUPIL_TRANSITION: &str = "transform 0.15s ease-out";

/// A position or displacement in page pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Payload carried by the `themechange` broadcast.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ThemeChange {
    pub theme: Theme,
}

/// Project `target` onto the annulus `[min_distance, max_distance]` around
/// `anchor` and return the resulting displacement.
///
/// The direction always comes from the raw `target - anchor` vector; only the
/// magnitude is clamped (low first, then high). A zero-length delta has no
/// direction to project along and yields `(0, 0)` even when `min_distance`
/// is positive. Non-finite input never panics: it warns and yields `(0, 0)`.
/// `min_distance <= max_distance` is the caller's obligation.
pub fn pupil_offset(anchor: Point, target: Point, max_distance: f64, min_distance: f64) -> Point {
    if !anchor.is_finite() || !target.is_finite() || !max_distance.is_finite() {
        cwarn("pupil_offset: non-finite input, holding pupil at center");
        return Point::ZERO;
    }

    let dx = target.x - anchor.x;
    let dy = target.y - anchor.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance == 0.0 {
        return Point::ZERO;
    }

    let angle = dy.atan2(dx);
    let constrained = if distance < min_distance {
        min_distance
    } else {
        distance.min(max_distance)
    };
    Point::new(angle.cos() * constrained, angle.sin() * constrained)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magnitude(p: Point) -> f64 {
        (p.x * p.x + p.y * p.y).sqrt()
    }

    #[test]
    fn in_band_target_passes_through_unclamped() {
        let got = pupil_offset(
            Point::new(100.0, 100.0),
            Point::new(110.0, 100.0),
            MAX_PUPIL_DISTANCE,
            MIN_PUPIL_DISTANCE,
        );
        assert!((got.x - 10.0).abs() < 1e-12);
        assert!(got.y.abs() < 1e-12);
    }

    #[test]
    fn coincident_points_stay_centered() {
        assert_eq!(pupil_offset(Point::ZERO, Point::ZERO, 12.0, 3.0), Point::ZERO);
        let p = Point::new(-41.5, 7.25);
        assert_eq!(pupil_offset(p, p, 12.0, 3.0), Point::ZERO);
    }

    #[test]
    fn near_target_pushed_out_to_min_radius() {
        let got = pupil_offset(Point::ZERO, Point::new(1.0, 0.0), 12.0, 3.0);
        assert!((got.x - 3.0).abs() < 1e-12);
        assert!(got.y.abs() < 1e-12);
    }

    #[test]
    fn far_target_saturates_at_max_radius_direction_unchanged() {
        // 3-4-5 direction, scaled arbitrarily far beyond max.
        for scale in [2.0, 10.0, 1000.0] {
            let got = pupil_offset(Point::ZERO, Point::new(30.0 * scale, 40.0 * scale), 12.0, 3.0);
            let mag = magnitude(got);
            assert!((mag - 12.0).abs() < 1e-9);
            assert!((got.x / mag - 0.6).abs() < 1e-9);
            assert!((got.y / mag - 0.8).abs() < 1e-9);
        }
    }

    #[test]
    fn magnitude_lands_in_annulus_and_keeps_raw_angle() {
        let anchor = Point::new(12.0, -3.0);
        for (tx, ty) in [(13.0, -3.0), (20.0, 4.0), (-500.0, 250.0), (12.0, -2.9)] {
            let got = pupil_offset(anchor, Point::new(tx, ty), 12.0, 3.0);
            let mag = magnitude(got);
            assert!(mag >= 3.0 - 1e-9, "magnitude {mag} below floor for ({tx},{ty})");
            assert!(mag <= 12.0 + 1e-9, "magnitude {mag} above cap for ({tx},{ty})");
            let want = (ty - anchor.y).atan2(tx - anchor.x);
            assert!((got.y.atan2(got.x) - want).abs() < 1e-9);
        }
    }

    #[test]
    fn non_finite_inputs_collapse_to_zero() {
        let ok = Point::new(5.0, 5.0);
        assert_eq!(pupil_offset(Point::new(f64::NAN, 0.0), ok, 12.0, 3.0), Point::ZERO);
        assert_eq!(pupil_offset(ok, Point::new(0.0, f64::NAN), 12.0, 3.0), Point::ZERO);
        assert_eq!(pupil_offset(ok, Point::new(f64::INFINITY, 0.0), 12.0, 3.0), Point::ZERO);
        assert_eq!(pupil_offset(Point::ZERO, ok, f64::NAN, 3.0), Point::ZERO);
    }

    #[test]
    fn theme_change_serializes_lowercase() {
        let json = serde_json::to_string(&ThemeChange { theme: Theme::Dark }).unwrap();
        assert_eq!(json, r#"{"theme":"dark"}"#);
        assert_eq!(Theme::from_prefers_dark(false).as_str(), "light");
    }
}
