pub mod theme;
pub mod tracker;

pub use theme::{SchemeSource, ThemeState};
pub use tracker::{EyeAnchors, OffsetPair, PupilTracker};
