//! Body profile: width and skin colour as pure functions of segment index.

use crate::color::hex;
use crate::config::SEGMENT_COUNT;
use crate::types::Color;

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Half-width of the body at segment `i`.
///
/// Piecewise linear over the anatomical bands: head build-up, neck taper,
/// shoulder, belly plateau, hip taper, tail, tail tip.
pub fn width_at(i: usize) -> f64 {
    let f = i as f64;
    match i {
        0..3 => lerp(8.0, 20.0, f / 3.0),
        3..7 => lerp(20.0, 13.0, (f - 3.0) / 4.0),
        7..15 => lerp(13.0, 18.0, (f - 7.0) / 8.0),
        15..30 => lerp(18.0, 20.0, (f - 15.0) / 15.0),
        30..40 => lerp(20.0, 11.0, (f - 30.0) / 10.0),
        40..50 => lerp(11.0, 5.0, (f - 40.0) / 10.0),
        _ => lerp(5.0, 0.8, (f - 50.0) / (SEGMENT_COUNT as f64 - 50.0)),
    }
}

/// Skin colour anchors keyed by normalised position along the body.
pub const SKIN_ANCHORS: [(f64, Color); 6] = [
    (0.0, hex(0x5a7a3a)), // head
    (0.1, hex(0x4a6e30)), // neck
    (0.3, hex(0x6b8c45)), // torso
    (0.5, hex(0x527838)),
    (0.7, hex(0x3d5e28)), // hips
    (1.0, hex(0x243518)), // tail tip
];

/// Skin colour at segment `i`, blended between the bracketing anchors.
pub fn skin_color_at(i: usize) -> Color {
    let t = i as f64 / SEGMENT_COUNT as f64;
    SKIN_ANCHORS
        .windows(2)
        .find(|pair| pair[0].0 <= t && t <= pair[1].0)
        .map(|pair| {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            c0.blend(c1, (t - t0) / (t1 - t0))
        })
        .unwrap_or(SKIN_ANCHORS[SKIN_ANCHORS.len() - 1].1)
}
