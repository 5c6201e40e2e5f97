//! Parametric heart glyph.
//!
//! The unit curve is
//! `x(t) = sin³ t`, `y(t) = -(13 cos t - 5 cos 2t - 2 cos 3t - cos 4t) / 16`,
//! sampled at fixed angular steps and filled as a polygon.

use crate::canvas::Canvas;
use image::Rgba;

/// Angular distance between two samples, in degrees.
pub const HEART_STEP_DEGREES: usize = 2;

/// Point of the unit heart at angle `t` (radians). Both coordinates lie in
/// roughly `[-1, 1]`; the lobes point up (negative y).
pub fn unit_heart(t: f64) -> (f64, f64) {
    let x = t.sin().powi(3);
    let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos())
        / 16.0;
    (x, y)
}

/// Samples the heart every [`HEART_STEP_DEGREES`] over a full turn, scaled so
/// the glyph is about `size` pixels wide and centered on `(cx, cy)`.
pub fn heart_points(cx: f64, cy: f64, size: f64) -> Vec<(f64, f64)> {
    let scale = size / 2.0;
    (0..360)
        .step_by(HEART_STEP_DEGREES)
        .map(|degrees| {
            let (x, y) = unit_heart((degrees as f64).to_radians());
            (cx + x * scale, cy + y * scale)
        })
        .collect()
}

pub fn draw_heart(canvas: &mut Canvas, cx: i32, cy: i32, size: u32, color: Rgba<u8>) {
    let points = heart_points(cx as f64, cy as f64, size as f64);
    canvas.fill_polygon(&points, color);
}
