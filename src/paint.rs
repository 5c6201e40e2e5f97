//! Colors and the two gradient approximations.

use crate::canvas::{Canvas, PixelBox};
use anyhow::{anyhow, Result};
use image::Rgba;
use std::str::FromStr;

/// Number of disks stacked to approximate the radial gradient.
pub const RADIAL_STEPS: u32 = 100;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Parses a CSS color (`#ff6b9d`, `hotpink`, `rgb(...)`) into an
/// RGBA pixel with the given alpha.
pub fn parse_color(color: &str, alpha: u8) -> Result<Rgba<u8>> {
    let srgb = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow!("Invalid color: {color}"))?;
    Ok(Rgba([
        (srgb.red * 255.).round() as u8,
        (srgb.green * 255.).round() as u8,
        (srgb.blue * 255.).round() as u8,
        alpha,
    ]))
}

/// Color at `step` of `steps` between `start` and `end`:
/// `start + (end - start) * step / steps` per channel, truncated.
pub fn lerp_color(start: Rgba<u8>, end: Rgba<u8>, step: u32, steps: u32) -> Rgba<u8> {
    if steps == 0 {
        return start;
    }
    let t = step as f64 / steps as f64;
    let channel = |c: usize| {
        let s = start[c] as f64;
        let e = end[c] as f64;
        (s + (e - s) * t) as u8
    };
    Rgba([channel(0), channel(1), channel(2), channel(3)])
}

/// Radius of disk `step` in a radial gradient over a `size`-wide canvas.
pub fn radial_step_radius(size: u32, step: u32, steps: u32) -> i32 {
    (size as f64 / 2.0 * (1.0 - step as f64 / steps as f64)) as i32
}

/// Approximates a radial gradient by stacking `steps` concentric disks,
/// largest first, each a solid color. Stops once the radius drops below one
/// pixel. The banding is intentional.
pub fn fill_radial_gradient(canvas: &mut Canvas, start: Rgba<u8>, end: Rgba<u8>, steps: u32) {
    let size = canvas.width().min(canvas.height());
    let center = (size / 2) as i32;
    let opaque = |c: Rgba<u8>| Rgba([c[0], c[1], c[2], 255]);

    for step in 0..steps {
        let color = opaque(lerp_color(start, end, step, steps));
        let radius = radial_step_radius(size, step, steps);
        if radius < 1 {
            break;
        }
        canvas.fill_ellipse(PixelBox::around(center, center, radius), color);
    }
}

/// Scanline color of the splash backdrop at row `y` of `height` rows.
pub fn splash_gradient_color(y: u32, height: u32) -> Rgba<u8> {
    let t = y as f64 / height as f64;
    Rgba([(255.0 - t * 50.0) as u8, (105.0 + t * 50.0) as u8, 180, 255])
}

/// Paints each row with a single color from `color_at(y, height)`, one
/// horizontal line per row.
pub fn fill_vertical_gradient<F>(canvas: &mut Canvas, color_at: F)
where
    F: Fn(u32, u32) -> Rgba<u8>,
{
    let width = canvas.width() as i32;
    let height = canvas.height();
    for y in 0..height {
        canvas.hline(y as i32, 0, width, color_at(y, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(
            parse_color("#FF6B9D", 255).unwrap(),
            Rgba([255, 107, 157, 255])
        );
        assert_eq!(
            parse_color("#c06c84", 100).unwrap(),
            Rgba([192, 108, 132, 100])
        );
        assert!(parse_color("not-a-color", 255).is_err());
    }

    #[test]
    fn test_lerp_endpoints() {
        let start = Rgba([255, 107, 157, 255]);
        let end = Rgba([192, 108, 132, 255]);

        assert_eq!(lerp_color(start, end, 0, RADIAL_STEPS), start);

        let last = lerp_color(start, end, RADIAL_STEPS - 1, RADIAL_STEPS);
        for c in 0..3 {
            let diff = (last[c] as i32 - end[c] as i32).abs();
            let span = (start[c] as i32 - end[c] as i32).abs();
            assert!(diff <= span / RADIAL_STEPS as i32 + 1, "channel {c}: {last:?}");
        }
        assert_eq!(lerp_color(start, end, RADIAL_STEPS, RADIAL_STEPS), end);
    }

    #[test]
    fn test_lerp_truncates() {
        // 255 + (192 - 255) * 1 / 100 = 254.37
        let c = lerp_color(Rgba([255, 0, 0, 255]), Rgba([192, 0, 0, 255]), 1, 100);
        assert_eq!(c[0], 254);
    }

    #[test]
    fn test_radial_radius_shrinks_to_zero() {
        assert_eq!(radial_step_radius(1024, 0, 100), 512);
        assert_eq!(radial_step_radius(1024, 50, 100), 256);
        assert_eq!(radial_step_radius(48, 99, 100), 0);
    }

    #[test]
    fn test_radial_gradient_banding() {
        let start = Rgba([255, 107, 157, 255]);
        let end = Rgba([192, 108, 132, 255]);
        let mut canvas = Canvas::transparent(200, 200);
        fill_radial_gradient(&mut canvas, start, end, RADIAL_STEPS);

        // Corners lie outside the largest disk.
        assert_eq!(canvas.pixel(0, 0), Some(Rgba([0, 0, 0, 0])));
        // The outer ring keeps the start color.
        assert_eq!(canvas.pixel(0, 100), Some(start));
        // The center is painted by the last disk that still has a radius.
        let center = canvas.pixel(100, 100).unwrap();
        assert_eq!(center, lerp_color(start, end, 99, RADIAL_STEPS));
    }

    #[test]
    fn test_splash_gradient_rows() {
        assert_eq!(splash_gradient_color(0, 2688), Rgba([255, 105, 180, 255]));
        let bottom = splash_gradient_color(2687, 2688);
        assert_eq!(bottom, Rgba([205, 154, 180, 255]));
    }

    #[test]
    fn test_vertical_gradient_fills_every_row() {
        let mut canvas = Canvas::opaque(12, 40, WHITE);
        fill_vertical_gradient(&mut canvas, splash_gradient_color);
        for y in 0..40 {
            let expected = splash_gradient_color(y, 40);
            assert_eq!(canvas.pixel(0, y as i32), Some(expected));
            assert_eq!(canvas.pixel(11, y as i32), Some(expected));
        }
    }
}
