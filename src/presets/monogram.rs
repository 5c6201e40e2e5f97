//! Pink monogram: a ringed disk carrying the "LD" initials, and a splash
//! screen with a vertical gradient, the same disk and the app title.

use crate::canvas::{Canvas, PixelBox};
use crate::paint::{fill_vertical_gradient, parse_color, splash_gradient_color, WHITE};
use crate::text::FontSource;
use anyhow::Result;

const BACKGROUND: &str = "#FF69B4";
const DISK: &str = "#FF1493";

const MONOGRAM: &str = "LD";
const TITLE: &str = "Ngày Quan Trọng";

const SPLASH_DISK_RADIUS: i32 = 200;
const SPLASH_RING_WIDTH: u32 = 10;
const SPLASH_MONOGRAM_PX: u32 = 100;
const SPLASH_TITLE_PX: u32 = 80;
/// Lift of the monogram above the disk center on the splash screen.
const SPLASH_MONOGRAM_LIFT: i32 = 20;
/// Gap between the bottom of the disk and the top of the title.
const SPLASH_TITLE_GAP: i32 = 100;

pub fn render_icon(size: u32, font: &FontSource) -> Result<Canvas> {
    let mut canvas = Canvas::opaque(size, size, parse_color(BACKGROUND, 255)?);
    let s = size as i32;

    let margin = s / 4;
    let disk = PixelBox::new(margin, margin, s - margin, s - margin);
    canvas.fill_ellipse(disk, parse_color(DISK, 255)?);
    canvas.stroke_ellipse(disk, size / 20, WHITE);

    let face = font.sized(size / 3);
    let bounds = face.bounds(MONOGRAM);
    let x = (s - bounds.width()).div_euclid(2);
    let y = (s - bounds.height()).div_euclid(2) - s / 20;
    face.draw(&mut canvas, x, y, MONOGRAM, WHITE);

    Ok(canvas)
}

pub fn render_splash(width: u32, height: u32, font: &FontSource) -> Result<Canvas> {
    let mut canvas = Canvas::opaque(width, height, WHITE);
    fill_vertical_gradient(&mut canvas, splash_gradient_color);

    let cx = (width / 2) as i32;
    let cy = (height / 2) as i32;
    let disk = PixelBox::around(cx, cy, SPLASH_DISK_RADIUS);
    canvas.fill_ellipse(disk, parse_color(DISK, 255)?);
    canvas.stroke_ellipse(disk, SPLASH_RING_WIDTH, WHITE);

    let face = font.sized(SPLASH_MONOGRAM_PX);
    let (x, y) = face.centered_origin(MONOGRAM, cx, cy);
    face.draw(&mut canvas, x, y - SPLASH_MONOGRAM_LIFT, MONOGRAM, WHITE);

    let face = font.sized(SPLASH_TITLE_PX);
    let bounds = face.bounds(TITLE);
    face.draw(
        &mut canvas,
        cx - bounds.width().div_euclid(2),
        cy + SPLASH_DISK_RADIUS + SPLASH_TITLE_GAP,
        TITLE,
        WHITE,
    );

    Ok(canvas)
}
