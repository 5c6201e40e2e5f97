//! Gradient disk with a calendar card, a decorative heart and a notification
//! bell. All proportions are integer fractions of the icon size, so small
//! sizes lose details rather than fail.

use crate::canvas::{Canvas, PixelBox};
use crate::heart::draw_heart;
use crate::paint::{fill_radial_gradient, parse_color, RADIAL_STEPS, WHITE};
use anyhow::Result;
use image::Rgba;

const GRADIENT_START: &str = "#FF6B9D";
const GRADIENT_END: &str = "#C06C84";
const PINK: &str = "#FF6B9D";
const LIGHT_PINK: &str = "#FF8FB1";
const CARD: &str = "#F8E8EE";
const CELL: &str = "#C06C84";
const GOLD: &str = "#FFD700";

const SHADOW: Rgba<u8> = Rgba([0, 0, 0, 60]);
const CELL_ALPHA: u8 = 100;

struct Palette {
    pink: Rgba<u8>,
    light_pink: Rgba<u8>,
    card: Rgba<u8>,
    cell: Rgba<u8>,
    gold: Rgba<u8>,
}

impl Palette {
    fn load() -> Result<Self> {
        Ok(Self {
            pink: parse_color(PINK, 255)?,
            light_pink: parse_color(LIGHT_PINK, 255)?,
            card: parse_color(CARD, 255)?,
            cell: parse_color(CELL, CELL_ALPHA)?,
            gold: parse_color(GOLD, 255)?,
        })
    }
}

/// Draws the logo on a transparent `size`×`size` canvas.
pub fn render(size: u32) -> Result<Canvas> {
    let palette = Palette::load()?;
    let mut canvas = Canvas::transparent(size, size);

    fill_radial_gradient(
        &mut canvas,
        parse_color(GRADIENT_START, 255)?,
        parse_color(GRADIENT_END, 255)?,
        RADIAL_STEPS,
    );

    let s = size as i32;
    draw_calendar(&mut canvas, s, &palette);

    let heart_size = s / 5;
    let heart_x = s / 5;
    let heart_y = s / 5;
    let shadow = s / 100;
    draw_heart(
        &mut canvas,
        heart_x + shadow,
        heart_y + shadow,
        heart_size as u32,
        SHADOW,
    );
    draw_heart(&mut canvas, heart_x, heart_y, heart_size as u32, palette.light_pink);

    draw_bell(&mut canvas, s, &palette);

    Ok(canvas)
}

fn draw_calendar(canvas: &mut Canvas, s: i32, palette: &Palette) {
    let cal_w = s / 2;
    let cal_h = (s as f64 * 0.44) as i32;
    let cal_x = s / 4;
    let cal_y = (s as f64 * 0.31) as i32;
    let corner = (s / 26) as u32;
    let card = PixelBox::new(cal_x, cal_y, cal_x + cal_w, cal_y + cal_h);

    let shadow = s / 80;
    canvas.fill_rounded_rect(card.offset(shadow, shadow), corner, SHADOW);
    canvas.fill_rounded_rect(card, corner, palette.card);

    // Header: rounded on top, square where it meets the body.
    let header_h = cal_h / 4;
    canvas.fill_rounded_rect(
        PixelBox::new(cal_x, cal_y, cal_x + cal_w, cal_y + header_h),
        corner,
        palette.pink,
    );
    canvas.fill_rect(
        PixelBox::new(cal_x, cal_y + s / 40, cal_x + cal_w, cal_y + header_h),
        palette.pink,
    );

    let ring_y = cal_y + header_h / 2;
    let ring_radius = s / 51;
    let ring_width = (s / 85) as u32;
    for ring_x in [
        cal_x + cal_w / 6,
        cal_x + cal_w / 2,
        cal_x + 5 * cal_w / 6,
    ] {
        canvas.stroke_ellipse(
            PixelBox::around(ring_x, ring_y, ring_radius),
            ring_width,
            WHITE,
        );
    }

    let grid_top = cal_y + header_h + s / 40;
    let cell = cal_w / 7;
    let padding = cell / 6;
    let cell_corner = (s / 128) as u32;

    for row in 0..4 {
        // The last row only holds two dates.
        let cols = if row == 3 { 2 } else { 6 };
        for col in 0..cols {
            let x = cal_x + padding + col * (cell + padding);
            let y = grid_top + padding + row * (cell + padding);
            let bounds = PixelBox::new(x, y, x + cell, y + cell);

            if row == 2 && col == 2 {
                canvas.fill_rounded_rect(bounds, cell_corner, palette.pink);
                draw_heart(canvas, x + cell / 2, y + cell / 2, (cell / 4) as u32, WHITE);
            } else {
                canvas.fill_rounded_rect(bounds, cell_corner, palette.cell);
            }
        }
    }
}

fn draw_bell(canvas: &mut Canvas, s: i32, palette: &Palette) {
    let x = (s as f64 * 0.83) as i32;
    let y = (s as f64 * 0.68) as i32;
    let bell = s / 20;
    canvas.fill_ellipse(PixelBox::new(x, y, x + bell, y + bell), WHITE);

    let badge = s / 40;
    canvas.fill_ellipse(
        PixelBox::new(x + bell - badge, y, x + bell, y + badge),
        palette.gold,
    );
}
