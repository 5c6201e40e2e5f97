//! Flat placeholders: a solid background with a white label in the middle.

use super::{AssetEntry, Role};
use crate::canvas::Canvas;
use crate::paint::WHITE;
use crate::text::FontSource;
use anyhow::Result;
use image::Rgba;

const BLUE: Rgba<u8> = Rgba([74, 144, 226, 255]);

fn background(role: Role) -> Rgba<u8> {
    match role {
        Role::Splash => WHITE,
        _ => BLUE,
    }
}

fn label(role: Role) -> &'static str {
    match role {
        Role::Splash => "Love Date",
        Role::NotificationIcon => "🔔",
        Role::Icon | Role::AdaptiveIcon | Role::Favicon => "❤️",
    }
}

pub fn render(entry: &AssetEntry, font: &FontSource) -> Result<Canvas> {
    let mut canvas = Canvas::opaque(entry.width, entry.height, background(entry.role));

    let text = label(entry.role);
    let face = font.sized(entry.width / 10);
    let bounds = face.bounds(text);
    let x = (entry.width as i32 - bounds.width()).div_euclid(2);
    let y = (entry.height as i32 - bounds.height()).div_euclid(2);
    face.draw(&mut canvas, x, y, text, WHITE);

    Ok(canvas)
}
