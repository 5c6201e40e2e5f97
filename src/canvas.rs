//! In-memory pixel buffer and the drawing primitives the presets use.
//!
//! Every primitive overwrites covered pixels with its color, alpha included
//! (painter's algorithm, last write wins). Text is the one exception and is
//! blended by glyph coverage. Geometry outside the canvas is clipped; empty or
//! inverted geometry draws nothing.

use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, DynamicImage, ImageEncoder, Rgba, RgbaImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// An inclusive pixel box `[x0, y0, x1, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelBox {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box of a circle of `radius` around `(cx, cy)`, as `[cx - r, cy - r, cx + r, cy + r]`.
    pub const fn around(cx: i32, cy: i32, radius: i32) -> Self {
        Self::new(cx - radius, cy - radius, cx + radius, cy + radius)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }

    pub fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }
}

pub struct Canvas {
    pixels: RgbaImage,
    opaque: bool,
}

impl Canvas {
    /// An opaque canvas filled with `background`; serialized as RGB.
    pub fn opaque(width: u32, height: u32, background: Rgba<u8>) -> Self {
        let background = Rgba([background[0], background[1], background[2], 255]);
        Self {
            pixels: RgbaImage::from_pixel(width, height, background),
            opaque: true,
        }
    }

    /// A fully transparent canvas; serialized as RGBA.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
            opaque: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[cfg(test)]
    pub(crate) fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        if self.in_bounds(x, y) {
            Some(*self.pixels.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    fn color_for(&self, color: Rgba<u8>) -> Rgba<u8> {
        if self.opaque {
            Rgba([color[0], color[1], color[2], 255])
        } else {
            color
        }
    }

    /// Fills the clipped span `x0..=x1` of row `y`.
    fn span(&mut self, y: i32, x0: i32, x1: i32, color: Rgba<u8>) {
        if y < 0 || y as u32 >= self.height() {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(self.width() as i32 - 1);
        for x in x0..=x1 {
            self.pixels.put_pixel(x as u32, y as u32, color);
        }
    }

    /// One-pixel-tall horizontal line from `x0` to `x1` inclusive.
    pub fn hline(&mut self, y: i32, x0: i32, x1: i32, color: Rgba<u8>) {
        let color = self.color_for(color);
        self.span(y, x0.min(x1), x0.max(x1), color);
    }

    pub fn fill_rect(&mut self, bounds: PixelBox, color: Rgba<u8>) {
        if bounds.is_empty() {
            return;
        }
        let color = self.color_for(color);
        let y0 = bounds.y0.max(0);
        let y1 = bounds.y1.min(self.height() as i32 - 1);
        for y in y0..=y1 {
            self.span(y, bounds.x0, bounds.x1, color);
        }
    }

    /// Fills the ellipse inscribed in `bounds`.
    pub fn fill_ellipse(&mut self, bounds: PixelBox, color: Rgba<u8>) {
        let Some(ellipse) = Ellipse::inscribed(bounds) else {
            return;
        };
        let color = self.color_for(color);
        let y0 = bounds.y0.max(0);
        let y1 = bounds.y1.min(self.height() as i32 - 1);
        for y in y0..=y1 {
            if let Some((xs, xe)) = ellipse.row_span(y, 0.0) {
                self.span(y, xs, xe, color);
            }
        }
    }

    /// Draws an outline of `width` pixels just inside the ellipse inscribed in
    /// `bounds`. A zero width draws nothing.
    pub fn stroke_ellipse(&mut self, bounds: PixelBox, width: u32, color: Rgba<u8>) {
        if width == 0 {
            return;
        }
        let Some(ellipse) = Ellipse::inscribed(bounds) else {
            return;
        };
        let color = self.color_for(color);
        let inset = width as f64;
        let y0 = bounds.y0.max(0);
        let y1 = bounds.y1.min(self.height() as i32 - 1);
        for y in y0..=y1 {
            let Some((xs, xe)) = ellipse.row_span(y, 0.0) else {
                continue;
            };
            match ellipse.row_span(y, inset) {
                Some((is, ie)) => {
                    self.span(y, xs, is - 1, color);
                    self.span(y, ie + 1, xe, color);
                }
                None => self.span(y, xs, xe, color),
            }
        }
    }

    /// Fills a rectangle whose four corners are rounded with `radius`.
    ///
    /// The radius is clamped to half the shorter side; zero gives a plain
    /// rectangle.
    pub fn fill_rounded_rect(&mut self, bounds: PixelBox, radius: u32, color: Rgba<u8>) {
        if bounds.is_empty() {
            return;
        }
        let w = (bounds.x1 - bounds.x0 + 1) as f64;
        let h = (bounds.y1 - bounds.y0 + 1) as f64;
        let r = (radius as f64).min(w / 2.0).min(h / 2.0);
        if r <= 0.0 {
            self.fill_rect(bounds, color);
            return;
        }

        let color = self.color_for(color);
        let top = bounds.y0 as f64;
        let bottom = (bounds.y1 + 1) as f64;
        let left = bounds.x0 as f64;
        let right = (bounds.x1 + 1) as f64;

        let y0 = bounds.y0.max(0);
        let y1 = bounds.y1.min(self.height() as i32 - 1);
        for y in y0..=y1 {
            let py = y as f64 + 0.5;
            let dy = if py < top + r {
                top + r - py
            } else if py > bottom - r {
                py - (bottom - r)
            } else {
                0.0
            };
            let inset = if dy > 0.0 {
                r - (r * r - dy * dy).max(0.0).sqrt()
            } else {
                0.0
            };
            let xs = (left + inset - 0.5).ceil() as i32;
            let xe = (right - inset - 0.5).floor() as i32;
            if xs <= xe {
                self.span(y, xs, xe, color);
            }
        }
    }

    /// Even-odd scanline fill of the closed polygon through `points`, sampled
    /// at pixel centers.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgba<u8>) {
        if points.len() < 3 || points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return;
        }
        let color = self.color_for(color);

        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let y0 = ((min_y - 0.5).ceil() as i32).max(0);
        let y1 = ((max_y - 0.5).floor() as i32).min(self.height() as i32 - 1);

        let mut crossings: Vec<f64> = Vec::with_capacity(8);
        for y in y0..=y1 {
            let py = y as f64 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.1 <= py && py < b.1) || (b.1 <= py && py < a.1) {
                    crossings.push(a.0 + (py - a.1) * (b.0 - a.0) / (b.1 - a.1));
                }
            }
            crossings.sort_by(|l, r| l.total_cmp(r));
            for pair in crossings.chunks_exact(2) {
                let xs = (pair[0] - 0.5).ceil() as i32;
                let xe = (pair[1] - 0.5).ceil() as i32 - 1;
                if xs <= xe {
                    self.span(y, xs, xe, color);
                }
            }
        }
    }

    /// Mixes `color` into the pixel at `(x, y)` by `coverage` in `[0, 1]`.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
        if !self.in_bounds(x, y) || coverage <= 0.0 {
            return;
        }
        let coverage = coverage.min(1.0);
        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        let src_alpha = color[3] as f32 / 255.0 * coverage;
        for c in 0..3 {
            dst[c] = (color[c] as f32 * src_alpha + dst[c] as f32 * (1.0 - src_alpha)).round() as u8;
        }
        if !self.opaque {
            let dst_alpha = dst[3] as f32 / 255.0;
            dst[3] = ((src_alpha + dst_alpha * (1.0 - src_alpha)) * 255.0).round() as u8;
        }
    }

    /// Encodes the canvas as PNG. Opaque canvases are written as RGB.
    pub fn write_png<W: Write>(&self, w: W) -> Result<()> {
        let encoder =
            PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
        if self.opaque {
            let rgb = DynamicImage::ImageRgba8(self.pixels.clone()).into_rgb8();
            encoder.write_image(rgb.as_raw(), self.width(), self.height(), ColorType::Rgb8)?;
        } else {
            encoder.write_image(
                self.pixels.as_raw(),
                self.width(),
                self.height(),
                ColorType::Rgba8,
            )?;
        }
        Ok(())
    }

    /// Writes the canvas to `path`, replacing any existing file.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
        let mut out = BufWriter::new(file);
        self.write_png(&mut out)
            .with_context(|| format!("Failed to write PNG {}", path.display()))?;
        out.flush()?;
        Ok(())
    }
}

/// Ellipse inscribed in an inclusive pixel box, in continuous coordinates.
struct Ellipse {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
}

impl Ellipse {
    fn inscribed(bounds: PixelBox) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }
        let rx = (bounds.x1 - bounds.x0 + 1) as f64 / 2.0;
        let ry = (bounds.y1 - bounds.y0 + 1) as f64 / 2.0;
        Some(Self {
            cx: bounds.x0 as f64 + rx,
            cy: bounds.y0 as f64 + ry,
            rx,
            ry,
        })
    }

    /// Columns of row `y` whose pixel centers fall inside the ellipse shrunk
    /// by `inset` on every side.
    fn row_span(&self, y: i32, inset: f64) -> Option<(i32, i32)> {
        let rx = self.rx - inset;
        let ry = self.ry - inset;
        if rx <= 0.0 || ry <= 0.0 {
            return None;
        }
        let dy = (y as f64 + 0.5 - self.cy) / ry;
        if dy.abs() > 1.0 {
            return None;
        }
        let half = rx * (1.0 - dy * dy).sqrt();
        let xs = (self.cx - half - 0.5).ceil() as i32;
        let xe = (self.cx + half - 0.5).floor() as i32;
        (xs <= xe).then_some((xs, xe))
    }
}
