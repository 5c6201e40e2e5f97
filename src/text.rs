//! Text labels: TrueType rendering through `rusttype`, with the built-in
//! bitmap font standing in whenever the requested font is unavailable.

use crate::bitmap_font::{self, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::canvas::{Canvas, PixelBox};
use anyhow::{anyhow, Context, Result};
use image::Rgba;
use rusttype::{point, Font, Scale};
use std::path::{Path, PathBuf};

/// Directories searched for a bare font file name such as `arial.ttf`.
const FONT_DIRS: &[&str] = &[
    "C:\\Windows\\Fonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "/usr/share/fonts/truetype/msttcorefonts",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/truetype/dejavu",
];

/// Font pixel size that maps to one unit of the bitmap font's scale.
const BITMAP_UNIT: u32 = 8;

/// A font loaded once per run and shared by every label.
pub enum FontSource {
    TrueType(Font<'static>),
    Builtin,
}

impl FontSource {
    /// Loads the TrueType font at `path`, falling back to the built-in font
    /// when the file is missing or unreadable. Never fails.
    pub fn load(path: &Path) -> Self {
        match Self::load_truetype(path) {
            Ok(font) => {
                log::info!("Using font {}", path.display());
                FontSource::TrueType(font)
            }
            Err(err) => {
                log::warn!("{err:#}; using the built-in font");
                FontSource::Builtin
            }
        }
    }

    fn load_truetype(path: &Path) -> Result<Font<'static>> {
        let resolved = resolve_font_path(path)
            .ok_or_else(|| anyhow!("Font not found: {}", path.display()))?;
        let bytes = std::fs::read(&resolved)
            .with_context(|| format!("Failed to read font {}", resolved.display()))?;
        Font::try_from_vec(bytes)
            .ok_or_else(|| anyhow!("Failed to parse font {}", resolved.display()))
    }

    #[cfg(test)]
    fn is_builtin(&self) -> bool {
        matches!(self, FontSource::Builtin)
    }

    /// This font at a pixel size.
    pub fn sized(&self, px: u32) -> Face<'_> {
        Face { source: self, px }
    }
}

/// Finds `path` as given, or a bare file name in the usual system font
/// directories.
pub fn resolve_font_path(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    if path.is_absolute() || path.components().count() != 1 {
        return None;
    }
    FONT_DIRS
        .iter()
        .map(|dir| Path::new(dir).join(path))
        .find(|candidate| candidate.is_file())
}

/// Bounding box of rendered text relative to the drawing origin.
/// `max_x` and `max_y` are exclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TextBounds {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    fn union(self, other: TextBounds) -> TextBounds {
        TextBounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// A [`FontSource`] at a given pixel size.
pub struct Face<'a> {
    source: &'a FontSource,
    px: u32,
}

impl Face<'_> {
    /// Ink bounds of `text` drawn with its origin (top-left of the line) at
    /// `(0, 0)`. Text without ink has empty bounds at the origin.
    pub fn bounds(&self, text: &str) -> TextBounds {
        let mut boxes = Vec::new();
        match self.source {
            FontSource::TrueType(font) => {
                let scale = em_scale(font, self.px);
                let ascent = font.v_metrics(scale).ascent;
                for glyph in font.layout(text, scale, point(0.0, ascent)) {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        boxes.push(TextBounds {
                            min_x: bb.min.x,
                            min_y: bb.min.y,
                            max_x: bb.max.x,
                            max_y: bb.max.y,
                        });
                    }
                }
            }
            FontSource::Builtin => {
                let scale = self.bitmap_scale() as i32;
                for (x, y) in bitmap_ink(text) {
                    let (x, y) = (x as i32 * scale, y as i32 * scale);
                    boxes.push(TextBounds {
                        min_x: x,
                        min_y: y,
                        max_x: x + scale,
                        max_y: y + scale,
                    });
                }
            }
        }
        boxes
            .into_iter()
            .reduce(TextBounds::union)
            .unwrap_or_default()
    }

    /// Draws `text` with its origin at `(x, y)`.
    pub fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        match self.source {
            FontSource::TrueType(font) => {
                let scale = em_scale(font, self.px);
                let ascent = font.v_metrics(scale).ascent;
                let start = point(x as f32, y as f32 + ascent);
                for glyph in font.layout(text, scale, start) {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        glyph.draw(|gx, gy, coverage| {
                            canvas.blend_pixel(
                                bb.min.x + gx as i32,
                                bb.min.y + gy as i32,
                                color,
                                coverage,
                            );
                        });
                    }
                }
            }
            FontSource::Builtin => {
                let scale = self.bitmap_scale() as i32;
                for (gx, gy) in bitmap_ink(text) {
                    let px = x + gx as i32 * scale;
                    let py = y + gy as i32 * scale;
                    canvas.fill_rect(
                        PixelBox::new(px, py, px + scale - 1, py + scale - 1),
                        color,
                    );
                }
            }
        }
    }

    fn bitmap_scale(&self) -> u32 {
        (self.px / BITMAP_UNIT).max(1)
    }

    /// Origin that centers `text` on `(cx, cy)`.
    pub fn centered_origin(&self, text: &str, cx: i32, cy: i32) -> (i32, i32) {
        let bounds = self.bounds(text);
        (
            cx - bounds.width().div_euclid(2),
            cy - bounds.height().div_euclid(2),
        )
    }
}

/// Scale that renders `font` with an em of `px` pixels. `rusttype` scales
/// the ascent-to-descent height instead.
fn em_scale(font: &Font<'_>, px: u32) -> Scale {
    let v = font.v_metrics_unscaled();
    let units_per_em = f32::from(font.units_per_em());
    if units_per_em <= 0.0 || v.ascent <= v.descent {
        return Scale::uniform(px as f32);
    }
    Scale::uniform(px as f32 * (v.ascent - v.descent) / units_per_em)
}

/// Inked cells of `text` in the bitmap font, in unscaled font pixels.
fn bitmap_ink(text: &str) -> impl Iterator<Item = (u32, u32)> + '_ {
    text.chars().enumerate().flat_map(|(i, c)| {
        let origin = i as u32 * ADVANCE;
        let glyph = bitmap_font::glyph(c);
        (0..GLYPH_HEIGHT).flat_map(move |y| {
            (0..GLYPH_WIDTH).filter_map(move |x| {
                glyph
                    .filter(|g| bitmap_font::is_set(g, x, y))
                    .map(|_| (origin + x, y))
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_missing_font_falls_back() {
        let font = FontSource::load(Path::new("/definitely/not/here/arial.ttf"));
        assert!(font.is_builtin());
    }

    #[test]
    fn test_garbage_font_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(FontSource::load(&path).is_builtin());
    }

    #[test]
    fn test_resolve_rejects_missing_nested_path() {
        assert_eq!(resolve_font_path(Path::new("no/such/dir/font.ttf")), None);
    }

    #[test]
    fn test_builtin_bounds() {
        let font = FontSource::Builtin;
        // px 16 -> scale 2; "LD" spans two glyphs and one gap column.
        let bounds = font.sized(16).bounds("LD");
        assert_eq!(bounds.min_x, 0);
        assert_eq!(bounds.min_y, 0);
        assert_eq!(bounds.width(), (ADVANCE + GLYPH_WIDTH) as i32 * 2);
        assert_eq!(bounds.height(), GLYPH_HEIGHT as i32 * 2);
    }

    #[test]
    fn test_inkless_text_has_empty_bounds() {
        let font = FontSource::Builtin;
        let bounds = font.sized(40).bounds("❤️");
        assert_eq!(bounds, TextBounds::default());
        assert_eq!(bounds.width(), 0);
    }

    #[test]
    fn test_builtin_draw_matches_bounds() {
        let font = FontSource::Builtin;
        let face = font.sized(24);
        let mut canvas = Canvas::opaque(80, 40, Rgba([0, 0, 0, 255]));
        face.draw(&mut canvas, 5, 7, "LD", WHITE);

        let bounds = face.bounds("LD");
        let inked: Vec<(i32, i32)> = (0..40)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(WHITE))
            .collect();
        assert!(!inked.is_empty());
        assert_eq!(inked.iter().map(|p| p.0).min(), Some(5 + bounds.min_x));
        assert_eq!(inked.iter().map(|p| p.0).max(), Some(5 + bounds.max_x - 1));
        assert_eq!(inked.iter().map(|p| p.1).min(), Some(7 + bounds.min_y));
        assert_eq!(inked.iter().map(|p| p.1).max(), Some(7 + bounds.max_y - 1));
    }

    fn system_font() -> Option<FontSource> {
        let font = FontSource::load(Path::new("DejaVuSans.ttf"));
        (!font.is_builtin()).then_some(font)
    }

    #[test]
    fn test_truetype_size_is_em_size() {
        let Some(font) = system_font() else {
            eprintln!("DejaVuSans.ttf not installed; skipping");
            return;
        };
        // Cap height of DejaVu Sans is 0.729 em.
        let height = font.sized(1000).bounds("H").height();
        assert!((715..=745).contains(&height), "H height {height}");
    }

    #[test]
    fn test_truetype_draw_stays_within_bounds() {
        let Some(font) = system_font() else {
            eprintln!("DejaVuSans.ttf not installed; skipping");
            return;
        };
        let face = font.sized(100);
        let bounds = face.bounds("LD");
        assert!(bounds.min_y >= 0);

        let mut canvas = Canvas::opaque(300, 150, Rgba([0, 0, 0, 255]));
        face.draw(&mut canvas, 10, 10, "LD", WHITE);
        let inked: Vec<(i32, i32)> = (0..150)
            .flat_map(|y| (0..300).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y).map_or(false, |p| p[0] > 0))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|&(x, y)| {
            (10 + bounds.min_x..10 + bounds.max_x).contains(&x)
                && (10 + bounds.min_y..10 + bounds.max_y).contains(&y)
        }));
    }

    #[test]
    fn test_centered_origin() {
        let font = FontSource::Builtin;
        let face = font.sized(8);
        // scale 1: width 11, height 7
        assert_eq!(face.centered_origin("LD", 50, 50), (45, 47));
    }
}
