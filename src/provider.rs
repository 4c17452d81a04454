// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::Font;

/// Glyph index inside a font face
pub type GlyphId = u16;

/// Glyph used when a face has no glyph for a character
pub const NOTDEF_GLYPH: GlyphId = 0;

/// Vertical metrics of a font at its pixel size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the line
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line, positive downwards
    pub descent: f32,
    /// Recommended gap between lines
    pub line_gap: f32,
}

impl FontMetrics {
    /// Height of one line without the gap
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }

    /// Metrics used when no face can be loaded for a font
    pub fn fallback(font: &Font) -> Self {
        Self {
            ascent: font.size * 0.8,
            descent: font.size * 0.2,
            line_gap: 0.0,
        }
    }
}

/// A glyph produced by shaping
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapedGlyph {
    pub id: GlyphId,
    /// Sum of the advances of all previous glyphs
    pub x: f32,
    pub advance: f32,
}

/// Result of shaping a string with one font
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapedText {
    /// Glyphs in visual order, `x` starts at 0 and never decreases
    pub glyphs: Vec<ShapedGlyph>,
    /// Total advance of the string
    pub advance: f32,
}

impl ShapedText {
    /// Build from per-glyph advances, accumulating positions
    pub fn from_advances<I: IntoIterator<Item = (GlyphId, f32)>>(glyphs: I) -> Self {
        let mut shaped = Self::default();
        for (id, advance) in glyphs {
            // Negative advances would break the ordering of positions
            let advance = advance.max(0.0);
            shaped.glyphs.push(ShapedGlyph {
                id,
                x: shaped.advance,
                advance,
            });
            shaped.advance += advance;
        }
        shaped
    }
}

/// A segment of a glyph outline, in pixels with y pointing up from the baseline
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutlineCommand {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo(f32, f32, f32, f32),
    CurveTo(f32, f32, f32, f32, f32, f32),
    Close,
}

impl OutlineCommand {
    /// Translate every point by `(x, y)` and flip the y axis, producing y-down coordinates
    pub fn to_screen(self, x: f32, y: f32) -> Self {
        match self {
            Self::MoveTo(px, py) => Self::MoveTo(x + px, y - py),
            Self::LineTo(px, py) => Self::LineTo(x + px, y - py),
            Self::QuadTo(cx, cy, px, py) => Self::QuadTo(x + cx, y - cy, x + px, y - py),
            Self::CurveTo(c0x, c0y, c1x, c1y, px, py) => {
                Self::CurveTo(x + c0x, y - c0y, x + c1x, y - c1y, x + px, y - py)
            }
            Self::Close => Self::Close,
        }
    }
}

/// Source of font metrics, shaping, and glyph outlines
///
/// Implementations may load font resources lazily, but must be safe to share between layout
/// calls running on different threads.
pub trait FontProvider: Send + Sync {
    /// Vertical metrics of `font` at its size
    fn metrics(&self, font: &Font) -> FontMetrics;

    /// Shape `text` left to right
    ///
    /// Characters the face cannot display map to [`NOTDEF_GLYPH`], shaping never fails.
    fn shape(&self, font: &Font, text: &str) -> ShapedText;

    /// Outline of a glyph at the size of `font`, if available
    fn outline(&self, font: &Font, glyph_id: GlyphId) -> Option<Vec<OutlineCommand>> {
        let _ = (font, glyph_id);
        None
    }
}

impl<P: FontProvider + ?Sized> FontProvider for &P {
    fn metrics(&self, font: &Font) -> FontMetrics {
        (**self).metrics(font)
    }

    fn shape(&self, font: &Font, text: &str) -> ShapedText {
        (**self).shape(font, text)
    }

    fn outline(&self, font: &Font, glyph_id: GlyphId) -> Option<Vec<OutlineCommand>> {
        (**self).outline(font, glyph_id)
    }
}
