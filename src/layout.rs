// SPDX-License-Identifier: MIT OR Apache-2.0

use core::ops::Range;

use crate::{Color, Decorations, Font, GlyphId};

/// A point in pixels, y pointing down
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis aligned box in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A box of the given size at the origin
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A glyph placed inside a [`Line`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub id: GlyphId,
    /// Position of the glyph origin on the baseline, relative to the line origin
    pub x: f32,
    pub y: f32,
    /// Horizontal space taken by the glyph
    pub advance: f32,
}

/// Glyphs of one line sharing the same styling
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    /// Character range covered, including blanks that produce no glyphs
    pub range: Range<usize>,
    pub font: Font,
    pub color: Color,
    pub decorations: Decorations,
    /// Left edge relative to the line origin
    pub x: f32,
    /// Advance of everything in the run, including blanks
    pub width: f32,
    /// Ascent of the run font
    pub ascent: f32,
    /// Descent of the run font, as a positive distance below the baseline
    pub descent: f32,
    /// Glyphs in visual order
    pub glyphs: Vec<Glyph>,
}

/// A laid out line
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// Character range covered, including a terminating newline
    pub range: Range<usize>,
    /// Top left corner of the line, relative to the layout box
    pub origin: Point,
    pub ascent: f32,
    pub descent: f32,
    /// Space added below the line: the font line gap plus the text line spacing
    pub leading: f32,
    pub runs: Vec<Run>,
}

impl Line {
    /// Distance from the top of the layout box to the baseline
    pub fn baseline(&self) -> f32 {
        self.origin.y + self.ascent
    }

    pub fn height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }

    /// Right edge of the last run, relative to the layout box
    pub fn right(&self) -> f32 {
        self.runs
            .last()
            .map_or(self.origin.x, |run| self.origin.x + run.x + run.width)
    }

    pub fn glyph_count(&self) -> usize {
        self.runs.iter().map(|run| run.glyphs.len()).sum()
    }
}

/// A glyph with absolute coordinates, produced by [`GlyphLayout::glyphs`]
#[derive(Clone, Copy, Debug)]
pub struct PositionedGlyph<'a> {
    pub id: GlyphId,
    /// Glyph origin on the baseline
    pub x: f32,
    pub y: f32,
    pub advance: f32,
    /// Ascent of the glyph's font
    pub ascent: f32,
    /// Descent of the glyph's font
    pub descent: f32,
    pub font: &'a Font,
    pub color: Color,
    pub decorations: Decorations,
    /// Index of the line in [`GlyphLayout::lines`]
    pub line: usize,
}

impl PositionedGlyph<'_> {
    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.advance
    }

    pub fn top(&self) -> f32 {
        self.y - self.ascent
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.descent
    }

    /// Box spanned by the advance and the font's ascent and descent
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.left(),
            self.top(),
            self.advance,
            self.ascent + self.descent,
        )
    }
}

/// Result of laying out an [`crate::AttributedText`] inside a box
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphLayout {
    pub bounds: Rect,
    pub lines: Vec<Line>,
}

impl GlyphLayout {
    pub fn new(bounds: Rect, lines: Vec<Line>) -> Self {
        Self { bounds, lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn glyph_count(&self) -> usize {
        self.lines.iter().map(Line::glyph_count).sum()
    }

    /// Distance from the top of the box to the bottom of the last line
    pub fn content_height(&self) -> f32 {
        self.lines
            .last()
            .map_or(0.0, |line| line.origin.y + line.height())
    }

    /// Width between the leftmost and the rightmost edge of all lines
    pub fn content_width(&self) -> f32 {
        let mut left = f32::INFINITY;
        let mut right = f32::NEG_INFINITY;
        for line in &self.lines {
            left = left.min(line.origin.x);
            right = right.max(line.right());
        }
        if right > left {
            right - left
        } else {
            0.0
        }
    }

    /// Line containing the character at `index`
    pub fn line_at(&self, index: usize) -> Option<&Line> {
        self.lines.iter().find(|line| line.range.contains(&index))
    }

    /// Iterate over all glyphs in absolute coordinates
    pub fn glyphs(&self) -> impl Iterator<Item = PositionedGlyph<'_>> + '_ {
        let bounds = self.bounds;
        self.lines.iter().enumerate().flat_map(move |(line_i, line)| {
            line.runs.iter().flat_map(move |run| {
                run.glyphs.iter().map(move |glyph| PositionedGlyph {
                    id: glyph.id,
                    x: bounds.x + line.origin.x + glyph.x,
                    y: bounds.y + line.origin.y + glyph.y,
                    advance: glyph.advance,
                    ascent: run.ascent,
                    descent: run.descent,
                    font: &run.font,
                    color: run.color,
                    decorations: run.decorations,
                    line: line_i,
                })
            })
        })
    }

    /// Find the glyph under a point, in the coordinates of [`GlyphLayout::glyphs`]
    ///
    /// Returns the indices of the line, of the run within the line, and of the glyph within the
    /// run. Vertically the whole height of a line counts, horizontally the advance of a glyph.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<(usize, usize, usize)> {
        let (line_i, line) = self.lines.iter().enumerate().find(|(_, line)| {
            let top = self.bounds.y + line.origin.y;
            y >= top && y < top + line.height()
        })?;

        let x = x - self.bounds.x - line.origin.x;
        line.runs.iter().enumerate().find_map(|(run_i, run)| {
            run.glyphs
                .iter()
                .position(|glyph| x >= glyph.x && x < glyph.x + glyph.advance)
                .map(|glyph_i| (line_i, run_i, glyph_i))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn run(range: Range<usize>, x: f32, width: f32, glyph_xs: &[f32]) -> Run {
        Run {
            range,
            font: Font::new(),
            color: Color::BLACK,
            decorations: Decorations::empty(),
            x,
            width,
            ascent: 8.0,
            descent: 2.0,
            glyphs: glyph_xs
                .iter()
                .map(|&x| Glyph {
                    id: 1,
                    x,
                    y: 8.0,
                    advance: 10.0,
                })
                .collect(),
        }
    }

    fn sample() -> GlyphLayout {
        GlyphLayout::new(
            Rect::new(5.0, 50.0, 100.0, 100.0),
            vec![
                Line {
                    range: 0..3,
                    origin: Point::new(10.0, 0.0),
                    ascent: 8.0,
                    descent: 2.0,
                    leading: 1.0,
                    runs: vec![run(0..3, 0.0, 30.0, &[0.0, 10.0])],
                },
                Line {
                    range: 3..5,
                    origin: Point::new(0.0, 11.0),
                    ascent: 8.0,
                    descent: 2.0,
                    leading: 1.0,
                    runs: vec![run(3..4, 0.0, 10.0, &[0.0]), run(4..5, 10.0, 10.0, &[10.0])],
                },
            ],
        )
    }

    #[test]
    fn extents() {
        let layout = sample();
        assert_eq!(layout.glyph_count(), 4);
        assert_eq!(layout.content_height(), 22.0);
        assert_eq!(layout.content_width(), 40.0);
        assert_eq!(layout.lines[1].baseline(), 19.0);
        assert_eq!(layout.line_at(3).map(|line| line.origin.y), Some(11.0));
        assert!(layout.line_at(5).is_none());
        assert_eq!(GlyphLayout::default().content_width(), 0.0);
    }

    #[test]
    fn absolute_glyphs() {
        let layout = sample();
        let positions: Vec<(f32, f32, usize)> = layout
            .glyphs()
            .map(|glyph| (glyph.x, glyph.y, glyph.line))
            .collect();
        assert_eq!(
            positions,
            [
                (15.0, 58.0, 0),
                (25.0, 58.0, 0),
                (5.0, 69.0, 1),
                (15.0, 69.0, 1),
            ]
        );
    }

    #[test]
    fn glyph_bounds() {
        let layout = sample();
        let glyph = layout.glyphs().nth(1).unwrap();
        assert_eq!(glyph.bounds(), Rect::new(25.0, 50.0, 10.0, 10.0));
        assert_eq!(glyph.right(), 35.0);
        assert_eq!(glyph.bottom(), 60.0);
    }

    #[test]
    fn hit_test() {
        let layout = sample();
        // Second glyph of the first line spans x 25..35, the line y 50..61
        assert_eq!(layout.hit_test(25.0, 50.0), Some((0, 0, 1)));
        assert_eq!(layout.hit_test(34.9, 60.9), Some((0, 0, 1)));
        assert_eq!(layout.hit_test(15.0, 55.0), Some((0, 0, 0)));
        // Second line starts at y 61
        assert_eq!(layout.hit_test(15.0, 61.0), Some((1, 1, 0)));
        assert_eq!(layout.hit_test(5.0, 70.0), Some((1, 0, 0)));
        // Beside the glyphs, above and below the lines
        assert_eq!(layout.hit_test(35.0, 55.0), None);
        assert_eq!(layout.hit_test(15.0, 49.0), None);
        assert_eq!(layout.hit_test(15.0, 72.0), None);
    }
}
