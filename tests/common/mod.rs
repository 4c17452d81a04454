use glyph_layout::{
    Color, Font, FontMetrics, FontProvider, GlyphId, OutlineCommand, PositionedGlyph, Renderer,
    ShapedText,
};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

/// Provider where every character advances by a fixed amount
///
/// Ascent and descent are 3/4 and 1/4 of the font size, so all positions stay exactly
/// representable. Glyph ids are the character codes.
#[derive(Debug)]
pub struct FixedProvider {
    pub advance: f32,
    pub line_gap: f32,
}

impl Default for FixedProvider {
    fn default() -> Self {
        Self {
            advance: 12.0,
            line_gap: 0.0,
        }
    }
}

impl FixedProvider {
    pub fn new(advance: f32) -> Self {
        Self {
            advance,
            ..Self::default()
        }
    }
}

impl FontProvider for FixedProvider {
    fn metrics(&self, font: &Font) -> FontMetrics {
        FontMetrics {
            ascent: font.size * 0.75,
            descent: font.size * 0.25,
            line_gap: self.line_gap,
        }
    }

    fn shape(&self, _font: &Font, text: &str) -> ShapedText {
        ShapedText::from_advances(text.chars().map(|c| {
            let id = GlyphId::try_from(u32::from(c)).unwrap_or(0);
            (id, self.advance)
        }))
    }

    /// A box filling the advance minus one pixel on each side, half the font size high
    fn outline(&self, font: &Font, _glyph_id: GlyphId) -> Option<Vec<OutlineCommand>> {
        let right = self.advance - 1.0;
        let top = font.size * 0.5;
        Some(vec![
            OutlineCommand::MoveTo(1.0, 0.0),
            OutlineCommand::LineTo(right, 0.0),
            OutlineCommand::LineTo(right, top),
            OutlineCommand::LineTo(1.0, top),
            OutlineCommand::Close,
        ])
    }
}

/// Renderer filling glyph outlines and rectangles into a pixmap
pub struct PixmapRenderer {
    pub pixmap: Pixmap,
}

impl PixmapRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixmap = Pixmap::new(width, height).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);
        Self { pixmap }
    }

    /// Whether the pixel at x, y was painted
    pub fn is_painted(&self, x: u32, y: u32) -> bool {
        let pixel = self.pixmap.pixel(x, y).unwrap();
        pixel.red() < 0x80 || pixel.green() < 0x80 || pixel.blue() < 0x80
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias: false,
        ..Paint::default()
    };
    paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
    paint
}

impl Renderer for PixmapRenderer {
    fn rectangle(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let rect = Rect::from_xywh(x, y, w, h).unwrap();
        self.pixmap
            .fill_rect(rect, &paint(color), Transform::identity(), None);
    }

    fn glyph(&mut self, glyph: &PositionedGlyph<'_>, outline: &[OutlineCommand]) {
        let mut builder = PathBuilder::new();
        for command in outline {
            match *command {
                OutlineCommand::MoveTo(x, y) => builder.move_to(x, y),
                OutlineCommand::LineTo(x, y) => builder.line_to(x, y),
                OutlineCommand::QuadTo(x1, y1, x, y) => builder.quad_to(x1, y1, x, y),
                OutlineCommand::CurveTo(x1, y1, x2, y2, x, y) => {
                    builder.cubic_to(x1, y1, x2, y2, x, y)
                }
                OutlineCommand::Close => builder.close(),
            }
        }
        if let Some(path) = builder.finish() {
            self.pixmap.fill_path(
                &path,
                &paint(glyph.color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }
}

/// Deterministic pseudo random numbers for generated inputs
pub struct XorShift(pub u64);

impl XorShift {
    pub fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    pub fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

/// Random text of short words, spaces, tabs and newlines, with some non-ASCII characters
pub fn random_text(rng: &mut XorShift, words: usize) -> String {
    const PIECES: &[&str] = &["a", "bb", "ccc", "dddd", "é", "ü", "你好", "x"];
    const SEPARATORS: &[&str] = &[" ", " ", " ", "  ", "\t", "\n", "\r\n", ""];
    let mut text = String::new();
    for _ in 0..words {
        for _ in 0..=rng.below(3) {
            text.push_str(PIECES[rng.below(PIECES.len())]);
        }
        text.push_str(SEPARATORS[rng.below(SEPARATORS.len())]);
    }
    text
}
