// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers for drawing glyph layouts

use crate::{
    Color, Decorations, FontProvider, GlyphLayout, OutlineCache, OutlineCommand, PositionedGlyph,
};

/// Custom renderer for glyph layouts
pub trait Renderer {
    /// Render a rectangle at x, y with size w, h and the provided [`Color`]
    fn rectangle(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    /// Render a glyph whose outline is already in absolute coordinates, y pointing down
    fn glyph(&mut self, glyph: &PositionedGlyph<'_>, outline: &[OutlineCommand]);
}

impl GlyphLayout {
    /// Draw every glyph and decoration line with `renderer`
    ///
    /// Glyphs without an outline are skipped.
    pub fn draw<P, R>(&self, provider: &P, cache: &mut OutlineCache, renderer: &mut R)
    where
        P: FontProvider + ?Sized,
        R: Renderer + ?Sized,
    {
        let mut outline = Vec::new();
        for glyph in self.glyphs() {
            let Some(commands) = cache.get(provider, glyph.font, glyph.id) else {
                continue;
            };
            outline.clear();
            outline.extend(commands.iter().map(|command| command.to_screen(glyph.x, glyph.y)));
            renderer.glyph(&glyph, &outline);
        }

        for line in &self.lines {
            let baseline = self.bounds.y + line.baseline();
            for run in line.runs.iter().filter(|run| !run.decorations.is_empty()) {
                let thickness = (run.font.size / 16.0).max(1.0);
                let x = self.bounds.x + line.origin.x + run.x;
                if run.decorations.contains(Decorations::UNDERLINE) {
                    let y = baseline + run.descent * 0.5;
                    renderer.rectangle(x, y, run.width, thickness, run.color);
                }
                if run.decorations.contains(Decorations::STRIKETHROUGH) {
                    let y = baseline - run.ascent * 0.3;
                    renderer.rectangle(x, y, run.width, thickness, run.color);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        AttributedText, Font, FontMetrics, GlyphId, PortableEngine, Rect, ShapedText, TypeLayout,
    };

    struct BoxProvider;

    impl FontProvider for BoxProvider {
        fn metrics(&self, _font: &Font) -> FontMetrics {
            FontMetrics {
                ascent: 8.0,
                descent: 2.0,
                line_gap: 0.0,
            }
        }

        fn shape(&self, _font: &Font, text: &str) -> ShapedText {
            ShapedText::from_advances(text.chars().map(|c| {
                let id = if c == 'x' { 0 } else { 1 };
                (id as GlyphId, 10.0)
            }))
        }

        fn outline(&self, _font: &Font, glyph_id: GlyphId) -> Option<Vec<OutlineCommand>> {
            (glyph_id != 0).then(|| {
                vec![
                    OutlineCommand::MoveTo(0.0, 0.0),
                    OutlineCommand::LineTo(5.0, 5.0),
                    OutlineCommand::Close,
                ]
            })
        }
    }

    #[derive(Default)]
    struct Recorder {
        rectangles: Vec<(f32, f32, f32, f32)>,
        glyphs: Vec<Vec<OutlineCommand>>,
    }

    impl Renderer for Recorder {
        fn rectangle(&mut self, x: f32, y: f32, w: f32, h: f32, _color: Color) {
            self.rectangles.push((x, y, w, h));
        }

        fn glyph(&mut self, _glyph: &PositionedGlyph<'_>, outline: &[OutlineCommand]) {
            self.glyphs.push(outline.to_vec());
        }
    }

    #[test]
    fn draws_outlines_and_decorations() {
        let mut text = AttributedText::new("ax b");
        text.set_decorations(0..2, Decorations::UNDERLINE);
        let layout =
            PortableEngine::new(BoxProvider).layout(&text, Rect::new(100.0, 200.0, 500.0, 50.0));

        let mut cache = OutlineCache::new();
        let mut recorder = Recorder::default();
        layout.draw(&BoxProvider, &mut cache, &mut recorder);

        assert_eq!(recorder.glyphs.len(), 2);
        assert_eq!(
            recorder.glyphs[0],
            [
                OutlineCommand::MoveTo(100.0, 208.0),
                OutlineCommand::LineTo(105.0, 203.0),
                OutlineCommand::Close,
            ]
        );
        assert_eq!(recorder.glyphs[1][0], OutlineCommand::MoveTo(130.0, 208.0));
        assert_eq!(recorder.rectangles, [(100.0, 209.0, 20.0, 1.0)]);
        assert_eq!(cache.len(), 2);
    }
}
