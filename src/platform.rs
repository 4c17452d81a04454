// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter for layout engines provided by the platform
//!
//! A [`PlatformBackend`] lays out and draws text with a native text stack, reporting every
//! glyph run it would draw to a [`GlyphRunSink`]. [`PlatformEngine`] collects those runs into a
//! [`GlyphLayout`], so the rest of an application cannot tell which engine produced it.

use core::ops::Range;

use crate::{
    AttributedText, Color, Decorations, Font, FontMetrics, Glyph, GlyphId, GlyphLayout, Line,
    Point, Rect, Run, TypeLayout,
};

/// A run of glyphs reported by a platform engine
#[derive(Clone, Debug)]
pub struct PlatformGlyphRun<'a> {
    /// Absolute position of the first glyph on the baseline
    pub baseline: Point,
    /// Character range covered by the run
    pub range: Range<usize>,
    pub font: &'a Font,
    pub color: Color,
    pub decorations: Decorations,
    /// Unicode bidi embedding level, odd levels are right to left
    pub bidi_level: u8,
    /// Glyphs in logical order
    pub glyph_ids: &'a [GlyphId],
    /// Advance of each glyph
    pub advances: &'a [f32],
    pub metrics: FontMetrics,
}

impl PlatformGlyphRun<'_> {
    pub fn is_rtl(&self) -> bool {
        self.bidi_level % 2 == 1
    }
}

/// Receives the glyph runs of a platform layout in drawing order
pub trait GlyphRunSink {
    fn glyph_run(&mut self, run: PlatformGlyphRun<'_>);
}

/// A native text engine
pub trait PlatformBackend {
    /// Lay out `text` inside `bounds` and report every glyph run to `sink`
    ///
    /// Runs sharing a baseline y belong to one line. Runs of blanks should be reported with no
    /// glyphs so that lines cover their whole range.
    fn draw(&self, text: &AttributedText, bounds: Rect, sink: &mut dyn GlyphRunSink);
}

/// [`TypeLayout`] implemented by a [`PlatformBackend`]
#[derive(Debug)]
pub struct PlatformEngine<B: PlatformBackend> {
    backend: B,
}

impl<B: PlatformBackend> PlatformEngine<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

impl<B: PlatformBackend> TypeLayout for PlatformEngine<B> {
    fn layout(&self, text: &AttributedText, bounds: Rect) -> GlyphLayout {
        let mut collector = RunCollector::new(bounds);
        self.backend.draw(text, bounds, &mut collector);
        let layout = collector.finish();
        log::debug!(
            "platform laid out {} chars into {} lines",
            text.len(),
            layout.lines.len()
        );
        layout
    }
}

/// A line while runs are still arriving, glyph positions relative to the baseline origin
struct PendingLine {
    baseline: Point,
    range: Range<usize>,
    ascent: f32,
    descent: f32,
    leading: f32,
    runs: Vec<Run>,
}

struct RunCollector {
    bounds: Rect,
    lines: Vec<PendingLine>,
}

impl RunCollector {
    fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            lines: Vec::new(),
        }
    }

    fn finish(self) -> GlyphLayout {
        let lines = self
            .lines
            .into_iter()
            .map(|pending| {
                let origin = Point::new(pending.baseline.x, pending.baseline.y - pending.ascent);
                let mut runs = pending.runs;
                for glyph in runs.iter_mut().flat_map(|run| run.glyphs.iter_mut()) {
                    glyph.y = pending.ascent;
                }
                Line {
                    range: pending.range,
                    origin,
                    ascent: pending.ascent,
                    descent: pending.descent,
                    leading: pending.leading,
                    runs,
                }
            })
            .collect();
        GlyphLayout::new(self.bounds, lines)
    }
}

impl GlyphRunSink for RunCollector {
    fn glyph_run(&mut self, run: PlatformGlyphRun<'_>) {
        let baseline = Point::new(run.baseline.x - self.bounds.x, run.baseline.y - self.bounds.y);

        let same_line = self
            .lines
            .last()
            .is_some_and(|line| line.baseline.y == baseline.y);
        if !same_line {
            log::trace!("platform line {} at baseline {:?}", self.lines.len(), baseline);
            self.lines.push(PendingLine {
                baseline,
                range: run.range.clone(),
                ascent: 0.0,
                descent: 0.0,
                leading: 0.0,
                runs: Vec::new(),
            });
        }
        let Some(line) = self.lines.last_mut() else {
            return;
        };

        line.range.start = line.range.start.min(run.range.start);
        line.range.end = line.range.end.max(run.range.end);
        line.ascent = line.ascent.max(run.metrics.ascent);
        line.descent = line.descent.max(run.metrics.descent);
        line.leading = line.leading.max(run.metrics.line_gap);

        if run.glyph_ids.len() != run.advances.len() {
            log::warn!(
                "glyph run {:?} has {} glyphs but {} advances",
                run.range,
                run.glyph_ids.len(),
                run.advances.len()
            );
        }

        // Right to left runs start at their right edge and advance leftwards
        let rtl = run.is_rtl();
        let mut x = baseline.x - line.baseline.x;
        let start_x = x;
        let mut glyphs = Vec::with_capacity(run.glyph_ids.len());
        for (&id, &advance) in run.glyph_ids.iter().zip(run.advances) {
            if rtl {
                x -= advance;
                glyphs.push(Glyph {
                    id,
                    x,
                    y: 0.0,
                    advance,
                });
            } else {
                glyphs.push(Glyph {
                    id,
                    x,
                    y: 0.0,
                    advance,
                });
                x += advance;
            }
        }
        if rtl {
            glyphs.reverse();
        }

        let (left, width) = if rtl {
            (x, start_x - x)
        } else {
            (start_x, x - start_x)
        };
        line.runs.push(Run {
            range: run.range,
            font: run.font.clone(),
            color: run.color,
            decorations: run.decorations,
            x: left,
            width,
            ascent: run.metrics.ascent,
            descent: run.metrics.descent,
            glyphs,
        });
    }
}
