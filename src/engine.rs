// SPDX-License-Identifier: MIT OR Apache-2.0

#[cfg(feature = "std")]
use std::time::Instant;

use crate::{
    break_lines, break_lines_balanced, effective_align, is_rtl, justify, tokenize, AttributedText,
    AttrsRuns, FontProvider, Glyph, GlyphLayout, Line, LineBox, Point, Rect, Run, Token,
    TokenKind,
};

/// Produces a [`GlyphLayout`] for attributed text inside a box
pub trait TypeLayout {
    /// Lay out `text` inside `bounds`
    ///
    /// Lines wrap at the box width. The box height does not clip: every character is laid out.
    fn layout(&self, text: &AttributedText, bounds: Rect) -> GlyphLayout;
}

/// Options of [`PortableEngine`]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LayoutOptions {
    /// Narrow wrapped paragraphs so the last line is not much shorter than the others
    pub balance_lines: bool,
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_lines(mut self, balance_lines: bool) -> Self {
        self.balance_lines = balance_lines;
        self
    }
}

/// Layout engine that only relies on a [`FontProvider`]
///
/// Text is split into runs of equal attributes and into word, whitespace and newline tokens,
/// which are placed on lines greedily and aligned per line.
#[derive(Debug)]
pub struct PortableEngine<P: FontProvider> {
    provider: P,
    options: LayoutOptions,
}

impl<P: FontProvider> PortableEngine<P> {
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, LayoutOptions::default())
    }

    pub fn with_options(provider: P, options: LayoutOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    pub fn options(&self) -> LayoutOptions {
        self.options
    }

    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
    }

    /// Shortcut for laying out in a box of the given size at the origin
    pub fn layout_size(&self, text: &AttributedText, width: f32, height: f32) -> GlyphLayout {
        self.layout(text, Rect::from_size(width, height))
    }
}

impl<P: FontProvider> TypeLayout for PortableEngine<P> {
    fn layout(&self, text: &AttributedText, bounds: Rect) -> GlyphLayout {
        #[cfg(feature = "std")]
        let now = Instant::now();

        if text.is_empty() {
            return GlyphLayout::new(bounds, Vec::new());
        }

        let runs = AttrsRuns::new(text);
        let mut tokens = tokenize(text, &runs, &self.provider);

        let lines = if self.options.balance_lines {
            break_lines_balanced(&mut tokens, bounds.width, text.wrap(), text.line_spacing())
        } else {
            break_lines(&mut tokens, bounds.width, text.wrap(), text.line_spacing())
        };

        let align = effective_align(text.align(), is_rtl(text));
        justify(&mut tokens, &lines, bounds.width, text.wrap(), align);

        let layout = GlyphLayout::new(bounds, materialize(&tokens, &lines, &runs));

        #[cfg(feature = "std")]
        log::debug!(
            "laid out {} chars in {} runs, {} tokens, {} lines: {:?}",
            text.len(),
            runs.len(),
            tokens.len(),
            layout.lines.len(),
            now.elapsed()
        );

        layout
    }
}

/// Build the line tree from positioned tokens
///
/// Consecutive tokens of the same attribute run on a line form one [`Run`]. Glyphs reuse the
/// shaping done for measuring.
fn materialize(tokens: &[Token], lines: &[LineBox], runs: &AttrsRuns) -> Vec<Line> {
    let mut out = Vec::with_capacity(lines.len());
    for line_box in lines {
        let line_tokens = &tokens[line_box.tokens.clone()];
        let (Some(first), Some(last)) = (line_tokens.first(), line_tokens.last()) else {
            continue;
        };

        let origin = Point::new(first.x, line_box.y);
        let mut line_runs: Vec<Run> = Vec::new();
        let mut current_run = None;
        for token in line_tokens {
            if current_run != Some(token.run) {
                let Some(attrs_run) = runs.runs().get(token.run) else {
                    log::warn!("token {:?} refers to missing run {}", token.range, token.run);
                    continue;
                };
                current_run = Some(token.run);
                line_runs.push(Run {
                    range: token.range.start..token.range.start,
                    font: attrs_run.attrs.font.clone(),
                    color: attrs_run.attrs.color,
                    decorations: attrs_run.attrs.decorations,
                    x: token.x - origin.x,
                    width: 0.0,
                    ascent: token.metrics.ascent,
                    descent: token.metrics.descent,
                    glyphs: Vec::new(),
                });
            }

            let Some(run) = line_runs.last_mut() else {
                continue;
            };
            run.range.end = token.range.end;
            run.width = token.x + token.width - origin.x - run.x;
            if token.kind == TokenKind::Word {
                let token_x = token.x - origin.x;
                run.glyphs
                    .extend(token.shaped.glyphs.iter().map(|glyph| Glyph {
                        id: glyph.id,
                        x: token_x + glyph.x,
                        y: line_box.ascent,
                        advance: glyph.advance,
                    }));
            }
        }

        log::trace!(
            "line {}: {:?} at {:?}, {} runs",
            out.len(),
            first.range.start..last.range.end,
            origin,
            line_runs.len()
        );

        out.push(Line {
            range: first.range.start..last.range.end,
            origin,
            ascent: line_box.ascent,
            descent: line_box.descent,
            leading: line_box.leading,
            runs: line_runs,
        });
    }
    out
}
