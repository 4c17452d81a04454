// SPDX-License-Identifier: MIT OR Apache-2.0

use core::ops::Range;

use crate::{Token, TokenKind, Wrap};

/// Stop balancing once the last line is at least this fraction of the one before it
const BALANCE_RATIO: f32 = 0.9;
/// Factor applied to the width on every balancing step
const BALANCE_SHRINK: f32 = 0.95;
const BALANCE_ITERATIONS: usize = 32;

/// One line produced by [`break_lines`]
#[derive(Clone, Debug, PartialEq)]
pub struct LineBox {
    /// Indices of the tokens on this line
    pub tokens: Range<usize>,
    /// Top of the line relative to the layout box
    pub y: f32,
    /// Maximum ascent of the tokens
    pub ascent: f32,
    /// Maximum descent of the tokens
    pub descent: f32,
    /// Maximum line gap of the tokens plus the extra line spacing
    pub leading: f32,
}

impl LineBox {
    pub fn height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }
}

#[derive(Default)]
struct LineState {
    start: usize,
    ascent: f32,
    descent: f32,
    line_gap: f32,
}

impl LineState {
    fn add(&mut self, token: &Token) {
        self.ascent = self.ascent.max(token.metrics.ascent);
        self.descent = self.descent.max(token.metrics.descent);
        self.line_gap = self.line_gap.max(token.metrics.line_gap);
    }
}

/// Assign every token a position and line, breaking greedily at `max_width`
///
/// A line closes after a newline token, or when the next token is not blank and would end
/// beyond `max_width`. Blank tokens therefore stay at the end of the line they follow. A word
/// wider than `max_width` is placed on a line of its own and overflows it.
///
/// With [`Wrap::None`], or a width that is not a number, lines only close at newlines.
pub fn break_lines(
    tokens: &mut [Token],
    max_width: f32,
    wrap: Wrap,
    line_spacing: f32,
) -> Vec<LineBox> {
    let max_width = if wrap == Wrap::None || max_width.is_nan() {
        f32::INFINITY
    } else {
        max_width
    };

    let mut lines = Vec::new();
    let mut state = LineState::default();
    let mut x = 0.0;
    let mut y = 0.0;

    for i in 0..tokens.len() {
        {
            let token = &mut tokens[i];
            token.x = x;
            token.y = y;
            token.line = lines.len();
            x += token.width;
            state.add(token);
        }

        let close = match tokens.get(i + 1) {
            Some(next) => {
                tokens[i].kind == TokenKind::Newline
                    || (!next.is_blank() && x + next.width > max_width)
            }
            None => false,
        };
        if close {
            let line = finish_line(tokens, &state, i + 1, y, line_spacing);
            y = next_line_y(y, &line);
            lines.push(line);
            x = 0.0;
            state = LineState {
                start: i + 1,
                ..LineState::default()
            };
        }
    }

    if state.start < tokens.len() {
        let line = finish_line(tokens, &state, tokens.len(), y, line_spacing);
        lines.push(line);
    }

    log::trace!("broke {} tokens into {} lines", tokens.len(), lines.len());

    lines
}

fn finish_line(
    tokens: &mut [Token],
    state: &LineState,
    end: usize,
    y: f32,
    line_spacing: f32,
) -> LineBox {
    let line = LineBox {
        tokens: state.start..end,
        y,
        ascent: state.ascent,
        descent: state.descent,
        leading: state.line_gap + line_spacing,
    };
    let line_height = line.height();
    for token in &mut tokens[line.tokens.clone()] {
        token.line_height = line_height;
    }
    line
}

/// Top of the line below `line`
///
/// Summed left to right, in the same order as `y + ascent + descent + leading`, not as
/// `y + line.height()`.
fn next_line_y(y: f32, line: &LineBox) -> f32 {
    y + line.ascent + line.descent + line.leading
}

/// Width of the visible content of a line: the right edge of its last word
pub fn content_width(tokens: &[Token]) -> f32 {
    tokens
        .iter()
        .filter(|token| !token.is_blank())
        .map(|token| token.x + token.width)
        .fold(0.0, f32::max)
}

/// Like [`break_lines`], then narrow the width of every paragraph step by step to even out its
/// short last line
///
/// Paragraphs end at newline tokens and are balanced independently. The line count of a
/// paragraph never grows: the narrowest width that keeps it is used.
pub fn break_lines_balanced(
    tokens: &mut [Token],
    max_width: f32,
    wrap: Wrap,
    line_spacing: f32,
) -> Vec<LineBox> {
    if wrap == Wrap::None || !max_width.is_finite() || max_width <= 0.0 {
        return break_lines(tokens, max_width, wrap, line_spacing);
    }

    let mut lines = Vec::new();
    let mut start = 0;
    while start < tokens.len() {
        let end = tokens[start..]
            .iter()
            .position(|token| token.kind == TokenKind::Newline)
            .map_or(tokens.len(), |i| start + i + 1);

        let line_offset = lines.len();
        let paragraph = &mut tokens[start..end];
        let paragraph_lines = balance_paragraph(paragraph, max_width, wrap, line_spacing);
        for token in paragraph.iter_mut() {
            token.line += line_offset;
        }
        lines.extend(paragraph_lines.into_iter().map(|line| LineBox {
            tokens: line.tokens.start + start..line.tokens.end + start,
            ..line
        }));
        start = end;
    }

    // Paragraphs were broken from y = 0, stack them
    let mut y = 0.0;
    for line in &mut lines {
        line.y = y;
        for token in &mut tokens[line.tokens.clone()] {
            token.y = y;
        }
        y = next_line_y(y, line);
    }

    lines
}

fn balance_paragraph(
    tokens: &mut [Token],
    max_width: f32,
    wrap: Wrap,
    line_spacing: f32,
) -> Vec<LineBox> {
    let mut lines = break_lines(tokens, max_width, wrap, line_spacing);
    let line_count = lines.len();
    if line_count < 2 {
        return lines;
    }

    let mut width = max_width;
    for _ in 0..BALANCE_ITERATIONS {
        let last = content_width(&tokens[lines[line_count - 1].tokens.clone()]);
        let second_last = content_width(&tokens[lines[line_count - 2].tokens.clone()]);
        if second_last <= 0.0 || last / second_last > BALANCE_RATIO {
            break;
        }

        let candidate_width = width * BALANCE_SHRINK;
        let candidate = break_lines(tokens, candidate_width, wrap, line_spacing);
        if candidate.len() != line_count {
            // Token positions belong to the rejected candidate, redo the last good break
            lines = break_lines(tokens, width, wrap, line_spacing);
            break;
        }
        width = candidate_width;
        lines = candidate;
    }

    log::trace!("balanced paragraph at width {} of {}", width, max_width);

    lines
}
