// SPDX-License-Identifier: MIT OR Apache-2.0

use core::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

use crate::{AttributedText, AttrsRuns, FontMetrics, FontProvider, ShapedText, Wrap};

/// Class of a token
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    Word,
    Whitespace,
    /// `\r`, `\n`, or `\r\n`
    Newline,
}

impl TokenKind {
    fn of(c: char) -> Self {
        if c == '\r' || c == '\n' {
            Self::Newline
        } else if c.is_whitespace() {
            Self::Whitespace
        } else {
            Self::Word
        }
    }
}

/// The unit of line breaking: a span of one class inside one attribute run
#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    /// Character range in the text
    pub range: Range<usize>,
    /// Index of the attribute run the token belongs to
    pub run: usize,
    /// Shaping result, empty for newlines
    pub shaped: ShapedText,
    pub width: f32,
    /// Ascent plus descent of the run font
    pub height: f32,
    pub metrics: FontMetrics,
    /// Position relative to the layout box, assigned by line breaking
    pub x: f32,
    pub y: f32,
    pub line: usize,
    pub line_height: f32,
}

impl Token {
    /// Whitespace and newlines are never break-before points and carry no glyphs
    pub fn is_blank(&self) -> bool {
        self.kind != TokenKind::Word
    }
}

/// Split every attribute run into word, whitespace and newline tokens and measure them
///
/// With [`Wrap::Char`], words are further split into one token per grapheme cluster.
pub fn tokenize<P: FontProvider + ?Sized>(
    text: &AttributedText,
    runs: &AttrsRuns,
    provider: &P,
) -> Vec<Token> {
    let string = text.text();
    let chars: Vec<char> = string.chars().collect();
    let byte_offsets: Vec<usize> = string
        .char_indices()
        .map(|(i, _)| i)
        .chain(core::iter::once(string.len()))
        .collect();

    let mut tokenizer = Tokenizer {
        string,
        byte_offsets: &byte_offsets,
        provider,
        split_words: text.wrap() == Wrap::Char,
        tokens: Vec::with_capacity(runs.len() * 4),
    };

    // First character not yet consumed, ahead of a run start when a `\r\n` crossed into it
    let mut resume = 0;
    for (run_i, run) in runs.runs().iter().enumerate() {
        let end = run.range.end;
        let mut start = run.range.start.max(resume);
        if start >= end {
            continue;
        }

        let metrics = provider.metrics(&run.attrs.font);
        let font = &run.attrs.font;

        log::trace!(
            "  Run {}: {:?} '{}'",
            run_i,
            run.range,
            &string[byte_offsets[run.range.start]..byte_offsets[run.range.end]]
        );

        let mut kind_opt: Option<TokenKind> = None;
        let mut i = start;
        while i < end {
            let c = chars[i];
            let kind = TokenKind::of(c);

            if kind == TokenKind::Newline {
                if let Some(prev) = kind_opt.take() {
                    tokenizer.push(run_i, font, metrics, start..i, prev);
                }
                let mut newline_end = i + 1;
                if c == '\r' && chars.get(newline_end) == Some(&'\n') {
                    newline_end += 1;
                }
                tokenizer.push(run_i, font, metrics, i..newline_end, TokenKind::Newline);
                i = newline_end;
                start = i;
                resume = i;
                continue;
            }

            match kind_opt {
                Some(prev) if prev == kind => {}
                Some(prev) => {
                    tokenizer.push(run_i, font, metrics, start..i, prev);
                    start = i;
                }
                None => start = i,
            }
            kind_opt = Some(kind);
            i += 1;
        }
        if let Some(prev) = kind_opt {
            tokenizer.push(run_i, font, metrics, start..end, prev);
        }
        resume = resume.max(end);
    }

    tokenizer.tokens
}

struct Tokenizer<'a, P: ?Sized> {
    string: &'a str,
    byte_offsets: &'a [usize],
    provider: &'a P,
    split_words: bool,
    tokens: Vec<Token>,
}

impl<P: FontProvider + ?Sized> Tokenizer<'_, P> {
    fn push(
        &mut self,
        run: usize,
        font: &crate::Font,
        metrics: FontMetrics,
        range: Range<usize>,
        kind: TokenKind,
    ) {
        if kind == TokenKind::Word && self.split_words {
            let word_start = self.byte_offsets[range.start];
            let word = &self.string[word_start..self.byte_offsets[range.end]];
            let mut char_start = range.start;
            for grapheme in word.graphemes(true) {
                let char_end = char_start + grapheme.chars().count();
                self.push_one(run, font, metrics, char_start..char_end, kind);
                char_start = char_end;
            }
        } else {
            self.push_one(run, font, metrics, range, kind);
        }
    }

    fn push_one(
        &mut self,
        run: usize,
        font: &crate::Font,
        metrics: FontMetrics,
        range: Range<usize>,
        kind: TokenKind,
    ) {
        let text = &self.string[self.byte_offsets[range.start]..self.byte_offsets[range.end]];
        let shaped = match kind {
            TokenKind::Newline => ShapedText::default(),
            TokenKind::Word | TokenKind::Whitespace => self.provider.shape(font, text),
        };

        log::trace!("    Token {:?} {:?}: {:?} w={}", kind, range, text, shaped.advance);

        self.tokens.push(Token {
            kind,
            range,
            run,
            width: shaped.advance,
            shaped,
            height: metrics.height(),
            metrics,
            x: 0.0,
            y: 0.0,
            line: 0,
            line_height: 0.0,
        });
    }
}
