// SPDX-License-Identifier: MIT OR Apache-2.0

use unicode_bidi::BidiInfo;

use crate::{content_width, Align, AttributedText, LineBox, ReadingDirection, Token, Wrap};

/// Whether the paragraph direction of `text` is right to left
///
/// [`ReadingDirection::Natural`] uses the direction of the first strong character.
pub fn is_rtl(text: &AttributedText) -> bool {
    match text.direction() {
        ReadingDirection::LeftToRight => false,
        ReadingDirection::RightToLeft => true,
        ReadingDirection::Natural => {
            let bidi = BidiInfo::new(text.text(), None);
            bidi.paragraphs
                .first()
                .is_some_and(|para| para.level.is_rtl())
        }
    }
}

/// Alignment actually applied to lines
///
/// Left and right swap in right to left text. Justified text is laid out left aligned.
pub fn effective_align(align: Align, rtl: bool) -> Align {
    match (align, rtl) {
        (Align::Justify, false) => {
            log::trace!("justified alignment is laid out left aligned");
            Align::Left
        }
        (Align::Justify, true) => Align::Right,
        (Align::Left, true) => Align::Right,
        (Align::Right, true) => Align::Left,
        (align, _) => align,
    }
}

/// Shift the tokens of every line horizontally inside a box of `width`
///
/// Content wider than the box gets a negative shift. Nothing moves when `width` is not finite,
/// or when it is not positive under [`Wrap::None`], where line breaking treated it as unbounded.
pub fn justify(tokens: &mut [Token], lines: &[LineBox], width: f32, wrap: Wrap, align: Align) {
    if align == Align::Left || !width.is_finite() || (wrap == Wrap::None && width <= 0.0) {
        return;
    }

    for line in lines {
        let line_tokens = &mut tokens[line.tokens.clone()];
        let free = width - content_width(line_tokens);
        let dx = match align {
            Align::Right => free,
            Align::Center => free / 2.0,
            Align::Left | Align::Justify => 0.0,
        };
        if dx != 0.0 {
            for token in line_tokens.iter_mut() {
                token.x += dx;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        break_lines, AttrsRuns, Font, FontMetrics, FontProvider, GlyphId, ShapedText, Wrap,
    };

    struct FixedProvider;

    impl FontProvider for FixedProvider {
        fn metrics(&self, _font: &Font) -> FontMetrics {
            FontMetrics {
                ascent: 8.0,
                descent: 2.0,
                line_gap: 0.0,
            }
        }

        fn shape(&self, _font: &Font, text: &str) -> ShapedText {
            ShapedText::from_advances(text.chars().map(|_| (1 as GlyphId, 10.0)))
        }
    }

    fn laid_out(text: &AttributedText, width: f32, align: Align) -> Vec<Token> {
        let runs = AttrsRuns::new(text);
        let mut tokens = crate::tokenize(text, &runs, &FixedProvider);
        let lines = break_lines(&mut tokens, width, text.wrap(), 0.0);
        justify(&mut tokens, &lines, width, text.wrap(), align);
        tokens
    }

    #[test]
    fn center_ignores_trailing_space() {
        let text = AttributedText::new("abcd ");
        let tokens = laid_out(&text, 100.0, Align::Center);
        assert_eq!(tokens[0].x, 30.0);
        assert_eq!(tokens[1].x, 70.0);
    }

    #[test]
    fn right_per_line() {
        let text = AttributedText::new("ab\nabcd");
        let tokens = laid_out(&text, 100.0, Align::Right);
        assert_eq!(tokens[0].x, 80.0);
        assert_eq!(tokens[2].x, 60.0);
    }

    #[test]
    fn overflow_shifts_left() {
        let mut text = AttributedText::new("abcdefghijkl");
        text.set_wrap(Wrap::None);
        let tokens = laid_out(&text, 100.0, Align::Right);
        assert_eq!(tokens[0].x, -20.0);
    }

    #[test]
    fn unbounded_no_wrap_stays() {
        let mut text = AttributedText::new("abcd");
        text.set_wrap(Wrap::None);
        for width in [0.0, -10.0] {
            let tokens = laid_out(&text, width, Align::Center);
            assert_eq!(tokens[0].x, 0.0);
        }

        text.set_wrap(Wrap::Word);
        let tokens = laid_out(&text, 0.0, Align::Right);
        assert_eq!(tokens[0].x, -40.0);
    }

    #[test]
    fn rtl_swaps_sides() {
        assert_eq!(effective_align(Align::Left, true), Align::Right);
        assert_eq!(effective_align(Align::Right, true), Align::Left);
        assert_eq!(effective_align(Align::Center, true), Align::Center);
        assert_eq!(effective_align(Align::Justify, false), Align::Left);
        assert_eq!(effective_align(Align::Justify, true), Align::Right);
    }

    #[test]
    fn natural_direction() {
        let mut text = AttributedText::new("\u{5e9}\u{5dc}\u{5d5}\u{5dd} abc");
        assert!(is_rtl(&text));
        text.set_direction(ReadingDirection::LeftToRight);
        assert!(!is_rtl(&text));
        assert!(!is_rtl(&AttributedText::new("abc \u{5e9}")));

        let mut text = AttributedText::new("abc");
        text.set_direction(ReadingDirection::RightToLeft);
        assert!(is_rtl(&text));
    }
}
