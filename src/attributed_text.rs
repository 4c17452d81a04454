// SPDX-License-Identifier: MIT OR Apache-2.0

use core::ops::Range;

use crate::{Attr, AttrKind, Attrs, Color, Decorations, Font};

/// Horizontal placement of each line inside the layout box
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
    /// Inter-word stretching is not performed; lines are placed as [`Align::Left`]
    Justify,
}

/// Wrapping mode
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Wrap {
    /// No wrapping, only hard line breaks start a new line
    None,
    /// Wraps at word boundaries
    #[default]
    Word,
    /// Wraps at grapheme boundaries, also inside words
    Char,
}

/// Base direction of the paragraph
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ReadingDirection {
    /// Detected from the first strong character of the text
    #[default]
    Natural,
    LeftToRight,
    RightToLeft,
}

/// A style value applied to a range of characters
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StyleSpan {
    /// Character range, always non-empty and inside the text when added
    pub range: Range<usize>,
    pub attr: Attr,
}

/// Text with paragraph settings and an ordered list of style ranges
///
/// Ranges are expressed in characters (Unicode scalar values). Ranges may overlap; when two
/// ranges of the same kind cover a character, the one added last wins.
#[derive(Clone, Debug, Default)]
pub struct AttributedText {
    text: String,
    len: usize,
    align: Align,
    wrap: Wrap,
    direction: ReadingDirection,
    line_spacing: f32,
    defaults: Attrs,
    spans: Vec<StyleSpan>,
}

impl AttributedText {
    /// Create text with default paragraph settings and no style ranges
    pub fn new<T: Into<String>>(text: T) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            len,
            ..Default::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, keeping paragraph settings and style ranges
    ///
    /// Ranges extending past the new text are clipped during layout.
    pub fn set_text<T: Into<String>>(&mut self, text: T) {
        self.text = text.into();
        self.len = self.text.chars().count();
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn set_align(&mut self, align: Align) {
        self.align = align;
    }

    pub fn wrap(&self) -> Wrap {
        self.wrap
    }

    pub fn set_wrap(&mut self, wrap: Wrap) {
        self.wrap = wrap;
    }

    pub fn direction(&self) -> ReadingDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: ReadingDirection) {
        self.direction = direction;
    }

    /// Extra space added below every line, in pixels
    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    pub fn set_line_spacing(&mut self, line_spacing: f32) {
        self.line_spacing = line_spacing;
    }

    /// Attributes used for characters no range covers
    pub fn defaults(&self) -> &Attrs {
        &self.defaults
    }

    pub fn set_defaults(&mut self, defaults: Attrs) {
        self.defaults = defaults;
    }

    /// Style ranges in the order they were added
    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// Append a style range
    ///
    /// The range is clamped to the text; a range left empty by clamping is dropped.
    /// Returns `true` if the range was stored.
    pub fn add_attr<A: Into<Attr>>(&mut self, range: Range<usize>, attr: A) -> bool {
        let start = range.start.min(self.len);
        let end = range.end.min(self.len);
        if start >= end {
            log::trace!("dropping empty style range {:?} (len {})", range, self.len);
            return false;
        }
        self.spans.push(StyleSpan {
            range: start..end,
            attr: attr.into(),
        });
        true
    }

    pub fn set_font(&mut self, range: Range<usize>, font: Font) -> bool {
        self.add_attr(range, font)
    }

    pub fn set_color(&mut self, range: Range<usize>, color: Color) -> bool {
        self.add_attr(range, color)
    }

    pub fn set_decorations(&mut self, range: Range<usize>, decorations: Decorations) -> bool {
        self.add_attr(range, decorations)
    }

    /// Effective value of one style kind at a character
    ///
    /// Scans the ranges in append order, the last match wins. Falls back to [`Self::defaults`].
    pub fn attr_at(&self, index: usize, kind: AttrKind) -> Attr {
        let mut found = None;
        for span in self.spans.iter() {
            if span.attr.kind() == kind && span.range.contains(&index) {
                found = Some(&span.attr);
            }
        }
        match found {
            Some(attr) => attr.clone(),
            None => self.defaults.get(kind),
        }
    }

    /// Effective value of every style kind at a character
    pub fn attrs_at(&self, index: usize) -> Attrs {
        let mut attrs = self.defaults.clone();
        for span in self.spans.iter() {
            if span.range.contains(&index) {
                attrs.apply(&span.attr);
            }
        }
        attrs
    }
}
