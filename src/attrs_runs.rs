// SPDX-License-Identifier: MIT OR Apache-2.0

use core::ops::Range;
use rangemap::RangeMap;

use crate::{Attr, AttributedText, Attrs};

/// A maximal character range over which every style kind resolves to the same value
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttrsRun {
    pub range: Range<usize>,
    pub attrs: Attrs,
}

/// Run table of an [`AttributedText`]
///
/// The runs partition `0..len` in ascending order, without gaps or overlaps.
#[derive(Clone, Debug, Default)]
pub struct AttrsRuns {
    runs: Vec<AttrsRun>,
}

impl AttrsRuns {
    /// Resolve the overlapping style ranges of `text` into runs
    ///
    /// Each style kind is tracked in its own range map. Inserting the ranges in the order they
    /// were added lets later ranges overwrite earlier ones.
    pub fn new(text: &AttributedText) -> Self {
        let len = text.len();
        if len == 0 {
            return Self::default();
        }

        let defaults = text.defaults();
        let mut fonts = RangeMap::new();
        let mut colors = RangeMap::new();
        let mut decorations = RangeMap::new();
        fonts.insert(0..len, defaults.font.clone());
        colors.insert(0..len, defaults.color);
        decorations.insert(0..len, defaults.decorations);

        for span in text.spans() {
            // The text may have been shortened after the range was added
            let start = span.range.start.min(len);
            let end = span.range.end.min(len);
            if start >= end {
                continue;
            }
            match &span.attr {
                Attr::Font(font) => fonts.insert(start..end, font.clone()),
                Attr::Color(color) => colors.insert(start..end, *color),
                Attr::Decorations(value) => decorations.insert(start..end, *value),
            }
        }

        let mut boundaries: Vec<usize> = fonts
            .iter()
            .map(|(range, _)| range.start)
            .chain(colors.iter().map(|(range, _)| range.start))
            .chain(decorations.iter().map(|(range, _)| range.start))
            .collect();
        boundaries.push(len);
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut runs: Vec<AttrsRun> = Vec::with_capacity(boundaries.len() - 1);
        for window in boundaries.windows(2) {
            let (start, end) = (window[0], window[1]);
            let attrs = Attrs {
                font: fonts
                    .get(&start)
                    .cloned()
                    .unwrap_or_else(|| defaults.font.clone()),
                color: colors.get(&start).copied().unwrap_or(defaults.color),
                decorations: decorations
                    .get(&start)
                    .copied()
                    .unwrap_or(defaults.decorations),
            };
            match runs.last_mut() {
                Some(last) if last.attrs == attrs => last.range.end = end,
                _ => runs.push(AttrsRun {
                    range: start..end,
                    attrs,
                }),
            }
        }

        log::trace!("{} style ranges resolved into {} runs", text.spans().len(), runs.len());

        Self { runs }
    }

    /// Reference segmentation: resolves every character by scanning all ranges
    ///
    /// Quadratic in the number of ranges, kept to validate [`Self::new`].
    pub fn new_per_char(text: &AttributedText) -> Self {
        let mut runs: Vec<AttrsRun> = Vec::new();
        for index in 0..text.len() {
            let attrs = text.attrs_at(index);
            match runs.last_mut() {
                Some(last) if last.attrs == attrs => last.range.end = index + 1,
                _ => runs.push(AttrsRun {
                    range: index..index + 1,
                    attrs,
                }),
            }
        }
        Self { runs }
    }

    pub fn runs(&self) -> &[AttrsRun] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Find the run containing a character
    pub fn run_at(&self, index: usize) -> Option<&AttrsRun> {
        let i = self.runs.partition_point(|run| run.range.end <= index);
        self.runs.get(i).filter(|run| run.range.contains(&index))
    }
}
