// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{Font, FontKey, FontProvider, GlyphId, HashMap, OutlineCommand};

/// Key for caching glyph outlines
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CacheKey {
    /// Face key of the font
    pub font_key: FontKey,
    /// Glyph ID
    pub glyph_id: GlyphId,
    /// `f32` bits of font size
    pub font_size_bits: u32,
}

impl CacheKey {
    pub fn new(font: &Font, glyph_id: GlyphId) -> Self {
        Self {
            font_key: font.key(),
            glyph_id,
            font_size_bits: font.size.to_bits(),
        }
    }
}

/// Cache of glyph outlines, in pixels relative to the glyph origin
///
/// Glyphs without an outline are cached as well, so the provider is asked once per key.
#[derive(Debug, Default)]
pub struct OutlineCache {
    outlines: HashMap<CacheKey, Option<Vec<OutlineCommand>>>,
}

impl OutlineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the outline of a glyph, asking `provider` on a cache miss
    pub fn get<P: FontProvider + ?Sized>(
        &mut self,
        provider: &P,
        font: &Font,
        glyph_id: GlyphId,
    ) -> Option<&[OutlineCommand]> {
        self.outlines
            .entry(CacheKey::new(font, glyph_id))
            .or_insert_with(|| provider.outline(font, glyph_id))
            .as_deref()
    }

    pub fn len(&self) -> usize {
        self.outlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    pub fn clear(&mut self) {
        self.outlines.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{FontMetrics, ShapedText};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingProvider {
        outlines: AtomicUsize,
    }

    impl FontProvider for CountingProvider {
        fn metrics(&self, font: &Font) -> FontMetrics {
            FontMetrics::fallback(font)
        }

        fn shape(&self, _font: &Font, _text: &str) -> ShapedText {
            ShapedText::default()
        }

        fn outline(&self, font: &Font, glyph_id: GlyphId) -> Option<Vec<OutlineCommand>> {
            self.outlines.fetch_add(1, Ordering::Relaxed);
            if glyph_id == 0 {
                return None;
            }
            Some(vec![
                OutlineCommand::MoveTo(0.0, 0.0),
                OutlineCommand::LineTo(font.size, 0.0),
                OutlineCommand::Close,
            ])
        }
    }

    #[test]
    fn asks_provider_once_per_key() {
        let provider = CountingProvider::default();
        let mut cache = OutlineCache::new();
        let small = Font::new().size(10.0);
        let large = Font::new().size(20.0);

        assert_eq!(cache.get(&provider, &small, 5).map(<[_]>::len), Some(3));
        assert_eq!(cache.get(&provider, &small, 5).map(<[_]>::len), Some(3));
        assert!(cache.get(&provider, &small, 0).is_none());
        assert!(cache.get(&provider, &small, 0).is_none());
        assert_eq!(
            cache.get(&provider, &large, 5).and_then(|outline| outline.get(1).copied()),
            Some(OutlineCommand::LineTo(20.0, 0.0))
        );

        assert_eq!(provider.outlines.load(Ordering::Relaxed), 3);
        assert_eq!(cache.len(), 3);
        cache.clear();
        assert!(cache.is_empty());
    }
}
