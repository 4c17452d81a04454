// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::{
    FamilyOwned, Font, FontFace, FontKey, FontMetrics, FontProvider, GlyphId, HashMap,
    OutlineCommand, ShapePlanCache, ShapedText, NOTDEF_GLYPH,
};

/// Access system fonts
///
/// Implements [`FontProvider`] on top of a font database. Faces are loaded on first use and
/// cached for the lifetime of the font system.
pub struct FontSystem {
    db: fontdb::Database,
    face_cache: RwLock<HashMap<FontKey, Option<Arc<FontFace>>>>,
    shape_plan_cache: ShapePlanCache,
}

impl core::fmt::Debug for FontSystem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FontSystem")
            .field("faces", &self.db.len())
            .finish_non_exhaustive()
    }
}

impl FontSystem {
    /// Create a new [`FontSystem`], that allows access to any installed system fonts
    ///
    /// # Timing
    ///
    /// This function takes some time to run. It should only be called once, and the resulting
    /// [`FontSystem`] should be shared.
    pub fn new() -> Self {
        Self::new_with_fonts(core::iter::empty())
    }

    /// Create a new [`FontSystem`] with system fonts and the given extra font sources
    pub fn new_with_fonts(fonts: impl Iterator<Item = fontdb::Source>) -> Self {
        let mut db = fontdb::Database::new();

        let now = std::time::Instant::now();

        db.load_system_fonts();

        for source in fonts {
            db.load_font_source(source);
        }

        //TODO: configurable default fonts
        db.set_monospace_family("Fira Mono");
        db.set_sans_serif_family("Fira Sans");
        db.set_serif_family("DejaVu Serif");

        log::info!(
            "Parsed {} font faces in {}ms.",
            db.len(),
            now.elapsed().as_millis()
        );

        Self::new_with_db(db)
    }

    /// Create a new [`FontSystem`], manually specifying the font database
    pub fn new_with_db(db: fontdb::Database) -> Self {
        Self {
            db,
            face_cache: RwLock::new(HashMap::default()),
            shape_plan_cache: ShapePlanCache::new(),
        }
    }

    pub fn db(&self) -> &fontdb::Database {
        &self.db
    }

    /// Mutable access to the font database, clears the face and shape plan caches
    pub fn db_mut(&mut self) -> &mut fontdb::Database {
        self.face_cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.shape_plan_cache.clear();
        &mut self.db
    }

    /// Shape plans built so far, shared by every face
    pub fn shape_plan_cache(&self) -> &ShapePlanCache {
        &self.shape_plan_cache
    }

    pub fn into_db(self) -> fontdb::Database {
        self.db
    }

    /// Load a font from memory
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db_mut().load_font_data(data);
    }

    /// Load a font file
    pub fn load_font_file<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<()> {
        self.db_mut().load_font_file(path)
    }

    /// Get the face for a font key, loading it on first use
    ///
    /// Returns `None` when the database has no usable face at all.
    pub fn face(&self, key: &FontKey) -> Option<Arc<FontFace>> {
        {
            let cache = self
                .face_cache
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(face_opt) = cache.get(key) {
                return face_opt.clone();
            }
        }

        let now = std::time::Instant::now();
        let face_opt = self.load_face(key).map(Arc::new);
        log::debug!("loaded face for {:?} in {:?}", key, now.elapsed());

        let mut cache = self
            .face_cache
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Another thread may have loaded the same key in the meantime
        cache.entry(key.clone()).or_insert(face_opt).clone()
    }

    fn load_face(&self, key: &FontKey) -> Option<FontFace> {
        let families = [key.family.as_family()];
        let query = fontdb::Query {
            families: &families,
            weight: key.weight,
            stretch: key.stretch,
            style: key.style,
        };

        let id = match self.db.query(&query) {
            Some(id) => id,
            None => {
                let fallback = self.fallback_face(key);
                match fallback {
                    Some(id) => {
                        log::warn!("no face matches {:?}, using fallback face", key);
                        id
                    }
                    None => {
                        log::warn!("no face matches {:?} and no fallback is available", key);
                        return None;
                    }
                }
            }
        };

        let face = FontFace::new(&self.db, id);
        if face.is_none() {
            log::warn!("failed to load face {:?} for {:?}", id, key);
        }
        face
    }

    fn fallback_face(&self, key: &FontKey) -> Option<fontdb::ID> {
        if key.family != FamilyOwned::SansSerif {
            let families = [fontdb::Family::SansSerif];
            let query = fontdb::Query {
                families: &families,
                weight: key.weight,
                stretch: key.stretch,
                style: key.style,
            };
            if let Some(id) = self.db.query(&query) {
                return Some(id);
            }
        }
        self.db.faces().next().map(|face| face.id)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FontProvider for FontSystem {
    fn metrics(&self, font: &Font) -> FontMetrics {
        match self.face(&font.key()) {
            Some(face) => face.metrics(font.size),
            None => FontMetrics::fallback(font),
        }
    }

    fn shape(&self, font: &Font, text: &str) -> ShapedText {
        match self.face(&font.key()) {
            Some(face) => face.shape(font.size, text, &self.shape_plan_cache),
            None => ShapedText::from_advances(text.chars().map(|_| (NOTDEF_GLYPH, font.size * 0.5))),
        }
    }

    fn outline(&self, font: &Font, glyph_id: GlyphId) -> Option<Vec<OutlineCommand>> {
        self.face(&font.key())?.outline(font.size, glyph_id)
    }
}
