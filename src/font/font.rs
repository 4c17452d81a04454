// SPDX-License-Identifier: MIT OR Apache-2.0

use core::fmt;
use std::sync::Arc;

use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::MetadataProvider;

use crate::{
    FontMetrics, GlyphId, OutlineCommand, ShapePlanCache, ShapePlanKey, ShapedText, NOTDEF_GLYPH,
};

#[cfg(not(feature = "warn_on_missing_glyphs"))]
use log::debug as missing_warn;
#[cfg(feature = "warn_on_missing_glyphs")]
use log::warn as missing_warn;

/// A loaded font face
///
/// Holds a copy of the face data so it can outlive the database borrow and be shared between
/// threads.
pub struct FontFace {
    id: fontdb::ID,
    data: Arc<[u8]>,
    index: u32,
    units_per_em: u16,
    post_script_name: String,
    shaper_data: harfrust::ShaperData,
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("post_script_name", &self.post_script_name)
            .finish_non_exhaustive()
    }
}

impl FontFace {
    pub fn new(db: &fontdb::Database, id: fontdb::ID) -> Option<Self> {
        let info = db.face(id)?;
        let (data, index) = db.with_face_data(id, |data, index| (Arc::<[u8]>::from(data), index))?;

        let units_per_em = {
            let font = skrifa::FontRef::from_index(&data, index).ok()?;
            font.metrics(Size::unscaled(), LocationRef::default())
                .units_per_em
        };
        if units_per_em == 0 {
            log::warn!("font '{}' has no units per em", info.post_script_name);
            return None;
        }

        let shaper_data = match harfrust::FontRef::from_index(&data, index) {
            Ok(font_ref) => harfrust::ShaperData::new(&font_ref),
            Err(err) => {
                log::warn!("failed to read font '{}': {}", info.post_script_name, err);
                return None;
            }
        };

        Some(Self {
            id,
            data,
            index,
            units_per_em,
            post_script_name: info.post_script_name.clone(),
            shaper_data,
        })
    }

    pub fn id(&self) -> fontdb::ID {
        self.id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn post_script_name(&self) -> &str {
        &self.post_script_name
    }

    fn skrifa(&self) -> Option<skrifa::FontRef<'_>> {
        skrifa::FontRef::from_index(&self.data, self.index).ok()
    }

    /// Vertical metrics scaled to `font_size` pixels
    pub fn metrics(&self, font_size: f32) -> FontMetrics {
        let Some(font) = self.skrifa() else {
            return FontMetrics {
                ascent: font_size * 0.8,
                descent: font_size * 0.2,
                line_gap: 0.0,
            };
        };
        let metrics = font.metrics(Size::new(font_size), LocationRef::default());
        FontMetrics {
            ascent: metrics.ascent.abs(),
            descent: metrics.descent.abs(),
            line_gap: metrics.leading.max(0.0),
        }
    }

    /// Shape a string left to right at `font_size` pixels
    ///
    /// Shape plans are taken from `plans`, and built there on first use.
    pub fn shape(&self, font_size: f32, text: &str, plans: &ShapePlanCache) -> ShapedText {
        let font_ref = match harfrust::FontRef::from_index(&self.data, self.index) {
            Ok(ok) => ok,
            Err(err) => {
                log::warn!("failed to read font '{}': {}", self.post_script_name, err);
                return ShapedText::from_advances(
                    text.chars().map(|_| (NOTDEF_GLYPH, font_size * 0.5)),
                );
            }
        };

        let shaper = self.shaper_data.shaper(&font_ref).build();

        let mut buffer = harfrust::UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(harfrust::Direction::LeftToRight);
        buffer.guess_segment_properties();
        // The plan must agree with the buffer, unknown scripts included
        let script = buffer.script();
        buffer.set_script(script);

        let key = ShapePlanKey {
            font: self.id,
            direction: buffer.direction(),
            script,
            language: buffer.language(),
        };
        let plan = plans.get_or_insert_with(key.clone(), || {
            harfrust::ShapePlan::new(
                &shaper,
                key.direction,
                Some(key.script),
                key.language.as_ref(),
                &[],
            )
        });

        let glyph_buffer = shaper.shape_with_plan(&plan, buffer, &[]);
        let scale = font_size / f32::from(self.units_per_em);

        let glyphs = glyph_buffer
            .glyph_infos()
            .iter()
            .zip(glyph_buffer.glyph_positions().iter())
            .map(|(info, pos)| {
                let id = GlyphId::try_from(info.glyph_id).unwrap_or(NOTDEF_GLYPH);
                if id == NOTDEF_GLYPH {
                    missing_warn!(
                        "missing glyph for cluster {} of '{}' in font '{}'",
                        info.cluster,
                        text,
                        self.post_script_name
                    );
                }
                (id, pos.x_advance as f32 * scale)
            });

        ShapedText::from_advances(glyphs)
    }

    /// Outline of a glyph at `font_size` pixels, y up from the baseline
    pub fn outline(&self, font_size: f32, glyph_id: GlyphId) -> Option<Vec<OutlineCommand>> {
        let font = self.skrifa()?;
        let outlines = font.outline_glyphs();
        let glyph = outlines.get(skrifa::GlyphId::from(glyph_id))?;

        let mut pen = CommandPen::default();
        let settings = DrawSettings::unhinted(Size::new(font_size), LocationRef::default());
        if let Err(err) = glyph.draw(settings, &mut pen) {
            log::warn!(
                "failed to draw glyph {} of font '{}': {}",
                glyph_id,
                self.post_script_name,
                err
            );
            return None;
        }
        Some(pen.commands)
    }
}

#[derive(Default)]
struct CommandPen {
    commands: Vec<OutlineCommand>,
}

impl OutlinePen for CommandPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(OutlineCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(OutlineCommand::LineTo(x, y));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.commands.push(OutlineCommand::QuadTo(cx0, cy0, x, y));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.commands
            .push(OutlineCommand::CurveTo(cx0, cy0, cx1, cy1, x, y));
    }

    fn close(&mut self) {
        self.commands.push(OutlineCommand::Close);
    }
}
