// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Glyph Layout
//!
//! This library lays out rich text inside a box. Text with overlapping style ranges is resolved
//! into runs of equal attributes, split into word, whitespace and newline tokens, broken into
//! lines greedily, aligned, and turned into a tree of lines, runs and positioned glyphs. Font
//! metrics and shaping come from a [FontProvider]; [FontSystem] implements one on top of fontdb,
//! harfrust and skrifa.
//!
//! Layout engines implement [TypeLayout]. [PortableEngine] runs everywhere a [FontProvider] is
//! available, while [PlatformEngine] wraps a native text stack behind the same output format.
//!
//! ```
//! use glyph_layout::{
//!     fontdb, Align, AttributedText, Color, FontSystem, PortableEngine, Rect, TypeLayout,
//! };
//!
//! // A FontSystem provides access to fonts, create one per application. Use
//! // FontSystem::new() to load the installed system fonts.
//! let font_system = FontSystem::new_with_db(fontdb::Database::new());
//!
//! // An engine turns attributed text into a glyph layout
//! let engine = PortableEngine::new(&font_system);
//!
//! // Attributed text carries the string, paragraph options, and style ranges
//! let mut text = AttributedText::new("Hello, Rust! 🦀\nSecond line");
//! text.set_align(Align::Center);
//! text.set_color(0..5, Color::rgb(0xFF, 0x00, 0x00));
//!
//! // Lay the text out inside a box
//! let layout = engine.layout(&text, Rect::new(0.0, 0.0, 200.0, 100.0));
//! assert_eq!(layout.lines.len(), 2);
//!
//! // Inspect the output glyphs
//! for glyph in layout.glyphs() {
//!     println!("{:?} at {}, {}", glyph.id, glyph.x, glyph.y);
//! }
//! ```

pub use fontdb;

pub use self::attributed_text::*;
mod attributed_text;

pub use self::attrs::*;
mod attrs;

pub use self::attrs_runs::*;
mod attrs_runs;

pub use self::color::*;
mod color;

pub use self::engine::*;
mod engine;

#[cfg(feature = "std")]
pub use self::font::*;
#[cfg(feature = "std")]
mod font;

pub use self::glyph_cache::*;
mod glyph_cache;

pub use self::justify::*;
mod justify;

pub use self::layout::*;
mod layout;

pub use self::line_break::*;
mod line_break;

pub use self::platform::*;
mod platform;

pub use self::provider::*;
mod provider;

pub use self::render::*;
mod render;

pub use self::token::*;
mod token;

type BuildHasher = core::hash::BuildHasherDefault<rustc_hash::FxHasher>;

pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V, BuildHasher>;
