// SPDX-License-Identifier: MIT OR Apache-2.0

use core::hash::{Hash, Hasher};
use smol_str::SmolStr;

pub use fontdb::{Family, Stretch, Style, Weight};

use crate::Color;

/// Size used by [`Font::default`], in pixels
pub const DEFAULT_FONT_SIZE: f32 = 15.0;

/// An owned version of [`Family`]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FamilyOwned {
    Name(SmolStr),
    Serif,
    SansSerif,
    Cursive,
    Fantasy,
    Monospace,
}

impl FamilyOwned {
    pub fn new(family: Family) -> Self {
        match family {
            Family::Name(name) => FamilyOwned::Name(SmolStr::from(name)),
            Family::Serif => FamilyOwned::Serif,
            Family::SansSerif => FamilyOwned::SansSerif,
            Family::Cursive => FamilyOwned::Cursive,
            Family::Fantasy => FamilyOwned::Fantasy,
            Family::Monospace => FamilyOwned::Monospace,
        }
    }

    pub fn as_family(&self) -> Family<'_> {
        match self {
            FamilyOwned::Name(name) => Family::Name(name),
            FamilyOwned::Serif => Family::Serif,
            FamilyOwned::SansSerif => Family::SansSerif,
            FamilyOwned::Cursive => Family::Cursive,
            FamilyOwned::Fantasy => Family::Fantasy,
            FamilyOwned::Monospace => Family::Monospace,
        }
    }
}

/// Key identifying a font face independent of its size
///
/// Loaded faces are cached by this key, see [`crate::FontSystem`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FontKey {
    pub family: FamilyOwned,
    pub weight: Weight,
    pub style: Style,
    pub stretch: Stretch,
}

/// A font request: face description plus pixel size
#[derive(Clone, Debug)]
pub struct Font {
    pub family: FamilyOwned,
    /// Height of the font in pixels
    pub size: f32,
    pub weight: Weight,
    pub style: Style,
    pub stretch: Stretch,
}

impl Font {
    /// Create a new font with the default family, size, and style
    pub fn new() -> Self {
        Self {
            family: FamilyOwned::SansSerif,
            size: DEFAULT_FONT_SIZE,
            weight: Weight::NORMAL,
            style: Style::Normal,
            stretch: Stretch::Normal,
        }
    }

    /// Set [Family]
    pub fn family(mut self, family: Family) -> Self {
        self.family = FamilyOwned::new(family);
        self
    }

    /// Set size in pixels
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set [Weight]
    pub fn weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Set [Style]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set [Stretch]
    pub fn stretch(mut self, stretch: Stretch) -> Self {
        self.stretch = stretch;
        self
    }

    /// Shortcut for `weight(Weight::BOLD)`
    pub fn bold(self) -> Self {
        self.weight(Weight::BOLD)
    }

    /// Shortcut for `style(Style::Italic)`
    pub fn italic(self) -> Self {
        self.style(Style::Italic)
    }

    /// Get the face cache key of this font
    pub fn key(&self) -> FontKey {
        FontKey {
            family: self.family.clone(),
            weight: self.weight,
            style: self.style,
            stretch: self.stretch,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new()
    }
}

// Sizes compare by bit pattern so fonts can key maps and run tables
impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self.size.to_bits() == other.size.to_bits()
            && self.weight == other.weight
            && self.style == other.style
            && self.stretch == other.stretch
    }
}

impl Eq for Font {}

impl Hash for Font {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.size.to_bits().hash(state);
        self.weight.hash(state);
        self.style.hash(state);
        self.stretch.hash(state);
    }
}

bitflags::bitflags! {
    /// Lines drawn along a run of text
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
    #[repr(transparent)]
    pub struct Decorations: u8 {
        const UNDERLINE = 1;
        const STRIKETHROUGH = 2;
    }
}

/// The kind of a style range, see [`Attr`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AttrKind {
    Font,
    Color,
    Decorations,
}

/// A style value applied to a range of characters
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Attr {
    Font(Font),
    Color(Color),
    Decorations(Decorations),
}

impl Attr {
    pub fn kind(&self) -> AttrKind {
        match self {
            Self::Font(_) => AttrKind::Font,
            Self::Color(_) => AttrKind::Color,
            Self::Decorations(_) => AttrKind::Decorations,
        }
    }
}

impl From<Font> for Attr {
    fn from(font: Font) -> Self {
        Self::Font(font)
    }
}

impl From<Color> for Attr {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<Decorations> for Attr {
    fn from(decorations: Decorations) -> Self {
        Self::Decorations(decorations)
    }
}

/// Every style kind resolved to a single value
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Attrs {
    pub font: Font,
    pub color: Color,
    pub decorations: Decorations,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn decorations(mut self, decorations: Decorations) -> Self {
        self.decorations = decorations;
        self
    }

    /// Get the value of one kind as an [`Attr`]
    pub fn get(&self, kind: AttrKind) -> Attr {
        match kind {
            AttrKind::Font => Attr::Font(self.font.clone()),
            AttrKind::Color => Attr::Color(self.color),
            AttrKind::Decorations => Attr::Decorations(self.decorations),
        }
    }

    /// Replace the value of the kind carried by `attr`
    pub fn apply(&mut self, attr: &Attr) {
        match attr {
            Attr::Font(font) => self.font = font.clone(),
            Attr::Color(color) => self.color = *color,
            Attr::Decorations(decorations) => self.decorations = *decorations,
        }
    }
}
