//! Color themes
//!
//! A theme maps token kinds to a [`Style`]. Lookups walk the kind hierarchy, so a style
//! declared for `NUMBER` applies to every `NUMBER_*` kind that has no entry of its own.
//! Themes are static data; [`ThemeRegistry::builtin`] lists the ones shipped with the
//! crate and is what string-encoded theme options resolve against.

use crate::token::TokenKind;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Visual attributes for one token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    pub const fn new() -> Self {
        Style {
            fg: None,
            bg: None,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// True when the style changes nothing.
    pub fn is_plain(&self) -> bool {
        *self == Style::new()
    }
}

/// A named set of styles.
#[derive(Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub styles: &'static [(TokenKind, Style)],
}

impl Theme {
    /// Style declared for exactly this kind.
    pub fn own_style(&self, kind: TokenKind) -> Option<&Style> {
        self.styles
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, style)| style)
    }

    /// Style for `kind`, inherited from the nearest ancestor when it has none.
    pub fn style(&self, kind: TokenKind) -> Option<&Style> {
        kind.lineage().find_map(|candidate| self.own_style(candidate))
    }
}

mod palette {
    use super::Color;

    pub const GREY: Color = Color::rgb(0x99, 0x99, 0x99);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const DIM_RED: Color = Color::rgb(0x49, 0x31, 0x31);
    pub const WHITISH: Color = Color::rgb(0xF8, 0xF8, 0xF2);
    pub const DIM_GREY: Color = Color::rgb(0x75, 0x71, 0x5E);
    pub const DIM_GREEN: Color = Color::rgb(0x32, 0x49, 0x32);
    pub const SOFT_CYAN: Color = Color::rgb(0x66, 0xD9, 0xEF);
    pub const LIGHT_GREY: Color = Color::rgb(0xAA, 0xAA, 0xAA);
    pub const SOFT_YELLOW: Color = Color::rgb(0xE6, 0xDB, 0x74);
    pub const BRIGHT_PINK: Color = Color::rgb(0xF9, 0x26, 0x72);
    pub const BRIGHT_GREEN: Color = Color::rgb(0xA6, 0xE2, 0x2E);
    pub const LIGHT_VIOLET: Color = Color::rgb(0xAE, 0x81, 0xFF);

    pub const SLATE: Color = Color::rgb(0x40, 0x3D, 0x3D);
    pub const VIOLET: Color = Color::rgb(0xAF, 0x87, 0xFF);
    pub const STRAW: Color = Color::rgb(0xD7, 0xD7, 0x87);
    pub const DUSK_BLUE: Color = Color::rgb(0x5E, 0x5D, 0x83);
    pub const STEEL: Color = Color::rgb(0x46, 0x54, 0x57);
}

use palette::*;

pub static MONOKAI: Theme = Theme {
    name: "monokai",
    styles: &[
        (TokenKind::Comment, Style::new().fg(DIM_GREY).italic()),
        (
            TokenKind::CommentDocumentation,
            Style::new().fg(DIM_GREY).italic().bold(),
        ),
        (
            TokenKind::GenericInserted,
            Style::new().fg(WHITE).bg(DIM_GREEN),
        ),
        (TokenKind::GenericDeleted, Style::new().fg(WHITE).bg(DIM_RED)),
        (TokenKind::GenericHeading, Style::new().fg(GREY)),
        (TokenKind::GenericStrong, Style::new().bold()),
        (TokenKind::GenericSubheading, Style::new().fg(LIGHT_GREY)),
        (TokenKind::Keyword, Style::new().fg(SOFT_CYAN).bold()),
        (TokenKind::KeywordNamespace, Style::new().fg(BRIGHT_PINK).bold()),
        (TokenKind::Operator, Style::new().fg(BRIGHT_PINK).bold()),
        (TokenKind::Number, Style::new().fg(LIGHT_VIOLET)),
        (TokenKind::StringSingle, Style::new().fg(LIGHT_VIOLET)),
        (TokenKind::String, Style::new().fg(SOFT_YELLOW)),
        (TokenKind::NameClass, Style::new().fg(BRIGHT_GREEN).bold()),
        (TokenKind::NameFunction, Style::new().fg(BRIGHT_GREEN).bold()),
        (TokenKind::Name, Style::new().fg(WHITISH)),
        (TokenKind::NameTag, Style::new().fg(BRIGHT_PINK)),
    ],
};

pub static MOLOKAI: Theme = Theme {
    name: "molokai",
    styles: &[
        (TokenKind::Comment, Style::new().fg(DUSK_BLUE).italic()),
        (
            TokenKind::CommentDocumentation,
            Style::new().fg(STEEL).italic(),
        ),
        (TokenKind::GenericInserted, Style::new().fg(BRIGHT_GREEN)),
        (TokenKind::GenericDeleted, Style::new().fg(BRIGHT_PINK)),
        (TokenKind::GenericHeading, Style::new().fg(SLATE)),
        (TokenKind::GenericStrong, Style::new().bold()),
        (TokenKind::GenericSubheading, Style::new().fg(STEEL)),
        (TokenKind::Keyword, Style::new().fg(SOFT_CYAN).bold()),
        (TokenKind::KeywordNamespace, Style::new().fg(BRIGHT_PINK).bold()),
        (TokenKind::Operator, Style::new().fg(BRIGHT_PINK).bold()),
        (TokenKind::Number, Style::new().fg(VIOLET)),
        (TokenKind::SequenceEscaped, Style::new().fg(VIOLET)),
        (TokenKind::String, Style::new().fg(STRAW)),
        (TokenKind::NameClass, Style::new().fg(BRIGHT_GREEN).bold()),
        (TokenKind::NameFunction, Style::new().fg(BRIGHT_GREEN).bold()),
        (TokenKind::Name, Style::new().fg(WHITISH)),
        (TokenKind::NameTag, Style::new().fg(BRIGHT_PINK)),
    ],
};

static BUILTIN: Lazy<ThemeRegistry> = Lazy::new(|| ThemeRegistry::new(vec![&MONOKAI, &MOLOKAI]));

/// Ordered collection of themes.
pub struct ThemeRegistry {
    themes: Vec<&'static Theme>,
}

impl ThemeRegistry {
    pub fn new(themes: Vec<&'static Theme>) -> Self {
        ThemeRegistry { themes }
    }

    /// The process-wide table of shipped themes.
    pub fn builtin() -> &'static ThemeRegistry {
        &BUILTIN
    }

    /// Find a theme by name, ignoring case.
    pub fn by_name(&self, name: &str) -> Option<&'static Theme> {
        self.themes
            .iter()
            .copied()
            .find(|theme| theme.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Theme> + '_ {
        self.themes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.by_name("Monokai").map(|t| t.name), Some("monokai"));
        assert!(registry.by_name("solarized").is_none());
    }

    #[test]
    fn test_style_inherits_from_parent() {
        let style = MONOKAI.style(TokenKind::NumberHexadecimal);
        assert_eq!(style.and_then(|s| s.fg), Some(LIGHT_VIOLET));
        assert!(MONOKAI.own_style(TokenKind::NumberHexadecimal).is_none());
    }

    #[test]
    fn test_child_overrides_parent() {
        let pink = MONOKAI.style(TokenKind::KeywordNamespace).and_then(|s| s.fg);
        let cyan = MONOKAI.style(TokenKind::KeywordType).and_then(|s| s.fg);
        assert_eq!(pink, Some(BRIGHT_PINK));
        assert_eq!(cyan, Some(SOFT_CYAN));
    }

    #[test]
    fn test_unstyled_kind() {
        assert!(MOLOKAI.style(TokenKind::Text).is_none());
        assert!(Style::new().is_plain());
        assert!(!Style::new().bold().is_plain());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(0xA6, 0xE2, 0x2E).to_string(), "#a6e22e");
    }
}
