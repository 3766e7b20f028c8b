use crate::errors::{Result, UiError};
use crate::ui::color::Color;

/// Spinner animation runes, cycled once per frame.
pub const SPINNER_RUNES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub const SPINNER_COLOR: Color = Color::CYAN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub name: &'static str,
    pub rune: &'static str,
    pub color: Color,
}

impl Glyph {
    pub const STAR: Glyph = Glyph::new("star", "⭑", Color::YELLOW);
    pub const INFO: Glyph = Glyph::new("info", "𝒾", Color::BLUE);
    pub const QUESTION: Glyph = Glyph::new("question", "?", Color::BLUE);
    pub const CHECK: Glyph = Glyph::new("check", "✓", Color::GREEN);
    pub const X: Glyph = Glyph::new("x", "✗", Color::RED);
    pub const BUG: Glyph = Glyph::new("bug", "🐛", Color::YELLOW);
    pub const CHEVRON: Glyph = Glyph::new("chevron", "»", Color::YELLOW);

    const MAP: [Glyph; 7] = [
        Glyph::STAR,
        Glyph::INFO,
        Glyph::QUESTION,
        Glyph::CHECK,
        Glyph::X,
        Glyph::BUG,
        Glyph::CHEVRON,
    ];

    const fn new(name: &'static str, rune: &'static str, color: Color) -> Self {
        Self { name, rune, color }
    }

    pub fn lookup(name: &str) -> Result<Glyph> {
        Self::MAP
            .iter()
            .find(|glyph| glyph.name == name)
            .copied()
            .ok_or_else(|| UiError::InvalidGlyphName {
                name: name.to_string(),
                available: Self::available().join(","),
            })
    }

    pub fn available() -> Vec<&'static str> {
        Self::MAP.iter().map(|glyph| glyph.name).collect()
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.color.code(), self.rune)
    }
}

/// Colored spinner rune for animation frame `frame`; wraps past the cycle end.
pub fn spinner_rune(frame: usize) -> String {
    format!(
        "{}{}",
        SPINNER_COLOR.code(),
        SPINNER_RUNES[frame % SPINNER_RUNES.len()]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_color() {
        assert_eq!(Glyph::CHECK.to_string(), "\x1b[32m✓");
        assert_eq!(Glyph::X.to_string(), "\x1b[31m✗");
    }

    #[test]
    fn spinner_wraps() {
        assert_eq!(spinner_rune(0), spinner_rune(SPINNER_RUNES.len()));
        assert!(spinner_rune(1).ends_with('⠙'));
    }

    #[test]
    fn unknown_glyph_is_an_error() {
        let err = Glyph::lookup("sparkle").unwrap_err();
        assert!(err.to_string().contains("star,info,question,check,x,bug,chevron"));
    }
}
