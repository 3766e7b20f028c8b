use crate::errors::{Result, UiError};
use crate::ui::ansi;

/// A named SGR color mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub name: &'static str,
    pub sgr: &'static str,
}

impl Color {
    pub const RED: Color = Color::new("red", "31");
    pub const GREEN: Color = Color::new("green", "32");
    pub const YELLOW: Color = Color::new("yellow", "33");
    // 9x is the high-intensity variant; plain 34 is hard to read on black.
    pub const BLUE: Color = Color::new("blue", "94");
    pub const MAGENTA: Color = Color::new("magenta", "35");
    pub const CYAN: Color = Color::new("cyan", "36");
    pub const RESET: Color = Color::new("reset", "0");
    pub const BOLD: Color = Color::new("bold", "1");
    pub const WHITE: Color = Color::new("white", "97");
    pub const GRAY: Color = Color::new("gray", "38;5;244");

    const MAP: [Color; 9] = [
        Color::RED,
        Color::GREEN,
        Color::YELLOW,
        Color::BLUE,
        Color::MAGENTA,
        Color::CYAN,
        Color::RESET,
        Color::BOLD,
        Color::GRAY,
    ];

    const fn new(name: &'static str, sgr: &'static str) -> Self {
        Self { name, sgr }
    }

    pub fn code(&self) -> String {
        ansi::sgr(self.sgr)
    }

    /// Looks up a color by name. Unknown names are an error, never a default.
    pub fn lookup(name: &str) -> Result<Color> {
        Self::MAP
            .iter()
            .find(|color| color.name == name)
            .copied()
            .ok_or_else(|| UiError::InvalidColorName {
                name: name.to_string(),
                available: Self::available().join(","),
            })
    }

    pub fn available() -> Vec<&'static str> {
        Self::MAP.iter().map(|color| color.name).collect()
    }
}
