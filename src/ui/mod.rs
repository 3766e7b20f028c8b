pub mod ansi;
pub mod color;
pub mod formatter;
pub mod frame;
pub mod glyph;
pub mod terminal;
