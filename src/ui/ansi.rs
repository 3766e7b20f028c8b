//! Escape sequence helpers.
//!
//! Cursor movement and line clearing are produced by `crossterm` commands
//! rendered into strings, so the render loop can batch a whole frame before
//! touching the terminal.

use crossterm::{cursor, terminal, Command};

pub const ESC: char = '\x1b';

fn ansi(command: impl Command) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = command.write_ansi(&mut out);
    out
}

fn clamp(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Select Graphic Rendition sequence for a raw code such as `31` or `38;5;244`.
pub fn sgr(code: &str) -> String {
    format!("{ESC}[{code}m")
}

/// Moves the cursor up `n` lines. Zero yields no output, since terminals read
/// a zero count as one.
pub fn cursor_up(n: usize) -> String {
    if n == 0 {
        return String::new();
    }
    ansi(cursor::MoveUp(clamp(n)))
}

pub fn cursor_down(n: usize) -> String {
    if n == 0 {
        return String::new();
    }
    ansi(cursor::MoveDown(clamp(n)))
}

pub fn cursor_forward(n: usize) -> String {
    if n == 0 {
        return String::new();
    }
    ansi(cursor::MoveRight(clamp(n)))
}

pub fn clear_to_end_of_line() -> String {
    ansi(terminal::Clear(terminal::ClearType::UntilNewLine))
}

/// Number of terminal columns `text` occupies once escape sequences are removed.
pub fn printing_width(text: &str) -> usize {
    strip_codes(text).chars().count()
}

/// Removes CSI escape sequences (`ESC [ params final`) from `text`.
pub fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ESC {
            out.push(c);
            continue;
        }
        if chars.peek() != Some(&'[') {
            continue;
        }
        chars.next();
        for c in chars.by_ref() {
            if ('\x40'..='\x7e').contains(&c) {
                break;
            }
        }
    }
    out
}
