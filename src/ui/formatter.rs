//! Title text resolution: widget expansion and width truncation.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::ui::ansi::{self, ESC};
use crate::ui::color::Color;
use crate::ui::glyph;

const ELLIPSIS: char = '…';

fn widget_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{@widget/(?P<handler>\w+):(?P<args>.*?)\}\}")
            .unwrap_or_else(|e| panic!("widget pattern is invalid: {e}"))
    })
}

/// True when `text` embeds a widget whose output may change between frames.
pub fn has_widget(text: &str) -> bool {
    widget_pattern().is_match(text)
}

/// Expands widgets for animation frame `frame`, then truncates the result to
/// `truncate_to` printing columns.
pub fn resolve_text(text: &str, frame: usize, truncate_to: usize) -> String {
    let expanded = widget_pattern().replace_all(text, |caps: &Captures<'_>| {
        render_widget(&caps["handler"], &caps["args"], frame)
            .unwrap_or_else(|| caps[0].to_string())
    });
    truncate(&expanded, truncate_to)
}

fn render_widget(handler: &str, args: &str, frame: usize) -> Option<String> {
    match handler {
        "status" => render_status(args, frame),
        _ => None,
    }
}

/// `status:<succeeded>:<failed>:<working>:<pending>`
fn render_status(args: &str, frame: usize) -> Option<String> {
    let counts = args
        .split(':')
        .map(|n| n.trim().parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    let [succeeded, failed, working, pending] = counts.as_slice() else {
        return None;
    };
    let reset = Color::RESET.code();
    let paint = |count: u64, color: Color, rune: &str| {
        let color = if count == 0 { Color::GRAY } else { color };
        format!("{}{count}{rune}{reset}", color.code())
    };
    let rune = glyph::SPINNER_RUNES[frame % glyph::SPINNER_RUNES.len()].to_string();
    Some(
        [
            paint(*succeeded, Color::GREEN, "✓"),
            paint(*failed, Color::RED, "✗"),
            paint(*working, Color::BLUE, &rune),
            paint(*pending, Color::WHITE, "⋯"),
        ]
        .join(" "),
    )
}

/// Cuts `text` to `width` printing columns, keeping escape sequences intact and
/// marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if ansi::printing_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let keep = width - 1;
    let mut out = String::with_capacity(text.len());
    let mut visible = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESC {
            out.push(c);
            if chars.peek() == Some(&'[') {
                chars.next();
                out.push('[');
                for c in chars.by_ref() {
                    out.push(c);
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        if visible == keep {
            break;
        }
        out.push(c);
        visible += 1;
    }
    out.push(ELLIPSIS);
    out.push_str(&Color::RESET.code());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_widgets() {
        assert!(has_widget("Deploying {{@widget/status:1:0:2:3}}"));
        assert!(!has_widget("Deploying {{green:ok}}"));
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(resolve_text("hello", 0, 10), "hello");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        let out = truncate("abcdefghij", 5);
        assert_eq!(ansi::strip_codes(&out), "abcd…");
        assert_eq!(ansi::printing_width(&out), 5);
    }

    #[test]
    fn truncation_keeps_escapes() {
        let text = format!("{}abcdef", Color::RED.code());
        let out = truncate(&text, 3);
        assert!(out.starts_with("\x1b[31mab…"));
    }

    #[test]
    fn status_widget_animates_with_frame() {
        let title = "{{@widget/status:1:0:2:3}}";
        let first = resolve_text(title, 0, 80);
        let second = resolve_text(title, 1, 80);
        assert_ne!(first, second);
        assert_eq!(ansi::strip_codes(&first), "1✓ 0✗ 2⠋ 3⋯");
    }

    #[test]
    fn unknown_widget_is_left_verbatim() {
        let title = "{{@widget/clock:now}}";
        assert_eq!(resolve_text(title, 0, 80), title);
    }
}
