//! Box-drawn report blocks.
//!
//! ```text
//! ┏━━ Task Failed: build ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//! ┃ error message
//! ┣━━ STDOUT ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//! ┃ (empty)
//! ┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━ (1.52s) ━━
//! ```

use std::time::Duration;

use crate::ui::ansi;
use crate::ui::color::Color;

const HORIZONTAL: &str = "━";

pub struct Frame {
    color: Color,
    width: usize,
    out: String,
}

impl Frame {
    pub fn open(title: &str, color: Color, width: usize) -> Self {
        let mut frame = Self {
            color,
            width,
            out: String::new(),
        };
        frame.edge("┏━━ ", title);
        frame
    }

    /// Writes `text` into the body; every line gets the frame prefix.
    pub fn puts(&mut self, text: &str) {
        for line in text.lines() {
            self.out.push_str(&self.prefix());
            self.out.push_str(line);
            self.out.push('\n');
        }
        if text.is_empty() {
            self.out.push_str(&self.prefix());
            self.out.push('\n');
        }
    }

    pub fn divider(&mut self, label: &str) {
        self.edge("┣━━ ", label);
    }

    pub fn close(mut self, elapsed: Option<Duration>) -> String {
        let suffix = match elapsed {
            Some(elapsed) => format!(" ({:.2}s) ━━", elapsed.as_secs_f64()),
            None => String::new(),
        };
        let fill = self
            .width
            .saturating_sub(1 + ansi::printing_width(&suffix));
        let reset = Color::RESET.code();
        self.out.push_str(&format!(
            "{}┗{}{suffix}{reset}\n",
            self.color.code(),
            HORIZONTAL.repeat(fill)
        ));
        self.out
    }

    pub fn prefix(&self) -> String {
        format!("{}┃{} ", self.color.code(), Color::RESET.code())
    }

    fn edge(&mut self, lead: &str, label: &str) {
        let used = ansi::printing_width(lead) + ansi::printing_width(label) + 1;
        let fill = self.width.saturating_sub(used);
        let color = self.color.code();
        let reset = Color::RESET.code();
        self.out.push_str(&format!(
            "{color}{lead}{reset}{}{label}{reset} {color}{}{reset}\n",
            Color::BOLD.code(),
            HORIZONTAL.repeat(fill)
        ));
    }
}
