use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crossterm::terminal;

pub const DEFAULT_WIDTH: usize = 80;

/// The cursor-addressed surface the render loop draws on.
pub trait Terminal: Send + Sync {
    /// Current width in columns. Polled once per frame, never cached.
    fn width(&self) -> usize;
    fn write(&self, text: &str) -> io::Result<()>;
    fn flush(&self) -> io::Result<()>;
}

pub struct StdoutTerminal;

impl Terminal for StdoutTerminal {
    fn width(&self) -> usize {
        match terminal::size() {
            Ok((cols, _)) if cols > 0 => cols as usize,
            _ => DEFAULT_WIDTH,
        }
    }

    fn write(&self, text: &str) -> io::Result<()> {
        io::stdout().lock().write_all(text.as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// In-memory terminal that records every write.
#[derive(Clone)]
pub struct RecordingTerminal {
    width: Arc<Mutex<usize>>,
    writes: Arc<Mutex<Vec<String>>>,
}

impl RecordingTerminal {
    pub fn new(width: usize) -> Self {
        Self {
            width: Arc::new(Mutex::new(width)),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_width(&self, width: usize) {
        *self.width.lock().unwrap_or_else(|e| e.into_inner()) = width;
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn output(&self) -> String {
        self.writes().concat()
    }
}

impl Terminal for RecordingTerminal {
    fn width(&self) -> usize {
        *self.width.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self, text: &str) -> io::Result<()> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}
