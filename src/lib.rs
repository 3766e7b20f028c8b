//! Concurrent task progress for terminal programs.
//!
//! A [`SpinGroup`] runs each task on its own thread, animates one status line
//! per task while they run, and prints a report for every failed task once
//! all of them are done.

pub mod config;
pub mod errors;
pub mod manager;
pub mod models;
pub mod ui;
pub mod worker;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use config::GroupOptions;
pub use errors::{Result, UiError};
pub use manager::spin_group::{place_line, spin, LinePlacement, SpinGroup};
pub use manager::task::{Task, TaskHandle};
pub use models::task::{FailureDetails, IntoOutcome, Outcome, TaskStatus};
pub use ui::terminal::{RecordingTerminal, StdoutTerminal, Terminal};

/// Locks `mutex`, recovering the data if a holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
