//! Per-task output capture.
//!
//! Workers never write to the terminal. A unit of work writes through the
//! buffers exposed on its `TaskHandle`, and whatever was written is handed
//! back in the `Completion`, including after a panic.

use std::any::Any;
use std::cell::RefCell;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Once};
use std::thread;

use crate::lock;
use crate::manager::task::TaskHandle;
use crate::models::message::Completion;
use crate::models::task::{FailureDetails, IntoOutcome, Outcome};

pub const WORKER_THREAD_PREFIX: &str = "spin-group-task-";

thread_local! {
    static PANIC_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&lock(&self.bytes)).into_owned()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.bytes).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `work` with `handle`, converting its return value or panic into an
/// `Outcome` and collecting the captured streams.
pub fn run_captured<F, R>(handle: &TaskHandle, work: F) -> Completion
where
    F: FnOnce(&TaskHandle) -> R,
    R: IntoOutcome,
{
    install_panic_hook();
    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| work(handle).into_outcome())) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let mut details = FailureDetails::panic(panic_message(payload.as_ref()));
            if let Some(location) = PANIC_LOCATION.with(|slot| slot.borrow_mut().take()) {
                details.trace.push(format!("panicked at {location}"));
            }
            Outcome::FailedWithError(details)
        }
    };
    Completion {
        outcome,
        stdout: handle.stdout().contents(),
        stderr: handle.stderr().contents(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Keeps the default hook from printing worker panics onto the render surface.
/// Panics on other threads go to the previously installed hook, including
/// threads a unit of work spawns itself. The hook stays installed for the
/// rest of the process.
fn install_panic_hook() {
    static INSTALLED: Once = Once::new();
    INSTALLED.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let on_worker = thread::current()
                .name()
                .is_some_and(|name| name.starts_with(WORKER_THREAD_PREFIX));
            if !on_worker {
                previous(info);
                return;
            }
            let location = info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
            PANIC_LOCATION.with(|slot| *slot.borrow_mut() = location);
        }));
    });
}
