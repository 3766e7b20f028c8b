use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Receiver, TryRecvError};
use log::{info, warn};

use crate::lock;
use crate::models::message::Completion;
use crate::models::task::{FailureDetails, IntoOutcome, Outcome, TaskStatus};
use crate::ui::ansi;
use crate::ui::color::Color;
use crate::ui::formatter;
use crate::ui::glyph::{self, Glyph};
use crate::worker::capture::CaptureBuffer;
use crate::worker::worker::spawn_worker_thread;

/// Render fields shared between the worker (through `TaskHandle`) and the
/// render loop. Guarded by the task's own lock, never the group's.
#[derive(Debug)]
struct RenderState {
    title: String,
    force_full_render: bool,
    always_full_render: bool,
}

/// Given to a unit of work so it can retitle itself and write output.
///
/// Only what goes through [`TaskHandle::stdout`] and [`TaskHandle::stderr`]
/// is captured. `println!` and `eprintln!` write to the process streams,
/// land on top of the status lines and are missing from the failure report.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    state: Arc<Mutex<RenderState>>,
    stdout: CaptureBuffer,
    stderr: CaptureBuffer,
}

impl TaskHandle {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            state: Arc::new(Mutex::new(RenderState {
                always_full_render: formatter::has_widget(&title),
                title,
                force_full_render: false,
            })),
            stdout: CaptureBuffer::new(),
            stderr: CaptureBuffer::new(),
        }
    }

    pub fn update_title(&self, title: impl Into<String>) {
        let title = title.into();
        let mut state = lock(&self.state);
        state.always_full_render = formatter::has_widget(&title);
        state.title = title;
        state.force_full_render = true;
    }

    pub fn title(&self) -> String {
        lock(&self.state).title.clone()
    }

    pub fn stdout(&self) -> CaptureBuffer {
        self.stdout.clone()
    }

    pub fn stderr(&self) -> CaptureBuffer {
        self.stderr.clone()
    }
}

pub struct Task {
    id: usize,
    handle: TaskHandle,
    worker: Option<JoinHandle<()>>,
    receiver: Receiver<Completion>,
    inset: String,
    done: bool,
    success: bool,
    failure: Option<FailureDetails>,
    stdout: Option<String>,
    stderr: Option<String>,
}

impl Task {
    /// Launches `work` on a new worker thread and returns immediately.
    pub fn start<F, R>(id: usize, title: impl Into<String>, inset: &str, work: F) -> Self
    where
        F: FnOnce(&TaskHandle) -> R + Send + 'static,
        R: IntoOutcome,
    {
        let handle = TaskHandle::new(title);
        info!("Starting task '{}': {}", id, handle.title());
        let (sender, receiver) = bounded(1);
        let worker = spawn_worker_thread(id, handle.clone(), work, sender);
        Self {
            id,
            handle,
            worker,
            receiver,
            inset: inset.to_string(),
            done: false,
            success: false,
            failure: None,
            stdout: None,
            stderr: None,
        }
    }

    /// Non-blocking completion probe. The first call that sees the worker's
    /// report joins the thread and latches the result; later calls return
    /// `true` without touching anything.
    pub fn check(&mut self) -> bool {
        if self.done {
            return true;
        }

        let completion = match self.receiver.try_recv() {
            Ok(completion) => completion,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Completion {
                outcome: Outcome::FailedWithError(FailureDetails::panic(
                    "worker exited without reporting a result",
                )),
                stdout: self.handle.stdout().contents(),
                stderr: self.handle.stderr().contents(),
            },
        };

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Worker thread of task '{}' panicked after reporting", self.id);
            }
        }

        self.done = true;
        self.success = completion.outcome.is_success();
        self.failure = match completion.outcome {
            Outcome::FailedWithError(details) => Some(details),
            Outcome::Success | Outcome::FailedResult => None,
        };
        self.stdout = Some(completion.stdout);
        self.stderr = Some(completion.stderr);

        if self.success {
            info!("Task '{}' succeeded.", self.id);
        } else {
            warn!("Task '{}' failed: {}", self.id, self.handle.title());
        }
        true
    }

    /// Renders the task's line for animation frame `frame`.
    ///
    /// A full render repaints glyph and title. Otherwise only the glyph is
    /// redrawn and the title already on screen is left alone; titles with
    /// widgets can change on their own and always get the full path.
    pub fn render(&self, frame: usize, force: bool, width: usize) -> String {
        let mut state = lock(&self.handle.state);
        let line = if force || state.always_full_render || state.force_full_render {
            self.full_render(&state.title, frame, width)
        } else {
            self.partial_render(frame)
        };
        state.force_full_render = false;
        line
    }

    fn full_render(&self, title: &str, frame: usize, width: usize) -> String {
        let prefix = format!("{}{}{} ", self.inset, self.glyph(frame), Color::RESET.code());
        let truncate_to = width.saturating_sub(ansi::printing_width(&prefix));
        format!(
            "{prefix}{}{}",
            formatter::resolve_text(title, frame, truncate_to),
            ansi::clear_to_end_of_line()
        )
    }

    fn partial_render(&self, frame: usize) -> String {
        format!(
            "{}{}{}",
            ansi::cursor_forward(ansi::printing_width(&self.inset)),
            self.glyph(frame),
            Color::RESET.code()
        )
    }

    fn glyph(&self, frame: usize) -> String {
        match (self.done, self.success) {
            (true, true) => Glyph::CHECK.to_string(),
            (true, false) => Glyph::X.to_string(),
            (false, _) => glyph::spinner_rune(frame),
        }
    }

    pub fn handle(&self) -> &TaskHandle {
        &self.handle
    }

    pub fn title(&self) -> String {
        self.handle.title()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn status(&self) -> TaskStatus {
        match (self.done, self.success) {
            (false, _) => TaskStatus::Running,
            (true, true) => TaskStatus::Succeeded,
            (true, false) => TaskStatus::Failed,
        }
    }

    pub fn failure(&self) -> Option<&FailureDetails> {
        self.failure.as_ref()
    }

    /// Captured stdout; `None` until the task is done.
    pub fn stdout(&self) -> Option<&str> {
        self.stdout.as_deref()
    }

    pub fn stderr(&self) -> Option<&str> {
        self.stderr.as_deref()
    }
}
