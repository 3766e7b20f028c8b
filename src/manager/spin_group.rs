use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Instant;

use log::{debug, error, info};

use crate::config::GroupOptions;
use crate::lock;
use crate::manager::task::{Task, TaskHandle};
use crate::models::task::IntoOutcome;
use crate::ui::ansi;
use crate::ui::color::Color;
use crate::ui::frame::Frame;
use crate::ui::glyph::SPINNER_RUNES;
use crate::ui::terminal::{StdoutTerminal, Terminal};

const EMPTY_OUTPUT: &str = "(empty)";

/// Where a task's line goes on the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePlacement {
    /// Never drawn: print below everything drawn so far.
    Append,
    /// Already on screen: move `up` lines to reach it, `down` to come back.
    InPlace { up: usize, down: usize },
}

/// Cursor arithmetic for task `index` when `consumed_lines` lines are drawn
/// and the cursor sits on the line below the last of them.
pub fn place_line(consumed_lines: usize, index: usize) -> LinePlacement {
    if index >= consumed_lines {
        return LinePlacement::Append;
    }
    let offset = consumed_lines - index;
    LinePlacement::InPlace {
        up: offset,
        down: offset,
    }
}

struct GroupState {
    tasks: Vec<Task>,
    consumed_lines: usize,
    animation_frame: usize,
}

/// Runs tasks concurrently, one animated status line each, and reports the
/// failures once they have all finished.
///
/// Starting a task installs a process-wide panic hook that is never removed.
/// It silences panics on worker threads, which are reported by `debrief`
/// instead. Panics on any other thread, including threads a task spawns
/// itself, still go to the previous hook and print onto the terminal.
///
/// ```no_run
/// use spin_group::{GroupOptions, SpinGroup};
///
/// let group = SpinGroup::new(GroupOptions::default());
/// group.add("Compile", |_| std::thread::sleep(std::time::Duration::from_secs(1)));
/// group.add("Fetch", |task| {
///     task.update_title("Fetch (retrying)");
///     true
/// });
/// let all_ok = group.wait();
/// ```
pub struct SpinGroup {
    state: Mutex<GroupState>,
    terminal: Arc<dyn Terminal>,
    options: GroupOptions,
    start: Instant,
}

impl SpinGroup {
    pub fn new(options: GroupOptions) -> Self {
        Self::with_terminal(options, Arc::new(StdoutTerminal))
    }

    pub fn with_terminal(options: GroupOptions, terminal: Arc<dyn Terminal>) -> Self {
        Self {
            state: Mutex::new(GroupState {
                tasks: Vec::new(),
                consumed_lines: 0,
                animation_frame: 0,
            }),
            terminal,
            options,
            start: Instant::now(),
        }
    }

    /// Builds a group, lets `build` add tasks to it, then waits for them.
    pub fn run<F>(options: GroupOptions, terminal: Arc<dyn Terminal>, build: F) -> bool
    where
        F: FnOnce(&SpinGroup),
    {
        let group = Self::with_terminal(options, terminal);
        build(&group);
        group.wait()
    }

    /// Starts `work` as a new task. It must write output through
    /// `task.stdout()` / `task.stderr()`; plain `println!` is not captured.
    /// Failures of the work itself surface through `wait` and `debrief`,
    /// never here.
    pub fn add<F, R>(&self, title: impl Into<String>, work: F) -> TaskHandle
    where
        F: FnOnce(&TaskHandle) -> R + Send + 'static,
        R: IntoOutcome,
    {
        let mut state = self.lock_state();
        let id = state.tasks.len();
        let task = Task::start(id, title, &self.options.inset, work);
        let handle = task.handle().clone();
        state.tasks.push(task);
        handle
    }

    /// Redraws every task each period until all are done.
    pub fn wait(&self) -> bool {
        self.lock_state().animation_frame = 0;

        loop {
            let width = self.terminal.width();
            if self.draw_frame(width) {
                break;
            }
            {
                let mut state = self.lock_state();
                state.animation_frame = (state.animation_frame + 1) % SPINNER_RUNES.len();
            }
            thread::sleep(self.options.period);
        }
        debug!("All tasks done after {:?}", self.start.elapsed());

        if self.options.auto_debrief {
            self.debrief()
        } else {
            self.all_succeeded()
        }
    }

    /// Checks and draws every task once. Returns whether all are done.
    fn draw_frame(&self, width: usize) -> bool {
        let mut state = self.lock_state();
        let GroupState {
            tasks,
            consumed_lines,
            animation_frame,
        } = &mut *state;
        let frame = *animation_frame;

        let mut all_done = true;
        let mut out = String::new();
        for (index, task) in tasks.iter_mut().enumerate() {
            if !task.check() {
                all_done = false;
            }

            match place_line(*consumed_lines, index) {
                LinePlacement::Append => {
                    out.push_str(&task.render(frame, true, width));
                    out.push('\n');
                    *consumed_lines += 1;
                }
                LinePlacement::InPlace { up, down } => {
                    out.push_str(&ansi::cursor_up(up));
                    out.push('\r');
                    out.push_str(&task.render(frame, frame == 0, width));
                    out.push('\r');
                    out.push_str(&ansi::cursor_down(down));
                }
            }
        }

        self.emit(&out);
        all_done
    }

    /// Prints a report for every task that did not succeed. Returns whether
    /// all tasks succeeded.
    pub fn debrief(&self) -> bool {
        let state = self.lock_state();
        let width = self.terminal.width();
        let elapsed = self.start.elapsed();

        let mut out = String::new();
        for task in state.tasks.iter().filter(|task| !task.success()) {
            let title = format!("Task Failed: {}", task.title());
            let mut frame = Frame::open(&title, Color::RED, width);
            if let Some(failure) = task.failure() {
                frame.puts(&failure.to_string());
            }
            frame.divider("STDOUT");
            frame.puts(or_empty(task.stdout()));
            frame.divider("STDERR");
            frame.puts(or_empty(task.stderr()));
            out.push_str(&frame.close(Some(elapsed)));
        }
        if !out.is_empty() {
            self.emit(&out);
        }

        let all_succeeded = state.tasks.iter().all(Task::success);
        info!(
            "Debriefed {} task(s), all succeeded: {}",
            state.tasks.len(),
            all_succeeded
        );
        all_succeeded
    }

    pub fn all_succeeded(&self) -> bool {
        self.lock_state().tasks.iter().all(Task::success)
    }

    pub fn consumed_lines(&self) -> usize {
        self.lock_state().consumed_lines
    }

    pub fn titles(&self) -> Vec<String> {
        self.lock_state().tasks.iter().map(Task::title).collect()
    }

    fn emit(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Err(e) = self
            .terminal
            .write(text)
            .and_then(|_| self.terminal.flush())
        {
            error!("Failed to write to terminal: {}", e);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, GroupState> {
        lock(&self.state)
    }
}

fn or_empty(captured: Option<&str>) -> &str {
    match captured {
        Some(text) if !text.trim().is_empty() => text,
        _ => EMPTY_OUTPUT,
    }
}

/// Runs a single task on stdout and waits for it.
pub fn spin<F, R>(title: impl Into<String>, work: F) -> bool
where
    F: FnOnce(&TaskHandle) -> R + Send + 'static,
    R: IntoOutcome,
{
    let group = SpinGroup::new(GroupOptions::default());
    group.add(title, work);
    group.wait()
}
