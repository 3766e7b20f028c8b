use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use log::{debug, error};

use crate::manager::task::TaskHandle;
use crate::models::message::Completion;
use crate::models::task::{FailureDetails, IntoOutcome, Outcome};
use crate::worker::capture::{run_captured, WORKER_THREAD_PREFIX};

/// Starts `work` on its own thread. The thread reports exactly one
/// `Completion` on `sender` before it exits.
///
/// If the thread cannot be spawned the failure is reported on `sender`
/// straight away and `None` is returned.
pub fn spawn_worker_thread<F, R>(
    id: usize,
    handle: TaskHandle,
    work: F,
    sender: Sender<Completion>,
) -> Option<JoinHandle<()>>
where
    F: FnOnce(&TaskHandle) -> R + Send + 'static,
    R: IntoOutcome,
{
    let report = sender.clone();
    let spawned = thread::Builder::new()
        .name(format!("{WORKER_THREAD_PREFIX}{id}"))
        .spawn(move || {
            let completion = run_captured(&handle, work);
            debug!("Task '{}' finished: {:?}", id, completion.outcome);
            if let Err(e) = sender.send(completion) {
                error!("Failed to report completion of task '{}': {}", id, e);
            }
        });

    match spawned {
        Ok(worker) => Some(worker),
        Err(e) => {
            error!("Failed to spawn worker for task '{}': {}", id, e);
            let completion = Completion {
                outcome: Outcome::FailedWithError(FailureDetails::from_error(&e)),
                stdout: String::new(),
                stderr: String::new(),
            };
            let _ = report.send(completion);
            None
        }
    }
}
