use super::task::Outcome;

/// Sent by a worker thread once its unit of work has returned or panicked.
#[derive(Debug, Clone)]
pub struct Completion {
    pub outcome: Outcome,
    pub stdout: String,
    pub stderr: String,
}
