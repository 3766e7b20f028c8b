use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetails {
    /// Error type name, or `panic` for a caught panic.
    pub kind: String,
    pub message: String,
    /// `source()` chain of the error, outermost cause first.
    pub trace: Vec<String>,
}

impl FailureDetails {
    pub fn from_error<E>(err: &E) -> Self
    where
        E: Error + ?Sized,
    {
        let mut trace = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            trace.push(cause.to_string());
            source = cause.source();
        }
        Self {
            kind: short_type_name(std::any::type_name::<E>()).to_string(),
            message: err.to_string(),
            trace,
        }
    }

    pub fn panic(message: impl Into<String>) -> Self {
        Self {
            kind: "panic".to_string(),
            message: message.into(),
            trace: Vec::new(),
        }
    }
}

impl fmt::Display for FailureDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        for cause in &self.trace {
            write!(f, "\n\tfrom {cause}")?;
        }
        Ok(())
    }
}

fn short_type_name(name: &str) -> &str {
    if name.contains('<') {
        return name;
    }
    name.rsplit("::").next().unwrap_or(name)
}

/// How a unit of work finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The work returned the explicit failure sentinel.
    FailedResult,
    FailedWithError(FailureDetails),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn failure(&self) -> Option<&FailureDetails> {
        match self {
            Outcome::FailedWithError(details) => Some(details),
            _ => None,
        }
    }
}

/// Return values a unit of work may produce.
pub trait IntoOutcome {
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Outcome {
        self
    }
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome {
        Outcome::Success
    }
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> Outcome {
        if self {
            Outcome::Success
        } else {
            Outcome::FailedResult
        }
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Error,
{
    fn into_outcome(self) -> Outcome {
        match self {
            Ok(value) => value.into_outcome(),
            Err(err) => Outcome::FailedWithError(FailureDetails::from_error(&err)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Succeeded,
    Failed,
}
