use std::time::Duration;

/// Display frame period of the render loop.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOptions {
    /// Print failure reports when `wait` finishes. When off, `wait` only
    /// returns the aggregate result.
    pub auto_debrief: bool,
    pub period: Duration,
    /// Prefix drawn at the start of every task line.
    pub inset: String,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            auto_debrief: true,
            period: DEFAULT_PERIOD,
            inset: String::new(),
        }
    }
}

impl GroupOptions {
    pub fn with_auto_debrief(mut self, auto_debrief: bool) -> Self {
        self.auto_debrief = auto_debrief;
        self
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn with_inset(mut self, inset: impl Into<String>) -> Self {
        self.inset = inset.into();
        self
    }
}
