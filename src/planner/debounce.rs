use std::time::{Duration, Instant};

/// Quiet period after the last qualifying mutation before a persist fires.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Single-slot cancellable deadline used to coalesce rapid mutations into
/// one storage write. Scheduling replaces any pending deadline, so only
/// the last state within a quiet window is ever written.
#[derive(Debug)]
pub struct Debounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Starts (or restarts) the quiet window from now.
    pub fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.quiet);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consumes the deadline when it has expired. Returns whether the
    /// caller should perform the deferred action.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
