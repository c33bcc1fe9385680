//! Debounced persistence timer
//!
//! Each layout change restarts the delay; a write is due only once the delay
//! elapses with no further change. Pausing drops any pending write and
//! ignores requests until resumed.

use std::time::{Duration, Instant};

pub const DEFAULT_PERSIST_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct PersistScheduler {
    delay: Duration,
    deadline: Option<Instant>,
    paused: bool,
}

impl Default for PersistScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_PERSIST_DELAY)
    }
}

impl PersistScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            paused: false,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)start the timer; ignored while paused
    pub fn request(&mut self, now: Instant) {
        if self.paused {
            return;
        }
        self.deadline = Some(now + self.delay);
    }

    pub fn pause(&mut self) {
        if self.deadline.take().is_some() {
            tracing::debug!("Dropped pending layout write on pause");
        }
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true exactly once per elapsed timer
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if !self.paused && now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the pending write is due
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}
