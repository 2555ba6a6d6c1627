//! The rest timer: elapsed time since the last exercise was saved.
//!
//! A free-running clock, not a countdown. The owning screen holds exactly
//! one in a single slot and polls it for display on every frame; restarting
//! just moves the anchor. Cancelling a cadence run deliberately does NOT
//! restart it: abandoning an exercise keeps the rest clock running from
//! when it last started.

use std::time::{Duration, Instant};

pub struct RestTimer {
    started_at: Instant,
}

impl RestTimer {
    pub fn start(now: Instant) -> Self {
        Self { started_at: now }
    }

    /// Moves the anchor to `now`. Called on session start and after each
    /// saved exercise.
    pub fn restart(&mut self, now: Instant) {
        self.started_at = now;
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// The `MM:SS` readout shown on the picker.
    pub fn display(&self, now: Instant) -> String {
        format_mm_ss(self.elapsed(now))
    }
}

/// Formats a duration as `MM:SS`, whole seconds, minutes unbounded.
pub fn format_mm_ss(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}
