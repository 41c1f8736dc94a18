//! Monotonic clock for the engine loops.
//!
//! Engine timing arithmetic uses `embassy_time` values; this clock maps the
//! Tokio runtime clock onto them, so paused-time tests drive the whole
//! engine deterministically.

use embassy_time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: tokio::time::Instant,
}

impl MonotonicClock {
    /// Create a clock whose zero is the current moment
    pub fn new() -> Self {
        Self {
            epoch: tokio::time::Instant::now(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn now(&self) -> Instant {
        Instant::from_micros(self.epoch.elapsed().as_micros() as u64)
    }

    pub async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(to_std(duration)).await;
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert an engine duration into a standard one
pub fn to_std(duration: Duration) -> std::time::Duration {
    std::time::Duration::from_micros(duration.as_micros())
}
