//! Tick scheduling and timing utilities.
//!
//! Provides drift-corrected periodic pacing without owning a timer.
//! The caller is responsible for sleeping between ticks.

use embassy_time::{Duration, Instant};

/// Default sampler period (~60 ticks per second).
pub const DEFAULT_SAMPLE_PERIOD: Duration = Duration::from_millis(16);

/// Default motion tick period (~60 ticks per second).
pub const DEFAULT_MOTION_PERIOD: Duration = Duration::from_millis(16);

/// Result of a tick operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Periodic tick scheduler driven by a monotonic clock.
///
/// Deadlines advance by a fixed period, independent of how long the work
/// of a tick took. If the caller falls more than two periods behind, the
/// backlog is dropped instead of being replayed as a burst of ticks.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(period);
///
/// loop {
///     do_work();
///     let result = scheduler.tick(clock.now());
///     clock.sleep(result.sleep_duration).await;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TickScheduler {
    next_tick: Instant,
    period: Duration,
}

impl TickScheduler {
    pub const fn new(period: Duration) -> Self {
        Self {
            next_tick: Instant::from_ticks(0),
            period,
        }
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Register the tick that just ran at `now` and return timing information
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Drift correction: if we've fallen too far behind, reset to now
        let max_drift = Duration::from_ticks(self.period.as_ticks() * 2);
        if now > self.next_tick + max_drift {
            self.next_tick = now;
        }

        self.next_tick += self.period;

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration: self.next_tick.saturating_duration_since(now),
        }
    }
}
