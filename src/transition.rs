use embassy_time::{Duration, Instant};

use crate::easing::{Easing, EasingMode};

/// Time-boxed eased interpolation of a single channel
///
/// A tween is never retargeted in place: a new target means a new tween,
/// started from the value the old one has reached.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    /// Value at the start of the tween
    start: f32,
    /// Value the tween settles at
    end: f32,
    /// Current interpolated value
    current: f32,
    /// Time at which the tween started
    start_time: Instant,
    /// Total tween duration
    duration: Duration,
    easing: Easing,
    mode: EasingMode,
    animating: bool,
}

impl Tween {
    /// Create a settled tween resting at `value`
    pub const fn idle(value: f32) -> Self {
        Self {
            start: value,
            end: value,
            current: value,
            start_time: Instant::from_ticks(0),
            duration: Duration::from_ticks(0),
            easing: Easing::Linear,
            mode: EasingMode::InOut,
            animating: false,
        }
    }

    /// Start a new tween
    ///
    /// A zero duration settles on `end` immediately.
    pub fn new(
        start: f32,
        end: f32,
        duration: Duration,
        easing: Easing,
        mode: EasingMode,
        now: Instant,
    ) -> Self {
        let immediate = duration.as_ticks() == 0;
        Self {
            start,
            end,
            current: if immediate { end } else { start },
            start_time: now,
            duration,
            easing,
            mode,
            animating: !immediate,
        }
    }

    pub const fn value(&self) -> f32 {
        self.current
    }

    pub const fn start(&self) -> f32 {
        self.start
    }

    pub const fn end(&self) -> f32 {
        self.end
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    pub const fn is_animating(&self) -> bool {
        self.animating
    }

    /// Time spent animating, capped at the tween duration
    pub fn elapsed(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed > self.duration {
            self.duration
        } else {
            elapsed
        }
    }

    /// Update the tween state and return the current value
    #[allow(clippy::cast_precision_loss)]
    pub fn tick(&mut self, now: Instant) -> f32 {
        if !self.animating {
            return self.current;
        }

        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed >= self.duration {
            self.current = self.end;
            self.animating = false;
            return self.current;
        }

        let progress = elapsed.as_ticks() as f32 / self.duration.as_ticks() as f32;
        let eased = self.easing.apply(self.mode, progress);
        let (low, high) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        self.current = (self.start + (self.end - self.start) * eased).clamp(low, high);
        self.current
    }
}
