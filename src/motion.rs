//! Motion policies that move the current color toward the target.
//!
//! Both policies share one contract ([`MotionModel`]): `retarget` accepts a new
//! target starting from the present interpolated color, `advance` moves one
//! tick forward. Output is always clamped to the valid channel range and
//! approaches the target monotonically per channel.

use core::str::FromStr;

use embassy_time::{Duration, Instant};

use crate::color::{ColorF, Rgb};
use crate::easing::{Easing, EasingMode};
use crate::transition::Tween;

const POLICY_NAME_FIXED_STEP: &str = "fixed-step";
const POLICY_NAME_EASED: &str = "eased";

/// Motion policy selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPolicy {
    /// Linear interpolation in `steps` equal ticks
    FixedStep { steps: u16 },
    /// Eased interpolation over a fixed wall-clock duration
    Eased {
        duration: Duration,
        easing: Easing,
        mode: EasingMode,
    },
}

impl Default for MotionPolicy {
    fn default() -> Self {
        Self::Eased {
            duration: Duration::from_millis(500),
            easing: Easing::Quad,
            mode: EasingMode::InOut,
        }
    }
}

/// Policy family name, used by the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    FixedStep,
    Eased,
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            POLICY_NAME_FIXED_STEP | "fixed_step" | "linear" => Ok(Self::FixedStep),
            POLICY_NAME_EASED | "tween" => Ok(Self::Eased),
            _ => Err(format!("unknown motion policy `{s}`")),
        }
    }
}

impl PolicyKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FixedStep => POLICY_NAME_FIXED_STEP,
            Self::Eased => POLICY_NAME_EASED,
        }
    }
}

pub trait MotionModel {
    /// Start moving toward `target` from the present color
    fn retarget(&mut self, target: Rgb, now: Instant);

    /// Advance one tick and return the new current color
    fn advance(&mut self, now: Instant) -> ColorF;

    /// Present interpolated color
    fn current(&self) -> ColorF;

    /// Check if the current color rests on the target
    fn is_settled(&self) -> bool;
}

/// Linear interpolation in a fixed number of ticks
#[derive(Debug, Clone)]
pub struct FixedStepMotion {
    steps: u16,
    origin: ColorF,
    target: ColorF,
    step: ColorF,
    current: ColorF,
    /// Ticks taken since the last retarget
    taken: u16,
}

impl FixedStepMotion {
    pub fn new(steps: u16, initial: Rgb) -> Self {
        let initial = ColorF::from(initial);
        Self {
            steps,
            origin: initial,
            target: initial,
            step: ColorF::default(),
            current: initial,
            taken: steps,
        }
    }

    /// Per-tick increment of the running motion
    pub const fn step(&self) -> ColorF {
        self.step
    }

    pub const fn remaining(&self) -> u16 {
        self.steps - self.taken
    }
}

impl MotionModel for FixedStepMotion {
    fn retarget(&mut self, target: Rgb, _now: Instant) {
        let target = ColorF::from(target);
        self.origin = self.current;
        self.target = target;
        if self.steps == 0 {
            self.current = target;
            self.step = ColorF::default();
            return;
        }
        self.step = (target - self.origin) / f32::from(self.steps);
        self.taken = 0;
    }

    fn advance(&mut self, _now: Instant) -> ColorF {
        if self.taken >= self.steps {
            return self.current;
        }

        self.taken += 1;
        self.current = if self.taken == self.steps {
            self.target
        } else {
            // Computed from the origin so rounding does not accumulate
            (self.origin + self.step * f32::from(self.taken)).clamped()
        };
        self.current
    }

    fn current(&self) -> ColorF {
        self.current
    }

    fn is_settled(&self) -> bool {
        self.taken >= self.steps
    }
}

/// Eased interpolation, one tween per channel
#[derive(Debug, Clone)]
pub struct EasedMotion {
    duration: Duration,
    easing: Easing,
    mode: EasingMode,
    channels: [Tween; 3],
}

impl EasedMotion {
    pub fn new(duration: Duration, easing: Easing, mode: EasingMode, initial: Rgb) -> Self {
        let channels = ColorF::from(initial).channels().map(Tween::idle);
        Self {
            duration,
            easing,
            mode,
            channels,
        }
    }

    /// Per-channel tweens of the running motion
    pub const fn tweens(&self) -> &[Tween; 3] {
        &self.channels
    }
}

impl MotionModel for EasedMotion {
    fn retarget(&mut self, target: Rgb, now: Instant) {
        let target = ColorF::from(target).channels();
        for (tween, end) in self.channels.iter_mut().zip(target) {
            // Restart from where the channel is now, never from the old start
            let start = tween.tick(now);
            *tween = Tween::new(start, end, self.duration, self.easing, self.mode, now);
        }
    }

    fn advance(&mut self, now: Instant) -> ColorF {
        for tween in &mut self.channels {
            tween.tick(now);
        }
        self.current()
    }

    fn current(&self) -> ColorF {
        ColorF::from_channels(self.channels.map(|tween| tween.value())).clamped()
    }

    fn is_settled(&self) -> bool {
        self.channels.iter().all(|tween| !tween.is_animating())
    }
}

/// Motion slot - enum containing all supported policies
#[derive(Debug, Clone)]
pub enum Motion {
    FixedStep(FixedStepMotion),
    Eased(EasedMotion),
}

impl Motion {
    /// Create the motion for a policy, resting at `initial`
    pub fn new(policy: MotionPolicy, initial: Rgb) -> Self {
        match policy {
            MotionPolicy::FixedStep { steps } => {
                Self::FixedStep(FixedStepMotion::new(steps, initial))
            }
            MotionPolicy::Eased {
                duration,
                easing,
                mode,
            } => Self::Eased(EasedMotion::new(duration, easing, mode, initial)),
        }
    }
}

impl MotionModel for Motion {
    fn retarget(&mut self, target: Rgb, now: Instant) {
        match self {
            Self::FixedStep(motion) => motion.retarget(target, now),
            Self::Eased(motion) => motion.retarget(target, now),
        }
    }

    fn advance(&mut self, now: Instant) -> ColorF {
        match self {
            Self::FixedStep(motion) => motion.advance(now),
            Self::Eased(motion) => motion.advance(now),
        }
    }

    fn current(&self) -> ColorF {
        match self {
            Self::FixedStep(motion) => motion.current(),
            Self::Eased(motion) => motion.current(),
        }
    }

    fn is_settled(&self) -> bool {
        match self {
            Self::FixedStep(motion) => motion.is_settled(),
            Self::Eased(motion) => motion.is_settled(),
        }
    }
}
